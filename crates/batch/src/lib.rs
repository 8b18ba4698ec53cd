//! Batch conversion of field dumps to VTK image data
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod converter;
mod decoder;
mod error;
mod job;
mod selector;

// Inline anything important for a nice public API
#[doc(inline)]
pub use converter::{convert_fields, BatchConverter, VTI_EXTENSION};

#[doc(inline)]
pub use decoder::FieldDecoder;

#[doc(inline)]
pub use job::{ConversionJob, ConversionSummary, JobReport, LabelMode};

#[doc(inline)]
pub use selector::FieldSelector;

#[doc(inline)]
pub use error::{Error, JobError, Result};
