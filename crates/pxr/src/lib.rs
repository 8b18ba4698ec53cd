//! Module for working with PICSAR .pxr field dumps
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod field;
mod reader;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use field::{Axis, Header, PxrField, PXR_EXTENSION};

#[doc(inline)]
pub use reader::{read_pxr_file, PxrDecoder};

#[doc(inline)]
pub use writer::write_pxr_file;

#[doc(inline)]
pub use error::{Error, Result};
