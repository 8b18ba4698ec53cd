//! Module for writing scalar volumes as VTK image data
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod builder;
mod error;
mod header;
mod reader;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use builder::VolumeToVtiBuilder;

#[doc(inline)]
pub use header::{
    attribute_value, escape_attribute, render_header, unescape_attribute, DataArrayDecl,
    ExtentMode, FOOTER,
};

#[doc(inline)]
pub use reader::{parse_vti, read_vti, VtiImage};

#[doc(inline)]
pub use writer::{write_vti, VolumeToVti};

#[doc(inline)]
pub use error::{Error, Result};
