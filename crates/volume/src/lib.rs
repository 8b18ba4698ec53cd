//! Dense scalar field volumes
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod volume;

#[doc(inline)]
pub use volume::{Extents, ScalarVolume};

#[doc(inline)]
pub use error::{Error, Result};
