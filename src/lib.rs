//! `pxtools` is a small toolkit for post-processing PICSAR field dumps
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use pxtools_format as format;

#[doc(inline)]
pub use pxtools_volume as volume;

#[cfg(feature = "batch")]
#[cfg_attr(docsrs, doc(cfg(feature = "batch")))]
#[doc(inline)]
pub use pxtools_batch as batch;

#[cfg(feature = "pxr")]
#[cfg_attr(docsrs, doc(cfg(feature = "pxr")))]
#[doc(inline)]
pub use pxtools_pxr as pxr;

#[cfg(feature = "vti")]
#[cfg_attr(docsrs, doc(cfg(feature = "vti")))]
#[doc(inline)]
pub use pxtools_vti as vti;
