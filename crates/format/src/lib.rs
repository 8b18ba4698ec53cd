//! Common utility for extended `std` type formatting
//!
//! These are left public for convenience.
//!
//! Field summaries print value ranges in scientific notation, batch messages
//! count files, and every error report flattens its causes, so those all live
//! here rather than in every crate.

// standard library
use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumFormat {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use pxtools_format::NumFormat;
    /// let number = -1.0_f64;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((2.5e-7_f32).sci(3, 2), "2.500e-07".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);

        // non-finite values have no exponent to pad
        let Some(idx) = num.find('e') else {
            return num;
        };

        let exp = num.split_off(idx);
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };

        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

/// Count followed by the singular or plural form of a noun
///
/// Only handles the regular "+s" plural, which is all the log messages need.
///
/// ```rust
/// # use pxtools_format::pluralise;
/// assert_eq!(pluralise(1, "field"), "1 field".to_string());
/// assert_eq!(pluralise(0, "field"), "0 fields".to_string());
/// assert_eq!(pluralise(12, "file"), "12 files".to_string());
/// ```
pub fn pluralise(count: usize, noun: &str) -> String {
    match count {
        1 => f!("{count} {noun}"),
        _ => f!("{count} {noun}s"),
    }
}

/// Error message followed by the messages of all of its causes
///
/// ```rust
/// # use pxtools_format::error_chain;
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// assert_eq!(error_chain(&error), "disk full");
/// ```
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message += &f!(": {cause}");
        source = cause.source();
    }
    message
}
