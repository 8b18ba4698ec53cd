//! Text blocks surrounding the appended binary data
//!
//! Every piece of header text is produced by [render_header()], and label
//! text only ever enters the header through [attribute_value()]. Nothing else
//! in the crate formats XML.

// standard library
use std::borrow::Cow;

// pxtools modules
use pxtools_format::f;
use pxtools_volume::Extents;

/// Closing tags written straight after the last payload byte
pub const FOOTER: &str = "</AppendedData></VTKFile>";

/// Opening of the appended data section, up to and including the marker
pub(crate) const APPENDED_OPENER: &str = "<AppendedData encoding=\"raw\">\n_";

/// Convention for the upper bounds of the extent attributes
///
/// Extents in image data are point indices, so a grid of `n` cells strictly
/// spans `0..n` points along an axis. Existing files written by the legacy
/// converter use the cell count as the upper bound, and downstream viewers
/// have been set up against that, so it remains the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExtentMode {
    /// Upper bound is the cell count, `"0 nx 0 ny 0 nz"`
    #[default]
    Legacy,
    /// Upper bound is one less than the cell count, floored at zero
    Corrected,
}

impl ExtentMode {
    /// Upper bound written for an axis of `n` cells
    pub fn upper_bound(&self, n: usize) -> usize {
        match self {
            Self::Legacy => n,
            Self::Corrected => n.saturating_sub(1),
        }
    }

    /// Extent attribute value for the given grid
    ///
    /// ```rust
    /// # use pxtools_vti::ExtentMode;
    /// # use pxtools_volume::Extents;
    /// let extents = Extents::new(2, 3, 1);
    /// assert_eq!(ExtentMode::Legacy.extent_string(extents), "0 2 0 3 0 1");
    /// assert_eq!(ExtentMode::Corrected.extent_string(extents), "0 1 0 2 0 0");
    /// ```
    pub fn extent_string(&self, extents: Extents) -> String {
        f!(
            "0 {} 0 {} 0 {}",
            self.upper_bound(extents.nx),
            self.upper_bound(extents.ny),
            self.upper_bound(extents.nz)
        )
    }
}

/// Declaration of one appended cell data array
///
/// Only single precision scalars are supported, so the name and byte offset
/// into the appended block are all that vary between arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArrayDecl<'a> {
    /// Name attribute, usually the field label
    pub name: &'a str,
    /// Offset of the array's size prefix within the appended block
    pub offset: usize,
}

impl<'a> DataArrayDecl<'a> {
    /// New array declaration
    pub fn new(name: &'a str, offset: usize) -> Self {
        Self { name, offset }
    }
}

/// Escape the five XML reserved characters for use in an attribute value
///
/// ```rust
/// # use pxtools_vti::escape_attribute;
/// assert_eq!(escape_attribute("Ex"), "Ex");
/// assert_eq!(escape_attribute("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
/// ```
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Reverse of [escape_attribute()] for the five predefined entities
pub fn unescape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}

/// Label text as it will appear in the header
///
/// Labels are written verbatim unless escaping is enabled, which keeps files
/// byte-identical to those of the legacy converter.
pub fn attribute_value(label: &str, escape: bool) -> Cow<'_, str> {
    match escape {
        true => escape_attribute(label),
        false => Cow::Borrowed(label),
    }
}

/// Render the complete header, ending with the `_` appended data marker
///
/// ```rust
/// # use pxtools_vti::{render_header, DataArrayDecl, ExtentMode};
/// # use pxtools_volume::Extents;
/// let header = render_header(
///     Extents::new(0, 0, 0),
///     ExtentMode::Legacy,
///     &[DataArrayDecl::new("rho", 0)],
///     false,
/// );
/// assert!(header.contains("WholeExtent=\"0 0 0 0 0 0\""));
/// assert!(header.ends_with("<AppendedData encoding=\"raw\">\n_"));
/// ```
pub fn render_header(
    extents: Extents,
    mode: ExtentMode,
    arrays: &[DataArrayDecl],
    escape: bool,
) -> String {
    let extent = mode.extent_string(extents);

    let mut s = String::with_capacity(512);
    s += "<VTKFile type=\"ImageData\" version=\"0.1\" byte_order=\"LittleEndian\">\n";
    s += &f!("<ImageData WholeExtent=\"{extent}\" Origin=\"0 0 0\" Spacing=\"1 1 1\">\n");
    s += &f!("<Piece Extent=\"{extent}\">\n");
    s += "<CellData>\n";
    for array in arrays {
        s += &f!(
            "<DataArray type=\"Float32\" Name=\"{}\" NumberOfComponents=\"1\" format=\"appended\" offset=\"{}\"/>\n",
            attribute_value(array.name, escape),
            array.offset
        );
    }
    s += "</CellData>\n";
    s += "<PointData/>\n";
    s += "</Piece>\n";
    s += "</ImageData>\n";
    s += APPENDED_OPENER;
    s
}
