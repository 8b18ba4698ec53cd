// standard library
use std::str::FromStr;

// crate modules
use crate::error::Error;

/// Which fields to convert
///
/// Parsed from the operator's string, with two reserved words:
///
/// ```rust
/// # use pxtools_batch::FieldSelector;
/// assert_eq!("all".parse::<FieldSelector>().unwrap(), FieldSelector::All);
/// assert_eq!("show".parse::<FieldSelector>().unwrap(), FieldSelector::Show);
/// assert_eq!(
///     "rho".parse::<FieldSelector>().unwrap(),
///     FieldSelector::Pattern("rho".to_string())
/// );
/// assert!("".parse::<FieldSelector>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Convert every discovered field
    All,
    /// List the candidates without converting
    Show,
    /// Convert fields whose name contains the pattern
    Pattern(String),
}

impl FieldSelector {
    /// The selector as the operator wrote it
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Show => "show",
            Self::Pattern(p) => p,
        }
    }

    /// Whether a field name (file stem) is selected
    ///
    /// ```rust
    /// # use pxtools_batch::FieldSelector;
    /// let selector = FieldSelector::Pattern("rho".to_string());
    /// assert!(selector.matches("rho_electrons"));
    /// assert!(selector.matches("rho"));
    /// assert!(!selector.matches("ex"));
    /// assert!(FieldSelector::All.matches("ex"));
    /// ```
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All | Self::Show => true,
            Self::Pattern(p) => name.contains(p.as_str()),
        }
    }

    /// True for the listing-only selector
    pub fn is_dry_run(&self) -> bool {
        *self == Self::Show
    }
}

impl FromStr for FieldSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "show" => Ok(Self::Show),
            s if s.trim().is_empty() => Err(Error::EmptySelector),
            s => Ok(Self::Pattern(s.to_string())),
        }
    }
}

impl std::fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
