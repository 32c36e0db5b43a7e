use bon::Builder;

use super::error::ParseError;

/// Default marker opening a block tag.
pub const DEFAULT_OPEN: &str = "{%";

/// Default marker closing a block tag.
pub const DEFAULT_CLOSE: &str = "%}";

/// The pair of markers delimiting block tags.
///
/// Inline `{{expr}}` markers are fixed; only block tag markers can change.
///
/// # Example
///
/// ```
/// use filler::Markers;
///
/// let markers = Markers::builder().open("<%").close("%>").build();
/// assert_eq!(markers.open, "<%");
///
/// let defaults = Markers::default();
/// assert_eq!((defaults.open.as_str(), defaults.close.as_str()), ("{%", "%}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct Markers {
    #[builder(default = DEFAULT_OPEN.to_string())]
    pub open: String,

    #[builder(default = DEFAULT_CLOSE.to_string())]
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers::builder().build()
    }
}

impl Markers {
    /// Create markers from an open and close string.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Markers::builder().open(open).close(close).build()
    }

    pub(crate) fn validate(&self) -> Result<(), ParseError> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(ParseError::InvalidMarkers);
        }
        Ok(())
    }
}
