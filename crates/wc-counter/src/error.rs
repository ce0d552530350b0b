use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    /// The raster could not be decoded, or decoded to an empty image.
    ImageDecode(String),
    /// A pipeline stage rejected its input.
    Core(wc_core::Error),
}

impl fmt::Display for CountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode(reason) => write!(f, "image decode failed: {reason}"),
            Self::Core(err) => write!(f, "pipeline error: {err}"),
        }
    }
}

impl std::error::Error for CountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode(_) => None,
            Self::Core(err) => Some(err),
        }
    }
}

impl From<wc_core::Error> for CountError {
    fn from(err: wc_core::Error) -> Self {
        Self::Core(err)
    }
}
