use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[cfg(feature = "std")]
    #[error("cannot open {}: {source}", path.display())]
    FileNotFound {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid BMP: {0}")]
    Format(String),

    #[error("unsupported BMP variant: {0}")]
    Unsupported(String),

    #[error("truncated BMP: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Payload-free category of a [`BmpError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    Io,
    Format,
    Unsupported,
    Truncated,
    InvalidArgument,
    DimensionsTooLarge,
    LimitExceeded,
    Cancelled,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "std")]
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
            Self::Format(_) => ErrorKind::Format,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Truncated { .. } => ErrorKind::Truncated,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::DimensionsTooLarge { .. } => ErrorKind::DimensionsTooLarge,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
