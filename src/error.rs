// Error types for FLAC metadata parsing

use std::io;

/// Result alias used by the FLAC reader
pub type Result<T> = std::result::Result<T, FlacError>;

/// Broad category of a [`FlacError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes do not follow the FLAC / Vorbis comment layout
    Format,
    /// The stream could not be read (short read, closed stream)
    Io,
    /// Skipping over a metadata block failed
    Seek,
}

/// Errors raised while reading the metadata of a single FLAC stream
#[derive(Debug, thiserror::Error)]
pub enum FlacError {
    #[error("missing \"fLaC\" stream marker (found {found:#010x})")]
    InvalidSignature { found: u32 },

    #[error("comment field {index} has no '=' separator")]
    MalformedField { index: u32 },

    #[error("stream ended before the last metadata block")]
    MissingLastBlock,

    #[error("no last metadata block within {limit} blocks")]
    TooManyBlocks { limit: usize },

    #[error("file has no Vorbis comment block")]
    NoVorbisComment,

    #[error("failed to skip {size} bytes of metadata: {source}")]
    Seek {
        size: u64,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FlacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlacError::InvalidSignature { .. }
            | FlacError::MalformedField { .. }
            | FlacError::MissingLastBlock
            | FlacError::TooManyBlocks { .. }
            | FlacError::NoVorbisComment => ErrorKind::Format,
            FlacError::Seek { .. } => ErrorKind::Seek,
            FlacError::Io(_) => ErrorKind::Io,
        }
    }
}
