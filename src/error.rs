use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred while rendering into memory
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    /// None of the candidate font families could be loaded with full script coverage.
    /// Rendering cannot start without a body font.
    #[error("no usable font family ({tried}): {reason}")]
    FontUnavailable { tried: String, reason: String },

    /// The finished document could not be written to its destination
    #[error("failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A block that can't be rendered where it appears in the document
    #[error("unsupported {block} block: {reason}")]
    BlockUnsupported { block: &'static str, reason: String },

    /// The flow configuration leaves no room to lay anything out
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    /// The title page content runs past the bottom margin
    #[error("title page content overflows the page")]
    TitlePageOverflow,

    /// A page id in the page order has no page behind it
    #[error("page missing from document")]
    PageMissing,
}
