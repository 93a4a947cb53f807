use std::str::Utf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors produced by the track processing pipeline.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Filename extension is not `.gpx` or `.kml`; detected before parsing.
    #[error("unsupported track format: '{0}'")]
    UnsupportedFormat(String),

    /// File content violates the format grammar. Fails fast, no partial result.
    #[error("malformed track file: {0}")]
    MalformedInput(#[from] MalformedInput),

    /// File parsed cleanly but contained zero route points.
    #[error("no route points found in file")]
    EmptyRoute,

    /// Internal invariant violation: empty or degenerate geometry reached the
    /// rendering pipeline. A caller bug, not a user-facing condition.
    #[error("render precondition violated: {0}")]
    RenderPrecondition(&'static str),

    #[error("image encoding failed: {0}")]
    ImageEncode(#[from] image::ImageError),
}

/// Structural causes behind a [`TrackError::MalformedInput`].
#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("invalid coordinate '{value}' in <coordinates>")]
    InvalidCoordinate { value: String },

    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}

impl From<quick_xml::Error> for TrackError {
    fn from(e: quick_xml::Error) -> Self {
        Self::MalformedInput(MalformedInput::Xml(e))
    }
}
