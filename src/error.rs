use std::fmt;

use thiserror::Error;

/// Boxed error used at the collaborator seams (image loading, font
/// registration).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which remote image a load failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Background,
    Avatar,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background"),
            Self::Avatar => f.write_str("avatar"),
        }
    }
}

/// Errors surfaced by the card renderers and the color utilities.
#[derive(Debug, Error)]
pub enum CardError {
    /// A remote image could not be fetched or decoded.
    #[error("error loading the {kind} image ({url}), the URL may be invalid")]
    ImageLoad {
        kind: ImageKind,
        url: String,
        #[source]
        source: BoxError,
    },

    /// A color string did not match any of the supported formats.
    #[error("invalid color format: {0:?}")]
    ColorFormat(String),

    /// The rank card progress values cannot be drawn.
    #[error("required xp must be positive (current: {current_xp}, required: {required_xp})")]
    InvalidProgress { current_xp: u64, required_xp: u64 },

    /// The drawing backend failed.
    #[error("drawing surface error: {0}")]
    Surface(#[from] piet_common::Error),

    /// PNG encoding of the finished card failed.
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}
