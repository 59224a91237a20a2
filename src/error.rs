use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A template or schema could not be deserialised
    Template(#[from] serde_json::Error),

    #[error("font set is empty")]
    /// Rendering text requires at least one font
    NoFonts,

    #[error("font set must flag exactly one fallback font, found {0}")]
    /// The font set does not flag exactly one font as the fallback
    FallbackFont(usize),

    #[error("font `{0}` has not been embedded into the document")]
    /// A font resolved from the font set has no embedded counterpart in the document
    FontNotEmbedded(String),

    #[error("`{0}` is not a valid hex colour")]
    /// A colour string could not be parsed as `#rgb` or `#rrggbb`
    InvalidColour(String),

    #[error("font `{0}` is loaded from `{1}`, which must be fetched with the `remote-fonts` feature")]
    /// A font points at a URL, which can only be loaded by fetching it
    RemoteFontsDisabled(String, String),

    #[cfg(feature = "remote-fonts")]
    #[error(transparent)]
    /// Fetching a remote font failed
    Fetch(#[from] reqwest::Error),

    #[error("the page order refers to a page that no longer exists")]
    /// A page was removed from the arena but is still listed in the page order
    PageMissing,
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
