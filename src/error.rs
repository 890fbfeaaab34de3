use thiserror::Error;

/// Codec catalog and negotiation error type
///
/// Negotiation itself never fails: an unsupported MIME type or a host without
/// a usable encoder is reported through `bool`/`Option`. Errors are reserved
/// for defects in the catalog and invalid configuration.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Duplicate codec identifier in catalog: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid codec catalog entry [{identifier}]: {reason}")]
    InvalidCatalog { identifier: String, reason: String },

    #[error("Unknown codec: {0}")]
    UnknownCodec(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
