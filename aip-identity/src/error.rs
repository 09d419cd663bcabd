use thiserror::Error;

/// Reasons a PEM input could not be turned into a certificate.
///
/// The `Display` text ends up verbatim in the failing `Format` check.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Empty Input")]
    EmptyInput,

    #[error("Invalid PEM: {0}")]
    Pem(String),

    #[error("Unexpected PEM label \"{0}\", expected \"CERTIFICATE\"")]
    UnexpectedLabel(String),

    #[error("Invalid X.509 structure: {0}")]
    Der(String),

    #[error("Timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}

/// Errors building a validation policy from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown AIP extension \"{0}\"")]
    UnknownExtension(String),

    #[error("Maximum lifetime must be at least one minute")]
    ZeroLifetime,
}

pub type Result<T> = std::result::Result<T, DecodeError>;
