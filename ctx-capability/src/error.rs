use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CtxError {
    #[error("Capability string is empty")]
    Empty,

    #[error("Unknown capability namespace \"{0}\"")]
    UnknownNamespace(String),

    #[error("Capability \"{0}\" does not match the CTX-1 grammar")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, CtxError>;
