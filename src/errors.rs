use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// Name of the rejected parameter, if this is a validation failure.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument { param, .. } => Some(*param),
            _ => None,
        }
    }
}
