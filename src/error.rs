use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type TransportResult<T> = std::result::Result<T, TransportError>;
pub type TokenReaderResult<T> = std::result::Result<T, TokenReaderError>;

#[derive(Error, Debug)]
pub enum Error {
    /// The provider did not answer `oauth_callback_confirmed=true`.
    #[error("callback not confirmed : {callback}")]
    Callback { callback: String },
    /// The dance was driven out of order, or the provider rejected a step.
    #[error("OAuth dance failed in {phase} : {detail}")]
    Dance { phase: DancePhase, detail: String },
    #[error("unsupported signature method : {0}")]
    UnsupportedSignatureMethod(String),
    #[error("invalid endpoint {endpoint} : {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("token acquisition failed : {0}")]
    TokenReader(#[from] TokenReaderError),
    #[error("request failed : {0}")]
    Transport(#[from] TransportError),
    #[error("credential store failed : {0}")]
    Store(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn dance<T>(phase: DancePhase, detail: T) -> Self
    where
        T: Into<String>,
    {
        Error::Dance {
            phase,
            detail: detail.into(),
        }
    }
}

/// The step of the dance an [`Error::Dance`] was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DancePhase {
    TemporaryCredentials,
    OwnerAuthorization,
    AccessToken,
    SignedRequest,
    Persist,
}

impl fmt::Display for DancePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DancePhase::TemporaryCredentials => "temporary credential request",
            DancePhase::OwnerAuthorization => "owner authorization",
            DancePhase::AccessToken => "access token request",
            DancePhase::SignedRequest => "signed request",
            DancePhase::Persist => "credential persistence",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("malformed request : {0}")]
    Http(#[from] http::Error),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenReaderError {
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
}
