use crate::concepts::Operation;

/// Local precondition failures. Always raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing credential: `{0}` must be provided and non-empty")]
    MissingCredential(&'static str),

    #[error("Unsupported operator: {given}, supported operators are {supported}")]
    UnsupportedOperator {
        given: String,
        supported: &'static str,
    },

    #[error("You must provide a valid amount for the transaction.")]
    InvalidAmount,

    #[error("Transaction amount must be at least {minimum} XAF, got {given}")]
    AmountTooLow { given: u64, minimum: u64 },

    #[error("You must provide a valid Intouch partner id.")]
    MissingPartnerId,

    #[error("You must provide a valid phone number 6abcdefgh.")]
    InvalidPhone,

    #[error("You must provide a valid callback url.")]
    InvalidCallback,

    #[error("You must provide an operator for {0} payment.")]
    MissingOperator(Operation),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization/Deserialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Digest authentication error: {0}")]
    DigestAuth(#[from] digest_auth::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
}

impl Error {
    /// The HTTP status of a gateway rejection, if this error carries one.
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            Error::Http(err) => err.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
