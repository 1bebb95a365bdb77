use thiserror::Error;

/// Errors raised while building the shared client or running a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpHelperError {
    /// The configured proxy could not be turned into a `reqwest::Proxy`
    #[error("Invalid proxy {url}: {reason}")]
    InvalidProxy { url: String, reason: String },

    /// Failed to build the underlying HTTP client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// The requested charset label is not a known encoding
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Failed to send the request or receive the response head
    #[error("Failed to send request: {0}")]
    Transport(String),

    /// Server answered with anything other than 200
    #[error("HttpClient error status code: {0}")]
    BadStatus(u16),

    /// A GET was redirected more times than allowed
    #[error("Too many redirects: more than {0}")]
    TooManyRedirects(usize),

    /// Failed to read or decode the response body
    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

pub type Result<T, E = HttpHelperError> = std::result::Result<T, E>;
