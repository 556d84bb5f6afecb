use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("redirect status {status} from {url} without a Location header")]
    MissingLocation { status: u16, url: String },

    #[error("invalid redirect location \"{location}\": {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("too many redirects: exceeded {max_hops} hops")]
    TooManyRedirects { max_hops: usize },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expansion response did not contain an expanded URL")]
    EmptyExpansion,

    #[error("invalid expansion endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("not a Google Maps short link: {url}")]
    NotShortUrl { url: String },

    #[error("no expansion endpoint configured")]
    NotConfigured,
}

impl ExpandError {
    /// Maps a transport failure, separating timeouts from other HTTP errors.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}
