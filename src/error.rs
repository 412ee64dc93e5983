/// Failure talking to the market-data API.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Connection failure, timeout, or an unreadable response body.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CoinGeckoError {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<reqwest::Error> for CoinGeckoError {
    fn from(err: reqwest::Error) -> Self {
        CoinGeckoError::Remote(RemoteError::Transport(err))
    }
}

impl CoinGeckoError {
    /// True for transport failures and non-2xx responses.
    pub fn is_remote(&self) -> bool {
        matches!(self, CoinGeckoError::Remote(_))
    }

    /// True when a response did not have the expected shape.
    pub fn is_schema(&self) -> bool {
        matches!(self, CoinGeckoError::Schema(_))
    }
}

pub type Result<T> = std::result::Result<T, CoinGeckoError>;
