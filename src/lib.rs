//! Daily price history for the top cryptocurrencies, from the CoinGecko API.
//!
//! Two stateless queries hang off a [`CoinGeckoClient`]:
//! [`markets()`](CoinGeckoClient::markets) lists the top coins by market cap and
//! [`history()`](CoinGeckoClient::history) fetches one coin's daily prices.
//! The [`pipeline`] module composes them into one CSV export.
//!
//! # Quick start
//!
//! ```no_run
//! use crypto_daily_prices::{CoinGeckoClient, DayRange};
//!
//! let client = CoinGeckoClient::builder().build().unwrap();
//!
//! let top = client.markets().top(10, "usd").unwrap();
//! let btc = client.history().fetch(&top[0].id, "usd", DayRange::Max).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod queries;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncCoinGeckoClient;
pub use error::{CoinGeckoError, RemoteError, Result};
pub use models::{CoinSummary, DateBasis, DayRange, PricePoint, PriceTable};
pub use transport::{HttpTransport, Transport};

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CoinGeckoClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CoinGeckoClient`].
///
/// Use [`CoinGeckoClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CoinGeckoClientBuilder::build).
pub struct CoinGeckoClientBuilder {
    base_url: String,
    timeout: Duration,
    date_basis: DateBasis,
    transport: Option<Box<dyn Transport>>,
}

impl Default for CoinGeckoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            date_basis: DateBasis::default(),
            transport: None,
        }
    }
}

impl CoinGeckoClientBuilder {
    /// Point the client at a different API root (e.g. a mirror or proxy).
    ///
    /// Ignored when a custom [`transport`](Self::transport) is supplied.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set the HTTP request timeout. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose how sample timestamps are truncated to calendar dates.
    ///
    /// Defaults to [`DateBasis::Utc`].
    pub fn date_basis(mut self, basis: DateBasis) -> Self {
        self.date_basis = basis;
        self
    }

    /// Use a custom [`Transport`] instead of the HTTP one.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the client. Constructs the HTTP client unless a transport was given.
    pub fn build(self) -> Result<CoinGeckoClient> {
        let transport = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&self.base_url, self.timeout)?),
        };
        Ok(CoinGeckoClient {
            transport,
            date_basis: self.date_basis,
        })
    }
}

// ---------------------------------------------------------------------------
// CoinGeckoClient
// ---------------------------------------------------------------------------

/// Entry point for the market-data queries.
///
/// Holds no state between calls besides its configuration; every query
/// method issues exactly one request.
pub struct CoinGeckoClient {
    transport: Box<dyn Transport>,
    date_basis: DateBasis,
}

impl CoinGeckoClient {
    pub fn builder() -> CoinGeckoClientBuilder {
        CoinGeckoClientBuilder::default()
    }

    /// Access the ranked listing query.
    pub fn markets(&self) -> queries::markets::RankedCoinsQuery<'_> {
        queries::markets::RankedCoinsQuery::new(self)
    }

    /// Access the per-coin price history query.
    pub fn history(&self) -> queries::history::CoinHistoryQuery<'_> {
        queries::history::CoinHistoryQuery::new(self)
    }

    /// The transport every query goes through.
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn date_basis(&self) -> DateBasis {
        self.date_basis
    }
}

impl fmt::Display for CoinGeckoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoinGeckoClient(base_url={}, date_basis={})",
            self.transport.base_url(),
            self.date_basis
        )
    }
}
