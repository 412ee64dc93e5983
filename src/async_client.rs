//! Async wrapper around [`CoinGeckoClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the event loop free while the
//! blocking HTTP client waits on the network. Operations still run one at a
//! time: the client sits behind a [`Mutex`].
//!
//! # Example
//!
//! ```no_run
//! use crypto_daily_prices::{AsyncCoinGeckoClient, DayRange};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let client = AsyncCoinGeckoClient::builder().build().await.unwrap();
//!
//!     let top = client.top_coins(10, "usd").await.unwrap();
//!     let btc = client.history(&top[0].id, "usd", DayRange::Max).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{CoinGeckoError, Result};
use crate::models::{CoinSummary, DateBasis, DayRange, PricePoint, PriceTable};
use crate::pipeline::{self, RunOptions};
use crate::CoinGeckoClient;

// ---------------------------------------------------------------------------
// AsyncCoinGeckoClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCoinGeckoClient`].
#[derive(Default)]
pub struct AsyncCoinGeckoClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    date_basis: DateBasis,
}

impl AsyncCoinGeckoClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn date_basis(mut self, basis: DateBasis) -> Self {
        self.date_basis = basis;
        self
    }

    /// Build the async client on the blocking pool.
    pub async fn build(self) -> Result<AsyncCoinGeckoClient> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CoinGeckoClient::builder().date_basis(self.date_basis);
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            Ok(AsyncCoinGeckoClient::from_client(builder.build()?))
        })
        .await
        .map_err(|e| CoinGeckoError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCoinGeckoClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`CoinGeckoClient`].
///
/// # Usage
///
/// Use [`run()`](Self::run) to execute any sync client method:
///
/// ```no_run
/// # use crypto_daily_prices::AsyncCoinGeckoClient;
/// # async fn example() -> crypto_daily_prices::Result<()> {
/// let client = AsyncCoinGeckoClient::builder().build().await?;
/// let top = client.run(|c| c.markets().top(5, "eur")).await?;
/// # Ok(())
/// # }
/// ```
pub struct AsyncCoinGeckoClient {
    inner: Arc<Mutex<CoinGeckoClient>>,
}

impl AsyncCoinGeckoClient {
    pub fn builder() -> AsyncCoinGeckoClientBuilder {
        AsyncCoinGeckoClientBuilder::default()
    }

    /// Wrap an already configured client (e.g. one with a custom transport).
    pub fn from_client(client: CoinGeckoClient) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CoinGeckoClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = client
                .lock()
                .map_err(|_| CoinGeckoError::InvalidArgument("client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| CoinGeckoError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Async form of [`RankedCoinsQuery::top`](crate::queries::RankedCoinsQuery::top).
    pub async fn top_coins(&self, count: u32, quote_currency: &str) -> Result<Vec<CoinSummary>> {
        let quote_currency = quote_currency.to_string();
        self.run(move |c| c.markets().top(count, &quote_currency)).await
    }

    /// Async form of [`CoinHistoryQuery::fetch`](crate::queries::CoinHistoryQuery::fetch).
    pub async fn history(
        &self,
        coin_id: &str,
        quote_currency: &str,
        day_range: DayRange,
    ) -> Result<Vec<PricePoint>> {
        let coin_id = coin_id.to_string();
        let quote_currency = quote_currency.to_string();
        self.run(move |c| c.history().fetch(&coin_id, &quote_currency, day_range))
            .await
    }

    /// Async form of [`pipeline::collect`].
    pub async fn collect(&self, opts: RunOptions) -> Result<(Vec<CoinSummary>, PriceTable)> {
        self.run(move |c| pipeline::collect(c, &opts)).await
    }

    /// Drop the client on the blocking pool.
    ///
    /// The HTTP client must not be dropped from inside an async context, so
    /// prefer this over letting the last handle fall out of scope there.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| CoinGeckoError::InvalidArgument(format!("Task join error: {e}")))
    }
}
