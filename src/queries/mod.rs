//! Query modules for the CoinGecko client.
//!
//! Each module provides a query struct that borrows from a
//! [`CoinGeckoClient`](crate::CoinGeckoClient), issues one request per call
//! through its [`Transport`](crate::transport::Transport), and decodes the
//! response into typed records.

mod fields;
pub mod history;
pub mod markets;

pub use history::CoinHistoryQuery;
pub use markets::RankedCoinsQuery;
