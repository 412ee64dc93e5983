use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CoinSummary: One row of the ranked market listing
// ---------------------------------------------------------------------------

/// A coin as listed by the markets endpoint.
///
/// Rows come back in the API's market-cap order; nothing is re-sorted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    /// Stable API identifier (e.g. `"bitcoin"`), distinct from the ticker.
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Market capitalization in the quote currency.
    pub market_cap: f64,
    /// 24h trading volume in the quote currency (`total_volume` on the wire).
    pub volume: f64,
}
