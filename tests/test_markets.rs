//! Ranked listing tests: request shape, decoding, coercion and errors.

mod common;

use std::collections::HashSet;

use common::{client_with, market_entry, market_listing, requests, FakeTransport};
use crypto_daily_prices::CoinGeckoError;
use serde_json::json;

const MARKETS: &str = "/coins/markets";

// ---------------------------------------------------------------------------
// top
// ---------------------------------------------------------------------------

#[test]
fn top_returns_count_rows_with_unique_ids() {
    for count in [1u32, 2, 10, 250] {
        let client = client_with(
            FakeTransport::new().with_json(MARKETS, market_listing(count as usize)),
        );

        let coins = client.markets().top(count, "usd").unwrap();
        assert_eq!(coins.len(), count as usize);

        let ids: HashSet<&str> = coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), coins.len());
    }
}

#[test]
fn top_keeps_market_cap_order() {
    let client = client_with(FakeTransport::new().with_json(MARKETS, market_listing(25)));

    let coins = client.markets().top(25, "usd").unwrap();
    assert!(coins
        .windows(2)
        .all(|w| w[0].market_cap >= w[1].market_cap));
    assert_eq!(coins[0].id, "coin-0");
    assert_eq!(coins[24].id, "coin-24");
}

#[test]
fn top_maps_fields() {
    let body = json!([
        market_entry("bitcoin", "btc", "Bitcoin", 500.0, 10.0),
        market_entry("ethereum", "eth", "Ethereum", 300.0, 5.0),
    ]);
    let client = client_with(FakeTransport::new().with_json(MARKETS, body));

    let coins = client.markets().top(2, "usd").unwrap();
    assert_eq!(coins[0].id, "bitcoin");
    assert_eq!(coins[0].symbol, "btc");
    assert_eq!(coins[0].name, "Bitcoin");
    assert_eq!(coins[0].market_cap, 500.0);
    assert_eq!(coins[0].volume, 10.0);
    assert_eq!(coins[1].id, "ethereum");
    assert_eq!(coins[1].volume, 5.0);
}

#[test]
fn top_sends_single_page_request() {
    let fake = FakeTransport::new().with_json(MARKETS, market_listing(10));
    let log = fake.log();
    let client = client_with(fake);

    client.markets().top(10, "eur").unwrap();

    let reqs = requests(&log);
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].path, MARKETS);
    assert_eq!(reqs[0].param("vs_currency"), Some("eur"));
    assert_eq!(reqs[0].param("order"), Some("market_cap_desc"));
    assert_eq!(reqs[0].param("per_page"), Some("10"));
    assert_eq!(reqs[0].param("page"), Some("1"));
    assert_eq!(reqs[0].param("sparkline"), Some("false"));
}

#[test]
fn top_coerces_numeric_strings() {
    let body = json!([{
        "id": "tether",
        "symbol": "usdt",
        "name": "Tether",
        "market_cap": "83000000000",
        "total_volume": 41000000000u64
    }]);
    let client = client_with(FakeTransport::new().with_json(MARKETS, body));

    let coins = client.markets().top(1, "usd").unwrap();
    assert_eq!(coins[0].market_cap, 83_000_000_000.0);
    assert_eq!(coins[0].volume, 41_000_000_000.0);
}

#[test]
fn top_accepts_empty_listing() {
    let client = client_with(FakeTransport::new().with_json(MARKETS, json!([])));
    assert!(client.markets().top(5, "usd").unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

#[test]
fn missing_market_cap_is_schema_error() {
    let body = json!([
        market_entry("bitcoin", "btc", "Bitcoin", 500.0, 10.0),
        {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "total_volume": 5.0},
    ]);
    let client = client_with(FakeTransport::new().with_json(MARKETS, body));

    let err = client.markets().top(2, "usd").unwrap_err();
    assert!(err.is_schema(), "unexpected error: {err}");
    let msg = err.to_string();
    assert!(msg.contains("market_cap"), "{msg}");
    assert!(msg.contains("ethereum"), "{msg}");
}

#[test]
fn null_volume_is_schema_error() {
    let mut entry = market_entry("bitcoin", "btc", "Bitcoin", 500.0, 10.0);
    entry["total_volume"] = json!(null);
    let client = client_with(FakeTransport::new().with_json(MARKETS, json!([entry])));

    let err = client.markets().top(1, "usd").unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("total_volume"));
}

#[test]
fn non_numeric_market_cap_is_schema_error() {
    let mut entry = market_entry("bitcoin", "btc", "Bitcoin", 500.0, 10.0);
    entry["market_cap"] = json!("lots");
    let client = client_with(FakeTransport::new().with_json(MARKETS, json!([entry])));

    assert!(client.markets().top(1, "usd").unwrap_err().is_schema());
}

#[test]
fn missing_id_is_schema_error() {
    let body = json!([
        {"symbol": "btc", "name": "Bitcoin", "market_cap": 1.0, "total_volume": 1.0}
    ]);
    let client = client_with(FakeTransport::new().with_json(MARKETS, body));

    let err = client.markets().top(1, "usd").unwrap_err();
    assert!(err.is_schema());
    assert!(err.to_string().contains("'id'"));
}

#[test]
fn non_array_body_is_schema_error() {
    let body = json!({"status": {"error_code": 429, "error_message": "rate limited"}});
    let client = client_with(FakeTransport::new().with_json(MARKETS, body));

    assert!(client.markets().top(10, "usd").unwrap_err().is_schema());
}

#[test]
fn non_object_entry_is_schema_error() {
    let client = client_with(FakeTransport::new().with_json(MARKETS, json!(["bitcoin"])));
    assert!(client.markets().top(1, "usd").unwrap_err().is_schema());
}

// ---------------------------------------------------------------------------
// Remote errors and argument validation
// ---------------------------------------------------------------------------

#[test]
fn non_success_status_is_remote_error() {
    let client = client_with(FakeTransport::new().with_status(MARKETS, 503));

    let err = client.markets().top(10, "usd").unwrap_err();
    assert!(err.is_remote());
    assert!(err.to_string().contains("503"));
}

#[test]
fn count_out_of_range_is_rejected_without_request() {
    for count in [0u32, 251, 1000] {
        let fake = FakeTransport::new().with_json(MARKETS, market_listing(1));
        let log = fake.log();
        let client = client_with(fake);

        let err = client.markets().top(count, "usd").unwrap_err();
        assert!(matches!(err, CoinGeckoError::InvalidArgument(_)));
        assert!(requests(&log).is_empty());
    }
}

#[test]
fn empty_quote_currency_is_rejected() {
    let client = client_with(FakeTransport::new().with_json(MARKETS, market_listing(1)));
    let err = client.markets().top(1, " ").unwrap_err();
    assert!(matches!(err, CoinGeckoError::InvalidArgument(_)));
}
