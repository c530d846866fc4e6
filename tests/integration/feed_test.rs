//! Integration tests for the CoinGecko client

use crate::support::{serve, Canned, BITCOIN_ONLY};
use crypto_ticker::feed::{CoinGeckoClient, CoinGeckoConfig, FetchError, PriceSource};
use rust_decimal_macros::dec;
use std::time::Duration;

fn client(base_url: String) -> CoinGeckoClient {
    CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url,
        timeout: Duration::from_secs(5),
        per_page: 25,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_markets_sends_query_and_decodes() {
    let (base_url, server) = serve(vec![Canned::ok(BITCOIN_ONLY)]).await;

    let records = client(base_url).fetch_markets("usd").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "bitcoin");
    assert_eq!(records[0].current_price, Some(dec!(65000)));
    assert_eq!(records[0].market_cap, Some(dec!(1200000000000)));

    let lines = server.await.unwrap();
    let request = &lines[0];
    assert!(request.starts_with("GET /coins/markets?"));
    assert!(request.contains("vs_currency=usd"));
    assert!(request.contains("per_page=25"));
    assert!(request.contains("order=market_cap_desc"));
}

#[tokio::test]
async fn test_fetch_markets_status_error() {
    let (base_url, _server) = serve(vec![Canned::status(429)]).await;

    let result = client(base_url).fetch_markets("usd").await;
    match result {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status, 429);
            assert!(body.contains("unavailable"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_markets_empty_payload() {
    let (base_url, _server) = serve(vec![Canned::ok("[]")]).await;

    let result = client(base_url).fetch_markets("usd").await;
    assert!(matches!(result, Err(FetchError::EmptyPayload)));
}
