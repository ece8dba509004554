use rust_decimal::Decimal;
use shopwatch::{
    config::ScraperConfig,
    services::{ProductScraper, ReqwestPageFetcher, ScrapeError},
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <div class="prd_shortInfo__text"><h1>Kühlschrank KG39</h1></div>
    <span id="normalPriceAmount">1.099,00 €</span>
    <img id="prd_mainProductImage" src="https://i.otto.de/i/otto/kg39.jpg">
  </body>
</html>"#;

fn scraper() -> ProductScraper {
    let mut config = ScraperConfig::otto().unwrap();
    // IP hosts never map to a currency, so tests address the mock server by name
    config.currencies.insert("localhost".to_string(), "EUR".to_string());
    ProductScraper::new(
        Arc::new(config),
        Arc::new(ReqwestPageFetcher::with_timeout(Duration::from_secs(2))),
    )
}

fn local_url(server: &MockServer, route: &str) -> String {
    format!("http://localhost:{}{}", server.address().port(), route)
}

#[tokio::test]
async fn test_scrape_regular_price_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p/kg39"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = local_url(&mock_server, "/p/kg39");
    let product = scraper().scrape(&url).await.unwrap();

    assert_eq!(product.name, "Kühlschrank KG39");
    assert_eq!(product.amount, Some(Decimal::from_str("1099").unwrap()));
    assert_eq!(product.currency.as_deref(), Some("EUR"));
    assert_eq!(product.image, "https://i.otto.de/i/otto/kg39.jpg");
    assert_eq!(product.shop, "Otto");
    assert_eq!(product.url, url);
}

#[tokio::test]
async fn test_scrape_non_200_yields_empty_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/p/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string(PRODUCT_PAGE))
        .mount(&mock_server)
        .await;

    let url = local_url(&mock_server, "/p/gone");
    let scraper = scraper();

    let result = scraper.scrape(&url).await;
    assert!(matches!(result, Err(ScrapeError::UnexpectedStatus(404))));

    let product = scraper.scrape_or_empty(&url).await;
    assert_eq!(product.image, "");
    assert_eq!(product.name, "");
    assert_eq!(product.amount, None);
    assert_eq!(product.currency.as_deref(), Some("EUR"));
    assert_eq!(product.shop, "Otto");
    assert_eq!(product.url, url);

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["amount"], "");
}

#[tokio::test]
async fn test_scrape_connection_error_yields_empty_record() {
    // Reserve a port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let url = format!("http://127.0.0.1:{}/p/1", port);

    let scraper = scraper();

    let result = scraper.scrape(&url).await;
    assert!(matches!(result, Err(ScrapeError::Fetch(_))));

    let product = scraper.scrape_or_empty(&url).await;
    assert_eq!(product.image, "");
    assert_eq!(product.name, "");
    assert_eq!(product.amount, None);
    assert_eq!(product.shop, "Otto");
    assert_eq!(product.url, url);
}

#[tokio::test]
async fn test_scrape_unmapped_domain_has_no_currency() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .mount(&mock_server)
        .await;

    let url = format!("{}/p/kg39", mock_server.uri());
    let product = scraper().scrape(&url).await.unwrap();

    assert_eq!(product.currency, None);
    // Without a currency the dot-decimal format applies
    assert_eq!(product.amount, Some(Decimal::from_str("1.099").unwrap()));
    assert!(serde_json::to_value(&product).unwrap().get("currency").is_none());
}
