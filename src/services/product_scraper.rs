//! Single-page product extraction.
//!
//! One GET per call, four selector lookups, one record out. Selectors that do
//! not match leave their field empty; they are never an error.

use crate::config::ScraperConfig;
use crate::models::product::ScrapedProduct;
use crate::services::page_fetcher::{FetchError, PageFetcher};
use crate::services::price_parser::parse_amount;
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use url::{Host, ParseError, Url};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),
}

pub struct ProductScraper {
    config: Arc<ScraperConfig>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ProductScraper {
    pub fn new(config: Arc<ScraperConfig>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Currency inferred from the URL's domain suffix, if mapped.
    ///
    /// A two-label suffix such as `co.uk` is tried before the final label.
    /// URLs without a scheme (`www.otto.de/p/1`) are read as `http`.
    pub fn currency_for(&self, url: &str) -> Option<String> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{url}")).ok()?,
            Err(_) => return None,
        };
        let domain = match parsed.host()? {
            Host::Domain(domain) => domain.trim_end_matches('.').to_ascii_lowercase(),
            Host::Ipv4(_) | Host::Ipv6(_) => return None,
        };

        let labels: Vec<&str> = domain.split('.').collect();
        let two_label = (labels.len() > 2).then(|| labels[labels.len() - 2..].join("."));

        two_label
            .and_then(|suffix| self.config.currency_for_tld(&suffix))
            .or_else(|| self.config.currency_for_tld(labels.last()?))
            .map(str::to_string)
    }

    /// Fetches `url` and extracts the product.
    ///
    /// Transport errors and non-200 responses are returned as errors; use
    /// [`ProductScraper::scrape_or_empty`] to fold them into an empty record.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedProduct, ScrapeError> {
        let currency = self.currency_for(url);
        if currency.is_none() {
            tracing::debug!(url, "No currency mapped for domain");
        }

        let page = self.fetcher.fetch(url).await?;
        if page.status != 200 {
            return Err(ScrapeError::UnexpectedStatus(page.status));
        }

        Ok(self.extract(url, currency, &page.body))
    }

    /// Like [`ProductScraper::scrape`], but any fetch failure yields a record
    /// with `image`, `name` and `amount` empty.
    pub async fn scrape_or_empty(&self, url: &str) -> ScrapedProduct {
        match self.scrape(url).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(url, error = %e, "Scrape failed, emitting empty record");
                ScrapedProduct::empty(url, self.currency_for(url), &self.config.shop)
            }
        }
    }

    /// Extracts a product from an already fetched page body.
    pub fn extract(&self, url: &str, currency: Option<String>, html: &str) -> ScrapedProduct {
        let document = Html::parse_document(html);
        let selectors = &self.config.selectors;
        let mut product = ScrapedProduct::empty(url, currency, &self.config.shop);

        if let Some(container) = last_match(&document, &selectors.name_container) {
            product.name = container
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "h1")
                .flat_map(|h1| h1.text())
                .collect::<String>()
                .trim()
                .to_string();
        }

        let currency = product.currency.as_deref();
        // A reduced price of zero is a placeholder, not a discount
        product.amount = price_at(&document, &selectors.reduced_price, currency)
            .filter(|amount| !amount.is_zero())
            .or_else(|| price_at(&document, &selectors.regular_price, currency));

        if let Some(image) = last_match(&document, &selectors.image) {
            product.image = image
                .value()
                .attr(&self.config.image_attribute)
                .unwrap_or_default()
                .to_string();
        }

        product
    }
}

fn last_match<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).last()
}

fn price_at(document: &Html, selector: &Selector, currency: Option<&str>) -> Option<Decimal> {
    let element = last_match(document, selector)?;
    parse_amount(&element.text().collect::<String>(), currency)
}
