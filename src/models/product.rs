use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A product as extracted from a single page.
///
/// Fields the page did not provide stay at their empty defaults: `image` and
/// `name` are empty strings and `amount` is `None`, which serializes as `""`.
/// `currency` is omitted from the JSON output when the domain is unmapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedProduct {
    pub image: String,
    pub name: String,
    #[serde(serialize_with = "serialize_amount")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub shop: String,
    pub url: String,
}

impl ScrapedProduct {
    /// Record with every content field empty.
    pub fn empty(url: &str, currency: Option<String>, shop: &str) -> Self {
        Self {
            image: String::new(),
            name: String::new(),
            amount: None,
            currency,
            shop: shop.to_string(),
            url: url.to_string(),
        }
    }
}

fn serialize_amount<S>(amount: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount.and_then(|a| a.to_f64()) {
        Some(value) => serializer.serialize_f64(value),
        None => serializer.serialize_str(""),
    }
}
