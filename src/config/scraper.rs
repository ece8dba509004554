use super::ConfigError;
use scraper::Selector;
use std::collections::HashMap;
use std::env;

/// CSS selectors for the fields extracted from a product page.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Container whose `h1` children hold the product name.
    pub name_container: Selector,
    pub reduced_price: Selector,
    pub regular_price: Selector,
    pub image: Selector,
}

impl Selectors {
    pub fn parse(
        name_container: &str,
        reduced_price: &str,
        regular_price: &str,
        image: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            name_container: parse_selector("name", name_container)?,
            reduced_price: parse_selector("reduced_price", reduced_price)?,
            regular_price: parse_selector("regular_price", regular_price)?,
            image: parse_selector("image", image)?,
        })
    }
}

/// Immutable scraper settings, injected at construction time.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub shop: String,
    /// Lowercase top-level domain to ISO currency code.
    pub currencies: HashMap<String, String>,
    pub selectors: Selectors,
    pub image_attribute: String,
}

impl ScraperConfig {
    /// Settings for otto.de product pages.
    pub fn otto() -> Result<Self, ConfigError> {
        Ok(Self {
            shop: "Otto".to_string(),
            currencies: HashMap::from([("de".to_string(), "EUR".to_string())]),
            selectors: Selectors::parse(
                ".prd_shortInfo__text",
                "#reducedPriceAmount",
                "#normalPriceAmount",
                "#prd_mainProductImage",
            )?,
            image_attribute: "src".to_string(),
        })
    }

    /// The Otto defaults, adjusted by `SCRAPER_SHOP` and `SCRAPER_CURRENCIES`
    /// (comma separated `tld=CODE` pairs, added to the default mapping).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::otto()?;

        if let Ok(shop) = env::var("SCRAPER_SHOP") {
            if !shop.trim().is_empty() {
                config.shop = shop.trim().to_string();
            }
        }

        if let Ok(mapping) = env::var("SCRAPER_CURRENCIES") {
            config.currencies.extend(parse_currency_mapping(&mapping)?);
        }

        Ok(config)
    }

    pub fn currency_for_tld(&self, tld: &str) -> Option<&str> {
        self.currencies
            .get(&tld.to_ascii_lowercase())
            .map(String::as_str)
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// Keys are domain suffixes of one or two labels (`de`, `co.uk`); a longer
/// suffix never matches.
fn parse_currency_mapping(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (tld, code) = pair.split_once('=').ok_or_else(|| ConfigError::Invalid {
                name: "SCRAPER_CURRENCIES",
                value: pair.to_string(),
            })?;
            let (tld, code) = (tld.trim(), code.trim());
            if tld.is_empty() || code.is_empty() {
                return Err(ConfigError::Invalid {
                    name: "SCRAPER_CURRENCIES",
                    value: pair.to_string(),
                });
            }
            Ok((
                tld.trim_start_matches('.').to_ascii_lowercase(),
                code.to_ascii_uppercase(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_otto_defaults() {
        let config = ScraperConfig::otto().unwrap();

        assert_eq!(config.shop, "Otto");
        assert_eq!(config.currency_for_tld("de"), Some("EUR"));
        assert_eq!(config.currency_for_tld("DE"), Some("EUR"));
        assert_eq!(config.currency_for_tld("com"), None);
        assert_eq!(config.image_attribute, "src");
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let result = Selectors::parse("h1", "##", "#price", "img");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSelector { field: "reduced_price", .. })
        ));
    }

    #[test]
    fn test_parse_currency_mapping() {
        let mapping = parse_currency_mapping(" at=eur, .ch = CHF ,").unwrap();
        assert_eq!(mapping.get("at").map(String::as_str), Some("EUR"));
        assert_eq!(mapping.get("ch").map(String::as_str), Some("CHF"));

        assert!(parse_currency_mapping("at").is_err());
        assert!(parse_currency_mapping("=EUR").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_extends_defaults() {
        env::set_var("SCRAPER_CURRENCIES", "at=EUR");
        env::set_var("SCRAPER_SHOP", "Otto AT");

        let config = ScraperConfig::from_env().unwrap();
        assert_eq!(config.shop, "Otto AT");
        assert_eq!(config.currency_for_tld("at"), Some("EUR"));
        assert_eq!(config.currency_for_tld("de"), Some("EUR"));

        env::remove_var("SCRAPER_CURRENCIES");
        env::remove_var("SCRAPER_SHOP");
    }
}
