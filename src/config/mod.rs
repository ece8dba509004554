pub mod scraper;
pub mod server;

pub use scraper::{ScraperConfig, Selectors};
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("Invalid selector for {field}: {selector}")]
    InvalidSelector { field: &'static str, selector: String },
}
