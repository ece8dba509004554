pub mod auth_service;
pub mod credential_service;
pub mod page_fetcher;
pub mod password;
pub mod price_parser;
pub mod product_scraper;

pub use auth_service::AuthService;
pub use credential_service::CredentialService;
pub use page_fetcher::{FetchError, PageFetcher, ReqwestPageFetcher};
pub use product_scraper::{ProductScraper, ScrapeError};
