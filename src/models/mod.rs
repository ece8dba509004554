pub mod credential;
pub mod product;

pub use credential::Credential;
pub use product::ScrapedProduct;
