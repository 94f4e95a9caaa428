//! Loading the raw JSON price list into a [`PriceCatalog`].
//!
//! The engine never performs I/O; this module is the collaborator that
//! turns the price document (a local file or a hosted JSON endpoint) into
//! the immutable catalog handed to the domain layer at startup.

use std::io;
use std::path::Path;

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::PriceCatalog;

const USER_AGENT: &str = "hosting-margin-planner/0.1.0";

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed price list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a price-list document held in memory.
pub fn parse_catalog(json: &str) -> Result<PriceCatalog, CatalogSourceError> {
    let catalog: PriceCatalog = serde_json::from_str(json)?;
    if catalog.domain_options().is_empty() {
        warn!("price list carries no domain extensions; domain costs cannot resolve");
    }
    Ok(catalog)
}

/// Reads and parses a price-list file (the original ships as
/// `pengeluaran.json` next to the dashboard).
pub fn load_catalog(path: impl AsRef<Path>) -> Result<PriceCatalog, CatalogSourceError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&raw)?;
    debug!(
        path = %path.display(),
        categories = catalog.categories().count(),
        domains = catalog.domain_options().len(),
        "price catalog loaded"
    );
    Ok(catalog)
}

/// Fetches the price list from a hosted JSON document.
#[derive(Clone)]
pub struct CatalogSource {
    http: Client,
    url: Url,
}

impl CatalogSource {
    pub fn new(url: &str) -> Result<Self, CatalogSourceError> {
        let url = Url::parse(url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, url })
    }

    pub async fn fetch(&self) -> Result<PriceCatalog, CatalogSourceError> {
        let raw = self
            .http
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let catalog = parse_catalog(&raw)?;
        debug!(
            url = %self.url,
            categories = catalog.categories().count(),
            "price catalog fetched"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_catalog("{\"harga_web_hosting\": 42}").unwrap_err();
        assert!(matches!(err, CatalogSourceError::Parse(_)));
    }

    #[test]
    fn empty_document_yields_an_empty_catalog() {
        let catalog = parse_catalog("{}").unwrap();
        assert_eq!(catalog.categories().count(), 0);
        assert!(catalog.domain_options().is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_catalog("/nonexistent/pengeluaran.json").unwrap_err();
        assert!(matches!(err, CatalogSourceError::Io(_)));
    }

    #[test]
    fn bad_url_is_rejected_up_front() {
        assert!(matches!(
            CatalogSource::new("not a url"),
            Err(CatalogSourceError::InvalidUrl(_))
        ));
    }
}
