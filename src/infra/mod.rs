pub mod source;

pub use source::{load_catalog, parse_catalog, CatalogSource, CatalogSourceError};
