//! Typed view over the hosting price list.
//!
//! The catalog is built once (see [`crate::infra::source`]) and read-only
//! afterwards. Top-level keys of the raw document are server-package
//! categories, except the reserved domain key which holds the
//! domain-extension price list. Category order follows the document and is
//! preserved for display.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Accepted spellings of the reserved domain-price key. The original price
/// list ships with `harga_domain`.
const DOMAIN_KEYS: [&str; 2] = ["domain", "harga_domain"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// One hosting plan as advertised by the provider.
///
/// Serde aliases match the Indonesian field names of the original
/// `pengeluaran.json` document, so that file loads unmodified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerPackage {
    #[serde(alias = "paket")]
    pub name: String,
    #[serde(alias = "harga")]
    pub pricing: PricingBlock,
    #[serde(default)]
    pub detail: PackageDetail,
    /// Free-text performance note shown verbatim in advisories.
    #[serde(default, alias = "info_performa")]
    pub performance_note: Option<String>,
    #[serde(default, alias = "catatan_teknis")]
    pub tech_restriction: Option<TechRestriction>,
}

impl ServerPackage {
    /// One-line dropdown label: package name plus RAM/CPU detail when known.
    pub fn summary(&self) -> String {
        let mut line = self.name.clone();
        if let Some(ram) = &self.detail.ram {
            line.push_str(&format!(" | {ram}"));
        }
        if let Some(cpu) = &self.detail.cpu {
            line.push_str(&format!(" - {cpu}"));
        }
        line
    }
}

/// Yearly and monthly price figures of a package. All amounts are IDR
/// without minor units; any field may be missing in the source document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingBlock {
    #[serde(default, alias = "total_tahun_pertama")]
    pub first_year_total: Option<u64>,
    #[serde(default, alias = "total_tahun_berikutnya")]
    pub renewal_total: Option<u64>,
    #[serde(default, alias = "perpanjangan_bulanan")]
    pub renewal_monthly: Option<u64>,
    #[serde(default, alias = "promo_bulanan")]
    pub promo_monthly: Option<u64>,
    /// Free-text renewal estimate (e.g. "Estimasi ~850rb-1jt") used when no
    /// numeric renewal price is listed.
    #[serde(default, alias = "catatan_perpanjangan")]
    pub renewal_caveat: Option<String>,
}

/// Descriptive attributes of a package. All free text, carried for the
/// display layer; only `website` feeds the capacity check.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDetail {
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub bandwidth: Option<String>,
    /// Website/domain-count limit descriptor, e.g. "Unlimited" or "5 Website".
    #[serde(default)]
    pub website: Option<String>,
}

/// Structured platform-restriction note attached to some managed packages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechRestriction {
    pub platform: String,
    #[serde(default, alias = "kekurangan")]
    pub drawbacks: Vec<String>,
    #[serde(default, alias = "catatan_kustomisasi")]
    pub customization_caveat: Option<String>,
}

/// One domain extension with its first-year and renewal prices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainOption {
    #[serde(alias = "ekstensi")]
    pub extension: String,
    #[serde(alias = "harga")]
    pub pricing: DomainPricing,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainPricing {
    #[serde(default, alias = "tahun_pertama")]
    pub first_year: Option<u64>,
    #[serde(default, alias = "tahun_berikutnya")]
    pub renewal: Option<u64>,
}

/// Immutable price catalog: ordered server-package categories plus the
/// domain-extension list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceCatalog {
    categories: Vec<(String, Vec<ServerPackage>)>,
    domains: Vec<DomainOption>,
}

impl PriceCatalog {
    /// Category identifiers in document order. The reserved domain key is
    /// never listed here.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(key, _)| key.as_str())
    }

    pub fn packages_in(&self, category: &str) -> Result<&[ServerPackage], CatalogError> {
        self.categories
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, packages)| packages.as_slice())
            .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))
    }

    pub fn domain_options(&self) -> &[DomainOption] {
        &self.domains
    }
}

// Custom visitor so category order survives deserialization and the domain
// key is split off instead of showing up as a category.
impl<'de> Deserialize<'de> for PriceCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = PriceCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of package categories plus a domain price list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::new();
                let mut domains = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if DOMAIN_KEYS.contains(&key.as_str()) {
                        domains = map.next_value()?;
                    } else {
                        categories.push((key, map.next_value()?));
                    }
                }
                Ok(PriceCatalog {
                    categories,
                    domains,
                })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Human-readable label for a category key. Known keys get curated names,
/// everything else falls back to a cleaned-up uppercase rendering.
pub fn category_label(key: &str) -> String {
    match key {
        "harga_vps_server" => "VPS Server (KVM)".to_string(),
        "harga_cloud_hosting" => "Cloud Hosting".to_string(),
        "harga_web_hosting" => "Web Hosting (Shared)".to_string(),
        "harga_cpanel_cloud_hosting" => "cPanel Cloud Hosting".to_string(),
        "harga_agency_hosting" => "Agency Hosting".to_string(),
        other => other
            .trim_start_matches("harga_")
            .replace('_', " ")
            .to_uppercase(),
    }
}
