//! Domain logic for reseller profitability lives here.

pub mod capacity;
pub mod catalog;
pub mod evaluation;

pub use capacity::{
    check_capacity, parse_website_limit, try_parse_website_limit, CapacityStatus, WebsiteLimit,
};
pub use catalog::{
    category_label, CatalogError, DomainOption, DomainPricing, PackageDetail, PriceCatalog,
    PricingBlock, ServerPackage, TechRestriction,
};
pub use evaluation::{
    evaluate, BreakEven, CalculationInput, CalculationResult, EvaluationError, FallbackEvent,
    ProfitVerdict, REVENUE_PER_CLIENT,
};
