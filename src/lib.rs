//! Profitability planner core for hosting resellers.
//!
//! Given a price catalog of server packages and domain extensions, the
//! domain layer computes yearly revenue, first-year vs. renewal-year
//! expenses, net profit, break-even client counts and website-capacity
//! feasibility for a chosen package / extension / client-count selection.
//!
//! The engine is pure: callers (a dashboard, a CLI, a test) assemble a
//! [`CalculationInput`] from their current selection and render the
//! returned [`CalculationResult`] verbatim. Loading the raw JSON price
//! list lives in [`infra`], everything it produces is immutable.

pub mod domain;
pub mod infra;

pub use domain::{
    evaluate, parse_website_limit, BreakEven, CalculationInput, CalculationResult, CapacityStatus,
    CatalogError, DomainOption, EvaluationError, FallbackEvent, PriceCatalog, ProfitVerdict,
    ServerPackage, WebsiteLimit, REVENUE_PER_CLIENT,
};
pub use infra::source::{load_catalog, parse_catalog, CatalogSource, CatalogSourceError};
