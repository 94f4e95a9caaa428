//! Profitability evaluation for a package / extension / client-count
//! selection.
//!
//! [`evaluate`] is pure and total for every selection that carries at least
//! one resolvable price: no I/O, no ambient state, identical input yields
//! identical output. The caller owns selection state and passes it in as a
//! [`CalculationInput`] per invocation.

use serde::Serialize;
use thiserror::Error;

use super::capacity::{check_capacity, try_parse_website_limit, CapacityStatus, WebsiteLimit};
use super::catalog::{DomainOption, ServerPackage};

/// Assumed yearly revenue per hosted client, in IDR (Rp 1.000.000 per year).
/// A planning constant, not derived from catalog data.
pub const REVENUE_PER_CLIENT: u64 = 1_000_000;

const MONTHS_PER_YEAR: u64 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The selected package or domain carries no resolvable price for some
    /// year, even after every fallback.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// One evaluation request, assembled by the caller from its current
/// selection.
#[derive(Clone, Copy, Debug)]
pub struct CalculationInput<'a> {
    pub package: &'a ServerPackage,
    pub domain: &'a DomainOption,
    pub client_count: u64,
}

/// Minimum client count at which yearly margin covers the server cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BreakEven {
    Clients(u64),
    /// Per-client margin is zero or negative; no client count pays the
    /// package off.
    Unreachable,
}

/// Tri-state verdict on a signed yearly profit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProfitVerdict {
    Profitable,
    BreakEven,
    Loss,
}

impl ProfitVerdict {
    pub fn from_profit(profit: i64) -> Self {
        match profit {
            p if p > 0 => ProfitVerdict::Profitable,
            0 => ProfitVerdict::BreakEven,
            _ => ProfitVerdict::Loss,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitVerdict::Profitable => "Profitable",
            ProfitVerdict::BreakEven => "Break even",
            ProfitVerdict::Loss => "Loss",
        }
    }
}

/// Silent-but-observable policy decisions taken during an evaluation.
/// These are not errors; they let callers (and tests) see which fallbacks
/// fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FallbackEvent {
    /// No renewal price resolved; year-2 server cost assumed the year-1
    /// cost.
    RenewalAssumedFirstYear,
    /// The website-limit descriptor was absent or unparseable; the limit
    /// defaulted to a single website.
    CapacityDefaulted,
}

/// Everything the dashboard renders for one selection. Never cached;
/// recomputed on every input change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    pub revenue: u64,
    pub server_cost_year1: u64,
    pub server_cost_year2: u64,
    pub domain_cost_year1: u64,
    pub domain_cost_year2: u64,
    pub expense_year1: u64,
    pub expense_year2: u64,
    pub profit_year1: i64,
    pub profit_year2: i64,
    pub verdict_year1: ProfitVerdict,
    pub verdict_year2: ProfitVerdict,
    pub bep_year1: BreakEven,
    pub bep_year2: BreakEven,
    pub capacity: WebsiteLimit,
    pub capacity_status: CapacityStatus,
    pub capacity_warning: Option<String>,
    /// Performance note and platform restrictions, assembled for a warning
    /// panel. `None` means the caller shows no panel.
    pub advisory: Option<String>,
    /// Surfaced verbatim when the renewal fallback fired and the package
    /// carries a free-text renewal estimate, so the caller can mark year-2
    /// figures as approximate instead of silently equal.
    pub renewal_caveat: Option<String>,
    pub fallbacks: Vec<FallbackEvent>,
}

pub fn evaluate(input: CalculationInput<'_>) -> Result<CalculationResult, EvaluationError> {
    let CalculationInput {
        package,
        domain,
        client_count,
    } = input;
    let mut fallbacks = Vec::new();

    let revenue = client_count * REVENUE_PER_CLIENT;

    let (domain_cost_year1, domain_cost_year2) = resolve_domain_costs(domain)?;
    let (server_cost_year1, server_cost_year2) = resolve_server_costs(package, &mut fallbacks)?;

    let expense_year1 = server_cost_year1 + client_count * domain_cost_year1;
    let expense_year2 = server_cost_year2 + client_count * domain_cost_year2;
    let profit_year1 = revenue as i64 - expense_year1 as i64;
    let profit_year2 = revenue as i64 - expense_year2 as i64;

    let capacity = match package.detail.website.as_deref() {
        Some(descriptor) => match try_parse_website_limit(descriptor) {
            Some(limit) => limit,
            None => {
                fallbacks.push(FallbackEvent::CapacityDefaulted);
                WebsiteLimit::Limited(1)
            }
        },
        None => {
            fallbacks.push(FallbackEvent::CapacityDefaulted);
            WebsiteLimit::Limited(1)
        }
    };
    let capacity_status = check_capacity(capacity, client_count);
    let capacity_warning = capacity_warning(&capacity_status);

    let renewal_caveat = fallbacks
        .contains(&FallbackEvent::RenewalAssumedFirstYear)
        .then(|| package.pricing.renewal_caveat.clone())
        .flatten();

    Ok(CalculationResult {
        revenue,
        server_cost_year1,
        server_cost_year2,
        domain_cost_year1,
        domain_cost_year2,
        expense_year1,
        expense_year2,
        profit_year1,
        profit_year2,
        verdict_year1: ProfitVerdict::from_profit(profit_year1),
        verdict_year2: ProfitVerdict::from_profit(profit_year2),
        bep_year1: break_even(server_cost_year1, domain_cost_year1),
        bep_year2: break_even(server_cost_year2, domain_cost_year2),
        capacity,
        capacity_status,
        capacity_warning,
        advisory: assemble_advisory(package),
        renewal_caveat,
        fallbacks,
    })
}

/// Each year substitutes the other's price when its own is missing; a
/// domain option must supply at least one.
fn resolve_domain_costs(domain: &DomainOption) -> Result<(u64, u64), EvaluationError> {
    let first_year = domain.pricing.first_year.or(domain.pricing.renewal);
    let renewal = domain.pricing.renewal.or(domain.pricing.first_year);
    match (first_year, renewal) {
        (Some(first_year), Some(renewal)) => Ok((first_year, renewal)),
        _ => Err(EvaluationError::InvalidInput(format!(
            "domain '{}' carries no price for any year",
            domain.extension
        ))),
    }
}

/// First positive candidate wins. Zeroes count as missing, so a listed
/// `renewal_total: 0` falls through to the next candidate.
fn resolve_yearly(candidates: impl IntoIterator<Item = Option<u64>>) -> Option<u64> {
    candidates.into_iter().flatten().find(|cost| *cost > 0)
}

fn resolve_server_costs(
    package: &ServerPackage,
    fallbacks: &mut Vec<FallbackEvent>,
) -> Result<(u64, u64), EvaluationError> {
    let pricing = &package.pricing;

    // Candidate order is the pricing contract: explicit first-year total,
    // promo-derived, then the renewal figures as a conservative stand-in.
    let year1 = resolve_yearly([
        pricing.first_year_total,
        pricing.promo_monthly.map(|monthly| monthly * MONTHS_PER_YEAR),
        pricing.renewal_total,
        pricing
            .renewal_monthly
            .map(|monthly| monthly * MONTHS_PER_YEAR),
    ])
    .ok_or_else(|| {
        EvaluationError::InvalidInput(format!(
            "package '{}' has no resolvable first-year price",
            package.name
        ))
    })?;

    let year2 = match resolve_yearly([
        pricing.renewal_total,
        pricing
            .renewal_monthly
            .map(|monthly| monthly * MONTHS_PER_YEAR),
    ]) {
        Some(cost) => cost,
        None => {
            // A package is never modeled as costing nothing after year one.
            fallbacks.push(FallbackEvent::RenewalAssumedFirstYear);
            year1
        }
    };

    Ok((year1, year2))
}

fn break_even(server_cost: u64, domain_cost: u64) -> BreakEven {
    if domain_cost >= REVENUE_PER_CLIENT {
        return BreakEven::Unreachable;
    }
    let margin_per_client = REVENUE_PER_CLIENT - domain_cost;
    BreakEven::Clients(server_cost.div_ceil(margin_per_client))
}

fn capacity_warning(status: &CapacityStatus) -> Option<String> {
    match status {
        CapacityStatus::Exceeded {
            used,
            limit,
            required_packages,
        } => Some(format!(
            "This package supports at most {limit} websites; hosting {used} clients needs {required_packages} of it."
        )),
        _ => None,
    }
}

fn assemble_advisory(package: &ServerPackage) -> Option<String> {
    let mut sections = Vec::new();

    if let Some(note) = &package.performance_note {
        sections.push(note.clone());
    }

    let restriction = package
        .tech_restriction
        .as_ref()
        .filter(|restriction| restriction.platform.to_lowercase().contains("wordpress"));
    if let Some(restriction) = restriction {
        let mut lines = vec![format!("{} restrictions:", restriction.platform)];
        for drawback in &restriction.drawbacks {
            lines.push(format!("- {drawback}"));
        }
        if let Some(caveat) = &restriction.customization_caveat {
            lines.push(caveat.clone());
        }
        sections.push(lines.join("\n"));
    }

    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n\n"))
    }
}
