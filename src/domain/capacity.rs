//! Website-capacity parsing and feasibility checks.
//!
//! Providers advertise the site limit of a plan as free text ("Unlimited",
//! "5 Website", "1 Domain"). Parsing is isolated here so the display layer
//! can preview capacity without running a full evaluation.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Advertised website/domain limit of a server package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum WebsiteLimit {
    Unbounded,
    Limited(u64),
}

impl fmt::Display for WebsiteLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebsiteLimit::Unbounded => f.write_str("Unlimited"),
            WebsiteLimit::Limited(count) => write!(f, "{count} Website"),
        }
    }
}

/// Capacity verdict for a client count against a package limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CapacityStatus {
    /// Unlimited plans are never flagged.
    Unbounded,
    Within {
        used: u64,
        limit: u64,
    },
    Exceeded {
        used: u64,
        limit: u64,
        /// How many instances of this package would cover `used` sites.
        required_packages: u64,
    },
}

fn limit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(website|domain)").expect("capacity pattern compiles")
    })
}

/// Parses a limit descriptor, defaulting to a single website when nothing
/// recognizable is found.
pub fn parse_website_limit(descriptor: &str) -> WebsiteLimit {
    try_parse_website_limit(descriptor).unwrap_or(WebsiteLimit::Limited(1))
}

/// Strict variant of [`parse_website_limit`]: `None` when the descriptor is
/// empty or carries no recognizable limit, so callers can observe that the
/// default kicked in.
pub fn try_parse_website_limit(descriptor: &str) -> Option<WebsiteLimit> {
    let text = descriptor.trim();
    if text.is_empty() {
        return None;
    }
    if text.to_lowercase().contains("unlimited") {
        return Some(WebsiteLimit::Unbounded);
    }
    let captures = limit_pattern().captures(text)?;
    let count: u64 = captures[1].parse().ok()?;
    // "0 Website" is as good as unparseable.
    (count > 0).then_some(WebsiteLimit::Limited(count))
}

pub fn check_capacity(limit: WebsiteLimit, clients: u64) -> CapacityStatus {
    match limit {
        WebsiteLimit::Unbounded => CapacityStatus::Unbounded,
        WebsiteLimit::Limited(max) if clients > max => CapacityStatus::Exceeded {
            used: clients,
            limit: max,
            required_packages: clients.div_ceil(max),
        },
        WebsiteLimit::Limited(max) => CapacityStatus::Within {
            used: clients,
            limit: max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_in_any_casing() {
        assert_eq!(
            parse_website_limit("Unlimited Website"),
            WebsiteLimit::Unbounded
        );
        assert_eq!(parse_website_limit("UNLIMITED"), WebsiteLimit::Unbounded);
        assert_eq!(
            parse_website_limit("unlimited domain"),
            WebsiteLimit::Unbounded
        );
    }

    #[test]
    fn counted_limits() {
        assert_eq!(parse_website_limit("5 Website"), WebsiteLimit::Limited(5));
        assert_eq!(parse_website_limit("1 Domain"), WebsiteLimit::Limited(1));
        assert_eq!(parse_website_limit("10website"), WebsiteLimit::Limited(10));
        assert_eq!(
            parse_website_limit("Up to 3 Websites"),
            WebsiteLimit::Limited(3)
        );
    }

    #[test]
    fn defaults_to_one() {
        assert_eq!(parse_website_limit(""), WebsiteLimit::Limited(1));
        assert_eq!(parse_website_limit("   "), WebsiteLimit::Limited(1));
        assert_eq!(parse_website_limit("2 GB NVMe"), WebsiteLimit::Limited(1));
        assert_eq!(parse_website_limit("0 Website"), WebsiteLimit::Limited(1));
    }

    #[test]
    fn strict_parse_reports_the_default() {
        assert_eq!(try_parse_website_limit(""), None);
        assert_eq!(try_parse_website_limit("Fast SSD"), None);
        assert_eq!(
            try_parse_website_limit("5 Website"),
            Some(WebsiteLimit::Limited(5))
        );
    }

    #[test]
    fn exceeded_capacity_counts_required_packages() {
        assert_eq!(
            check_capacity(WebsiteLimit::Limited(2), 5),
            CapacityStatus::Exceeded {
                used: 5,
                limit: 2,
                required_packages: 3
            }
        );
    }

    #[test]
    fn within_and_unbounded_are_never_flagged() {
        assert_eq!(
            check_capacity(WebsiteLimit::Limited(5), 5),
            CapacityStatus::Within { used: 5, limit: 5 }
        );
        assert_eq!(
            check_capacity(WebsiteLimit::Unbounded, 1_000_000),
            CapacityStatus::Unbounded
        );
    }
}
