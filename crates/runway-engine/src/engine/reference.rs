//! Symbolic references embedded in formulas.
//!
//! Three forms are recognized:
//!
//! - `ROW(category)` - the value of `category` in the current period
//! - `PREV(category)` - the value of `category` in the previous period
//! - `SUM(row_type)` - the sum of every row of `row_type` in the current period
//!
//! ```ignore
//! let r: Reference = "PREV(savings)".parse().unwrap();
//! assert_eq!(r, Reference::Prev("savings".to_string()));
//! assert_eq!(r.to_string(), "PREV(savings)");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Regex matching any reference form.
///
/// Captures:
/// - group 1: form name (`ROW`, `PREV` or `SUM`)
/// - group 2: argument, taken verbatim up to the first `)`
pub fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(ROW|PREV|SUM)\(([^)]+)\)").expect("reference regex must compile")
    })
}

/// A parsed reference.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Reference {
    Row(String),
    Prev(String),
    Sum(String),
}

impl Reference {
    /// Build a reference from a form name and its argument.
    pub fn from_parts(form: &str, arg: &str) -> Option<Reference> {
        match form {
            "ROW" => Some(Reference::Row(arg.to_string())),
            "PREV" => Some(Reference::Prev(arg.to_string())),
            "SUM" => Some(Reference::Sum(arg.to_string())),
            _ => None,
        }
    }

    /// Whether the reference reads values of the period being computed.
    pub fn is_same_period(&self) -> bool {
        !matches!(self, Reference::Prev(_))
    }
}

impl std::str::FromStr for Reference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        reference_re()
            .captures(s)
            .filter(|caps| caps[0].len() == s.len())
            .and_then(|caps| Reference::from_parts(&caps[1], &caps[2]))
            .ok_or_else(|| format!("Invalid reference: {}", s))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Row(c) => write!(f, "ROW({})", c),
            Reference::Prev(c) => write!(f, "PREV({})", c),
            Reference::Sum(t) => write!(f, "SUM({})", t),
        }
    }
}
