//! Paid / non-paid classification of report rows.

use serde::{Deserialize, Serialize};

use crate::models::PaidStatus;

/// Keywords marking a medium as paid advertising.
pub const DEFAULT_PAID_KEYWORDS: [&str; 4] = ["cpc", "paid", "shopping", "summersale"];

/// Lower-cased substrings that mark a medium as paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidKeywords(Vec<String>);

impl PaidKeywords {
    /// Build a keyword set; entries are trimmed and lower-cased, blanks dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated list (`"cpc, paid"`).
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Whether `medium` contains any keyword, ignoring case.
    pub fn matches(&self, medium: &str) -> bool {
        let medium = medium.to_lowercase();
        self.0.iter().any(|k| medium.contains(k.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PaidKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_PAID_KEYWORDS)
    }
}

/// Classify a row from its two mediums.
///
/// Rows whose mediums are both unreadable are `Unrecognized`; a single
/// paid medium is enough to make the row `Paid`.
pub fn classify(medium1: &str, medium2: &str, keywords: &PaidKeywords) -> PaidStatus {
    let m1 = medium1.to_lowercase();
    let m2 = medium2.to_lowercase();

    if m1 == "unrecognized" && m2 == "unrecognized" {
        PaidStatus::Unrecognized
    } else if keywords.matches(&m1) || keywords.matches(&m2) {
        PaidStatus::Paid
    } else {
        PaidStatus::NonPaid
    }
}
