//! Denylist term set
//!
//! Terms are normalised at construction: each line is trimmed and
//! lowercased, and blank lines are dropped. An empty term therefore never
//! exists, so no term can match every message.
//!
//! # Examples
//!
//! ```
//! use domain::Denylist;
//!
//! let denylist = Denylist::from_lines(["Spam", "", "  idiot  ", "spam"]);
//! assert_eq!(denylist.len(), 2);
//! assert!(denylist.terms().any(|t| t == "idiot"));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An order-irrelevant set of lowercase, non-empty forbidden terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Denylist {
    terms: BTreeSet<String>,
}

impl Denylist {
    /// Build a denylist from raw lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = lines
            .into_iter()
            .filter_map(|line| {
                let term = line.as_ref().trim();
                (!term.is_empty()).then(|| term.to_lowercase())
            })
            .collect();
        Self { terms }
    }

    /// Build a denylist from a newline-delimited text blob
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Iterate the normalised terms in sorted order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Number of distinct terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the denylist has no terms
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<String>> for Denylist {
    fn from(lines: Vec<String>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Denylist> for Vec<String> {
    fn from(denylist: Denylist) -> Self {
        denylist.terms.into_iter().collect()
    }
}
