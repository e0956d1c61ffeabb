use crate::config::{MonthEntry, DEFAULT_TARGET_MONTHS};

/// One target month with its tokens split by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMonth {
    /// Canonical identifier, e.g. "janvier"
    pub id: String,

    /// Month codes matched against dated path segments ("01", "1")
    pub numeric_codes: Vec<String>,

    /// Lowercased names matched as plain substrings ("janvier", "january")
    pub names: Vec<String>,
}

impl TargetMonth {
    /// Builds a month from raw tokens; all-digit tokens become month codes
    pub fn new<I, S>(id: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut numeric_codes = Vec::new();
        let mut names = Vec::new();

        for token in tokens {
            let token = token.as_ref().trim();
            if token.chars().all(|c| c.is_ascii_digit()) {
                numeric_codes.push(token.to_string());
            } else {
                names.push(token.to_lowercase());
            }
        }

        Self {
            id: id.to_string(),
            numeric_codes,
            names,
        }
    }
}

/// Ordered table of target months
///
/// The order is the enumeration order used to break ties when a URL matches
/// several months. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpec {
    months: Vec<TargetMonth>,
}

impl MonthSpec {
    /// Builds the table from configuration entries, keeping their order
    pub fn from_entries(entries: &[MonthEntry]) -> Self {
        Self {
            months: entries
                .iter()
                .map(|entry| TargetMonth::new(&entry.id, &entry.tokens))
                .collect(),
        }
    }

    /// Months in enumeration order
    pub fn months(&self) -> &[TargetMonth] {
        &self.months
    }

    /// Month identifiers in enumeration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.months.iter().map(|m| m.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl Default for MonthSpec {
    /// January, February, March, November and December, in French and English
    fn default() -> Self {
        Self {
            months: DEFAULT_TARGET_MONTHS
                .iter()
                .map(|(id, tokens)| TargetMonth::new(id, tokens.iter()))
                .collect(),
        }
    }
}
