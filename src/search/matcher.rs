use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// Case-insensitive query, compiled once per search.
#[derive(Debug, Clone)]
pub enum QueryMatcher {
    Substring(String),
    Regex(Regex),
}

impl QueryMatcher {
    pub fn new(query: &str, use_regex: bool) -> Result<Self> {
        if use_regex {
            let regex = RegexBuilder::new(query)
                .case_insensitive(true)
                .build()
                .map_err(|source| Error::InvalidRegex {
                    pattern: query.to_string(),
                    source,
                })?;
            Ok(Self::Regex(regex))
        } else {
            Ok(Self::Substring(query.to_lowercase()))
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(text),
        }
    }
}
