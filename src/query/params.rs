use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep input order
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    /// Most recent first
    DateDesc,
    DateAsc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortKey::PriceDesc | SortKey::DateDesc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    /// `""` and `"none"` both mean no sort; anything unrecognised is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "date_desc" => Ok(SortKey::DateDesc),
            "date_asc" => Ok(SortKey::DateAsc),
            other => Err(QueryError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Search, sort and paging parameters for the listing query engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Case-insensitive substring matched against the listing name
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub sort_key: SortKey,
    /// Number of matching listings to skip
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of listings to return
    #[serde(default)]
    pub limit: Option<usize>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn page(mut self, offset: usize, limit: Option<usize>) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Parse the raw strings a search box and sort dropdown hand over
    pub fn from_raw(search: Option<&str>, sort: Option<&str>) -> Result<Self, QueryError> {
        let sort_key = match sort {
            Some(raw) => raw.parse()?,
            None => SortKey::None,
        };
        Ok(Self {
            search_term: search.map(str::to_string),
            sort_key,
            ..Self::default()
        })
    }

    /// Lower-cased needle, or `None` when the term matches everything
    pub(crate) fn needle(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}
