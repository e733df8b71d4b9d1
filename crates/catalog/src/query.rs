//! Browse request model and parsing of raw query-string parameters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const SORT_PARAM: &str = "sort";
pub const DIRECTION_PARAM: &str = "direction";
pub const CATEGORY_PARAM: &str = "category";
pub const SEARCH_PARAM: &str = "q";

/// Placeholder used in the sort token for an absent key or direction.
pub const ABSENT_MARKER: &str = "None";

/// Sortable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Rating,
    Name,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Price, SortKey::Rating, SortKey::Name, SortKey::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
            SortKey::Category => "category",
        }
    }

    /// Exact lower-case match; anything else yields `None` rather than an
    /// error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(SortKey::Price),
            "rating" => Some(SortKey::Rating),
            "name" => Some(SortKey::Name),
            "category" => Some(SortKey::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// A resolved sort: key plus the effective direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// One catalog browse request.
///
/// `search` distinguishes "no `q` parameter" (`None`) from "`q` present but
/// empty" (`Some("")`); the latter is rejected by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub search: Option<String>,
    pub categories: Option<Vec<String>>,
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

impl QueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a request from flat query-string parameters.
    ///
    /// Unknown sort keys and directions are dropped. A direction without a
    /// resolved sort key is dropped too, since it has nothing to order.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let sort = params.get(SORT_PARAM).and_then(|raw| SortKey::parse(raw));
        let direction = match sort {
            Some(_) => params
                .get(DIRECTION_PARAM)
                .and_then(|raw| SortDirection::parse(raw)),
            None => None,
        };

        let categories = params
            .get(CATEGORY_PARAM)
            .map(|raw| split_category_list(raw));

        Self {
            search: params.get(SEARCH_PARAM).cloned(),
            categories,
            sort,
            direction,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: Option<SortDirection>) -> Self {
        self.sort = Some(key);
        self.direction = direction;
        self
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.map(|key| SortSpec {
            key,
            direction: self.direction.unwrap_or_default(),
        })
    }

    /// `{key}_{direction}` token echoed back for UI state (`None_None` when
    /// nothing is sorted). Independent of any filtering outcome.
    pub fn sort_token(&self) -> String {
        match self.sort {
            Some(key) => format!(
                "{}_{}",
                key.as_str(),
                self.direction.map(|d| d.as_str()).unwrap_or(ABSENT_MARKER)
            ),
            None => format!("{ABSENT_MARKER}_{ABSENT_MARKER}"),
        }
    }
}

/// Split a comma-delimited category list. Segments are kept verbatim, so an
/// empty segment is a name that matches nothing.
pub fn split_category_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}
