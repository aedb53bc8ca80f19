use std::fmt;

use chrono::NaiveDate;

/// Filter arguments for one repository-search request.
///
/// The tuple (creation-date lower bound, language, page id) identifies a
/// requested result set and doubles as the cache key via [`fmt::Display`].
///
/// The value is immutable: the top-K aggregation walks pages through
/// [`SearchArgs::next_page`] instead of mutating a shared instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Only repositories created strictly after this date match.
    pub created_from: Option<NaiveDate>,
    /// Primary-language filter, matched case-insensitively.
    pub language: Option<String>,
    /// 1-based result page. `None` relies on the provider default (page 1).
    pub page_id: Option<u32>,
}

impl SearchArgs {
    pub fn new(created_from: Option<NaiveDate>, language: Option<String>) -> Self {
        Self {
            created_from,
            language,
            page_id: None,
        }
    }

    /// Returns the same filters pinned to the given page.
    pub fn with_page(self, page_id: u32) -> Self {
        Self {
            page_id: Some(page_id),
            ..self
        }
    }

    /// Returns the same filters pointing at the page after this one. An
    /// unset page id counts as the provider-default first page.
    pub fn next_page(&self) -> Self {
        Self {
            page_id: Some(self.page_id.unwrap_or(1) + 1),
            ..self.clone()
        }
    }

    /// Canonical string form used as the cache key.
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchArgs {
    /// `created_from;language;page_id` — absent filters render empty, an
    /// absent page id renders `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(date) = self.created_from {
            write!(f, "{date}")?;
        }
        f.write_str(";")?;
        if let Some(language) = &self.language {
            f.write_str(language)?;
        }
        write!(f, ";{}", self.page_id.unwrap_or(0))
    }
}
