//! Directory filter state and its query-string form.
//!
//! The query string is the source of truth: `FilterState::navigate`
//! re-derives the whole filter from it, and local edits produce a new
//! canonical query string to push.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::catalog::{Catalog, CountryCode, TagSlug};

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_COUNTRY: &str = "country";
pub const PARAM_TAGS: &str = "tags";
pub const PARAM_PAGE: &str = "page";

pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFilter {
    pub text: String,
    pub country: CountryCode,
    pub tags: BTreeSet<TagSlug>,
    /// 1-based page cursor
    pub page: u32,
}

impl Default for DirectoryFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            country: CountryCode::none(),
            tags: BTreeSet::new(),
            page: FIRST_PAGE,
        }
    }
}

impl DirectoryFilter {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Same search criteria, ignoring the page cursor.
    fn same_criteria(&self, other: &Self) -> bool {
        self.text == other.text && self.country == other.country && self.tags == other.tags
    }
}

/// Parse a query string into a filter. Never fails: anything malformed or
/// unknown falls back to the default for that field.
pub fn decode(query: &str, catalog: &Catalog) -> DirectoryFilter {
    let query = query.trim().trim_start_matches('?');
    let mut filter = DirectoryFilter::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_SEARCH => filter.text = value.into_owned(),
            PARAM_COUNTRY => {
                filter.country = catalog
                    .country_by_code(&value)
                    .cloned()
                    .unwrap_or_default();
            }
            PARAM_TAGS => {
                // stale links may carry retired tags
                if let Some(slug) = catalog.resolve_tag(&value) {
                    filter.tags.insert(slug);
                }
            }
            PARAM_PAGE => {
                filter.page = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|page| *page >= FIRST_PAGE)
                    .unwrap_or(FIRST_PAGE);
            }
            _ => {}
        }
    }

    filter
}

/// Serialize a filter. Parameter order is fixed and default values are
/// omitted, so equal filters always produce identical strings.
pub fn encode(filter: &DirectoryFilter) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !filter.text.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &filter.text);
    }
    if !filter.country.is_none() {
        serializer.append_pair(PARAM_COUNTRY, &filter.country.wire_code());
    }
    for tag in &filter.tags {
        serializer.append_pair(PARAM_TAGS, tag.as_str());
    }
    if filter.page > FIRST_PAGE {
        serializer.append_pair(PARAM_PAGE, &filter.page.to_string());
    }

    serializer.finish()
}

/// Current filter plus its canonical query string.
#[derive(Debug, Clone)]
pub struct FilterState {
    filter: DirectoryFilter,
    query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            filter: DirectoryFilter::default(),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn from_query(query: &str, catalog: &Catalog) -> Self {
        let filter = decode(query, catalog);
        let query = encode(&filter);
        Self { filter, query }
    }

    pub fn filter(&self) -> &DirectoryFilter {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Apply an externally observed query string (history navigation).
    ///
    /// The filter is rebuilt from scratch; nothing from the previous local
    /// state survives. Returns whether the filter changed.
    pub fn navigate(&mut self, query: &str, catalog: &Catalog) -> bool {
        let filter = decode(query, catalog);
        let changed = filter != self.filter;
        self.query = encode(&filter);
        self.filter = filter;
        changed
    }

    /// Apply a local edit. Returns the new query string when it differs from
    /// the current one, `None` when the edit was a no-op.
    ///
    /// Changing the search criteria resets the page cursor.
    pub fn update<F>(&mut self, edit: F) -> Option<String>
    where
        F: FnOnce(&mut DirectoryFilter),
    {
        let mut next = self.filter.clone();
        edit(&mut next);
        if !next.same_criteria(&self.filter) {
            next.page = FIRST_PAGE;
        }
        if next.page < FIRST_PAGE {
            next.page = FIRST_PAGE;
        }

        let encoded = encode(&next);
        self.filter = next;
        if encoded == self.query {
            return None;
        }
        self.query = encoded.clone();
        Some(encoded)
    }

    pub fn set_text(&mut self, text: &str) -> Option<String> {
        self.update(|filter| filter.text = text.to_string())
    }

    pub fn set_country(&mut self, country: CountryCode) -> Option<String> {
        self.update(|filter| filter.country = country)
    }

    /// Add the slug if absent, remove it if present.
    pub fn toggle_tag(&mut self, slug: TagSlug) -> Option<String> {
        self.update(|filter| {
            if !filter.tags.remove(&slug) {
                filter.tags.insert(slug);
            }
        })
    }

    pub fn next_page(&mut self) -> Option<String> {
        self.update(|filter| filter.page = filter.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<String> {
        self.update(|filter| filter.page = filter.page.saturating_sub(1).max(FIRST_PAGE))
    }

    pub fn reset(&mut self) -> Option<String> {
        self.update(|filter| *filter = DirectoryFilter::default())
    }
}

/// Entries kept by `QueryHistory`; the oldest are dropped beyond this.
pub const HISTORY_DEPTH: usize = 100;

/// Back/forward stack of query strings.
#[derive(Debug, Clone)]
pub struct QueryHistory {
    entries: Vec<String>,
    index: usize,
}

impl QueryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Record a new entry, dropping anything ahead of the cursor. Pushing the
    /// current entry again is ignored.
    pub fn push(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.current() {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(query);
        let overflow = self.entries.len().saturating_sub(HISTORY_DEPTH);
        self.entries.drain(..overflow);
        self.index = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
