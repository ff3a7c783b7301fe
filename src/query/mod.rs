//! Query Module
//!
//! In-memory query pipeline run over a scanned collection.
//!
//! ## Pipeline
//! ```text
//! scan (file name order) → filter (AND of equalities) → sort (one field) → window
//! ```
//!
//! Everything here is pure: it takes the loaded documents and returns the
//! page, so it can be tested without touching the filesystem.

mod sort;

pub use sort::{compare_documents, compare_values, stable_sort_by};

use crate::document::{Document, Value};

// =============================================================================
// Filters
// =============================================================================

/// Equality constraint on one field
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The field must exist and hold an equal value of the same type
    pub fn matches(&self, document: &Document) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse an order token
    ///
    /// Ends are trimmed, inner spaces removed and case ignored; anything
    /// other than "desc" is ascending.
    pub fn parse(token: &str) -> Self {
        let normalized = token.trim().replace(' ', "").to_lowercase();

        if normalized == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub offset: usize,
    /// `None` returns everything from `offset` on
    pub limit: Option<usize>,
}

impl Pagination {
    /// Clamp `[offset, offset + limit)` to a sequence of length `len`
    ///
    /// An offset at or past the end gives an empty range.
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        if self.offset >= len {
            return len..len;
        }
        let end = match self.limit {
            Some(limit) => self.offset.saturating_add(limit).min(len),
            None => len,
        };
        self.offset..end
    }
}

// =============================================================================
// List Options
// =============================================================================

/// Everything `list_documents` accepts besides the namespace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    pub pagination: Pagination,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter (AND-ed with the others)
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(field, value));
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(Sort::new(field, direction));
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.pagination.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Run the pipeline over documents in enumeration order
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        let mut documents: Vec<Document> = documents
            .into_iter()
            .filter(|doc| self.filters.iter().all(|f| f.matches(doc)))
            .collect();

        if let Some(sort) = self.sort.as_ref().filter(|s| !s.field.is_empty()) {
            documents = stable_sort_by(documents, &mut |a: &Document, b: &Document| {
                compare_documents(a, b, &sort.field, sort.direction)
            });
        }

        let range = self.pagination.window(documents.len());
        documents
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect()
    }
}
