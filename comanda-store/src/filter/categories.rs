//! Category filter/sort view

use super::{SortDir, StatusFilter};
use shared::models::{Category, CategoryKind};

/// Sortable category fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySortField {
    #[default]
    Name,
    Kind,
    CreatedAt,
}

/// Current category view criteria.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryFilters {
    /// Case-insensitive match against name and description
    pub search: String,
    pub kind: Option<CategoryKind>,
    /// Matched against the customer-visibility flag
    pub status: StatusFilter,
    pub sort_by: CategorySortField,
    pub sort_dir: SortDir,
}

impl CategoryFilters {
    /// True when any filter differs from its default (sort excluded).
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.kind.is_some()
            || self.status != StatusFilter::All
    }

    /// Reset every filter to its default simultaneously.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Produce the filtered and sorted view; the source is never mutated.
    pub fn apply(&self, categories: &[Category]) -> Vec<Category> {
        let needle = self.search.trim().to_lowercase();

        let mut view: Vec<Category> = categories
            .iter()
            .filter(|c| {
                if !needle.is_empty() {
                    let hit = c.name.to_lowercase().contains(&needle)
                        || c.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle));
                    if !hit {
                        return false;
                    }
                }
                if let Some(kind) = self.kind {
                    if c.kind != kind {
                        return false;
                    }
                }
                self.status.matches(c.is_displayed)
            })
            .cloned()
            .collect();

        view.sort_by(|a, b| {
            let ordering = match self.sort_by {
                CategorySortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                CategorySortField::Kind => a.kind.as_str().cmp(b.kind.as_str()),
                CategorySortField::CreatedAt => {
                    let a_ms = a.created_at.map(|t| t.timestamp_millis()).unwrap_or(i64::MIN);
                    let b_ms = b.created_at.map(|t| t.timestamp_millis()).unwrap_or(i64::MIN);
                    a_ms.cmp(&b_ms)
                }
            };
            match self.sort_dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
        view
    }
}
