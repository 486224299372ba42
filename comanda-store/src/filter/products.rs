//! Product filter/sort view

use super::{PriceRange, SortDir, StatusFilter};
use shared::models::{Category, Product};
use std::collections::HashMap;

/// Sortable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    Name,
    Price,
    Stock,
    CreatedAt,
}

/// Current product view criteria.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFilters {
    /// Case-insensitive match against name, description and category name
    pub search: String,
    /// Exact category id as the UI select provides it (string-compared)
    pub category_id: String,
    pub status: StatusFilter,
    pub price_range: PriceRange,
    pub sort_by: ProductSortField,
    pub sort_dir: SortDir,
}

impl ProductFilters {
    /// True when any filter differs from its default (sort excluded).
    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.category_id.is_empty()
            || self.status != StatusFilter::All
            || self.price_range != PriceRange::All
    }

    /// Reset every filter to its default simultaneously.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Produce the filtered and sorted view. The source slices are never
    /// mutated.
    pub fn apply(&self, products: &[Product], categories: &[Category]) -> Vec<Product> {
        let category_names: HashMap<i64, String> = categories
            .iter()
            .map(|c| (c.id, c.name.to_lowercase()))
            .collect();
        let needle = self.search.trim().to_lowercase();

        let mut view: Vec<Product> = products
            .iter()
            .filter(|p| {
                if !needle.is_empty() {
                    let category_name = category_names.get(&p.category_id);
                    let hit = p.name.to_lowercase().contains(&needle)
                        || p.description.to_lowercase().contains(&needle)
                        || category_name.is_some_and(|name| name.contains(&needle));
                    if !hit {
                        return false;
                    }
                }
                if !self.category_id.is_empty()
                    && p.category_id.to_string() != self.category_id
                {
                    return false;
                }
                if !self.status.matches(p.is_active) {
                    return false;
                }
                self.price_range.contains(p.price)
            })
            .cloned()
            .collect();

        view.sort_by(|a, b| {
            let ordering = match self.sort_by {
                ProductSortField::Name => {
                    a.name.to_lowercase().cmp(&b.name.to_lowercase())
                }
                ProductSortField::Price => a.price.cmp(&b.price),
                ProductSortField::Stock => a.stock.cmp(&b.stock),
                // explicit numeric coercion; never compare date strings
                ProductSortField::CreatedAt => timestamp_ms(a).cmp(&timestamp_ms(b)),
            };
            match self.sort_dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
        view
    }
}

fn timestamp_ms(product: &Product) -> i64 {
    product
        .created_at
        .map(|t| t.timestamp_millis())
        .unwrap_or(i64::MIN)
}
