//! Derived filter/sort views
//!
//! Pure computation over resource collections given the current UI
//! criteria; the source collection is never mutated. Dates are compared
//! through explicit millisecond timestamps, strings case-insensitively.

mod categories;
mod products;

pub use categories::{CategoryFilters, CategorySortField};
pub use products::{ProductFilters, ProductSortField};

use rust_decimal::Decimal;

/// Status filter over an active/visible flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => active,
            Self::Inactive => !active,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Fixed price buckets; half-open intervals, no overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// price < 25 000
    Under25k,
    /// 25 000 ≤ price < 50 000
    From25kTo50k,
    /// 50 000 ≤ price < 100 000
    From50kTo100k,
    /// price ≥ 100 000
    Over100k,
}

impl PriceRange {
    pub fn contains(&self, price: Decimal) -> bool {
        let k25 = Decimal::from(25_000);
        let k50 = Decimal::from(50_000);
        let k100 = Decimal::from(100_000);
        match self {
            Self::All => true,
            Self::Under25k => price < k25,
            Self::From25kTo50k => price >= k25 && price < k50,
            Self::From50kTo100k => price >= k50 && price < k100,
            Self::Over100k => price >= k100,
        }
    }
}
