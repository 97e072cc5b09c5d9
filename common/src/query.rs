use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::product::{CategoryFilter, Product};

/// Sort order for shop results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first, then rating descending within each partition.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Name,
    ];

    /// Stable identifier used by the routing layer.
    pub fn id(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
        }
    }

    pub fn parse(id: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|k| k.id() == id)
    }
}

/// One shop-view query: category filter, free-text search, sort order.
/// The routing layer hands these over as opaque strings; parsing them is the
/// caller's move, so the defaults here match the shop page's initial state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
}

impl Catalog {
    /// Derive the visible product list for the shop view.
    ///
    /// Filters by category, then retains products whose name or description
    /// contains the case-folded search term, then sorts. All sorts are stable,
    /// so equal keys keep catalog order and results are deterministic. An
    /// empty result is an ordinary empty list.
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut results = self.by_category(query.category);

        if !query.search.is_empty() {
            let term = query.search.to_lowercase();
            results.retain(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            });
        }

        match query.sort {
            SortKey::PriceLow => results.sort_by_key(|p| p.price),
            SortKey::PriceHigh => results.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Rating => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Featured => results.sort_by(|a, b| {
                b.featured
                    .cmp(&a.featured)
                    .then(b.rating.total_cmp(&a.rating))
            }),
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Category;

    fn query(category: CategoryFilter, search: &str, sort: SortKey) -> ProductQuery {
        ProductQuery {
            category,
            search: search.into(),
            sort,
        }
    }

    #[test]
    fn sort_key_parse_round_trips() {
        for k in SortKey::ALL {
            assert_eq!(SortKey::parse(k.id()), Some(k));
        }
        assert_eq!(SortKey::parse("price"), None);
    }

    #[test]
    fn price_low_is_non_decreasing() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::PriceLow));
        assert_eq!(results.len(), 12);
        assert!(results.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn price_high_is_non_increasing() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::PriceHigh));
        assert!(results.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn rating_sort_descends() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::Rating));
        assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn name_sort_ascends() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::Name));
        assert!(results.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn featured_sort_partitions_then_rates() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::Featured));

        let boundary = results.iter().position(|p| !p.featured).unwrap();
        assert!(results[..boundary].iter().all(|p| p.featured));
        assert!(results[boundary..].iter().all(|p| !p.featured));
        assert!(results[..boundary].windows(2).all(|w| w[0].rating >= w[1].rating));
        assert!(results[boundary..].windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn equal_sort_keys_keep_catalog_order() {
        let catalog = Catalog::seed();
        // Products "5" and "8" share price 1299; "5" precedes "8" in the seed.
        let results = catalog.search(&query(CategoryFilter::All, "", SortKey::PriceLow));
        let pos_5 = results.iter().position(|p| p.id.0 == "5").unwrap();
        let pos_8 = results.iter().position(|p| p.id.0 == "8").unwrap();
        assert!(pos_5 < pos_8);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "WHEAT", SortKey::Featured));
        assert!(!results.is_empty());
        for p in &results {
            let term = "wheat";
            assert!(
                p.name.to_lowercase().contains(term)
                    || p.description.to_lowercase().contains(term)
            );
        }
    }

    #[test]
    fn search_results_are_subset_of_category() {
        let catalog = Catalog::seed();
        let filter = CategoryFilter::Only(Category::Seeds);
        let results = catalog.search(&query(filter, "hybrid", SortKey::Featured));
        let category_ids: Vec<_> = catalog.by_category(filter).iter().map(|p| &p.id).collect();
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| category_ids.contains(&&p.id)));
    }

    #[test]
    fn no_match_yields_empty_list() {
        let catalog = Catalog::seed();
        let results = catalog.search(&query(CategoryFilter::All, "tractor", SortKey::Featured));
        assert!(results.is_empty());
    }
}
