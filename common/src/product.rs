use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique product identifier within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category. The storefront carries a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Seeds,
    Fertilizers,
    Tools,
    Organic,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Seeds,
        Category::Fertilizers,
        Category::Tools,
        Category::Organic,
    ];

    /// Stable identifier used by the routing layer.
    pub fn id(self) -> &'static str {
        match self {
            Category::Seeds => "seeds",
            Category::Fertilizers => "fertilizers",
            Category::Tools => "tools",
            Category::Organic => "organic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Seeds => "Seeds",
            Category::Fertilizers => "Fertilizers",
            Category::Tools => "Tools",
            Category::Organic => "Organic",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Seeds => "🌱",
            Category::Fertilizers => "🌿",
            Category::Tools => "🔧",
            Category::Organic => "🍀",
        }
    }

    pub fn parse(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Category filter for the shop view. `All` is the synthetic "no filter"
/// bucket the routing layer spells `"all"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(id: &str) -> Option<CategoryFilter> {
        if id == "all" {
            Some(CategoryFilter::All)
        } else {
            Category::parse(id).map(CategoryFilter::Only)
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Products",
            CategoryFilter::Only(c) => c.label(),
        }
    }
}

/// A catalog product. The catalog is read-only at runtime, so a product's
/// identity and fields never change after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in whole rupees.
    pub price: u64,
    /// Pre-discount price; always >= `price` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    pub category: Category,
    /// Average review rating in [0, 5].
    pub rating: f32,
    pub reviews: u32,
    pub in_stock: bool,
    /// Editorial discount badge in percent. Stored independently of the
    /// price pair and never reconciled against it; use
    /// [`Product::derived_discount_percent`] when the badge must agree with
    /// the prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub new_arrival: bool,
}

impl Product {
    /// Rupees saved per unit against the pre-discount price.
    pub fn savings_per_unit(&self) -> u64 {
        match self.original_price {
            Some(original) => original.saturating_sub(self.price),
            None => 0,
        }
    }

    /// Discount computed from the price pair, rounded to the nearest percent.
    /// `None` when there is no pre-discount price.
    pub fn derived_discount_percent(&self) -> Option<u8> {
        let original = self.original_price?;
        if original == 0 {
            return None;
        }
        let saved = original.saturating_sub(self.price);
        Some(((saved * 100 + original / 2) / original) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: u64, original_price: Option<u64>) -> Product {
        Product {
            id: ProductId::new("p-1"),
            name: "Test".into(),
            description: String::new(),
            price,
            original_price,
            category: Category::Seeds,
            rating: 4.0,
            reviews: 10,
            in_stock: true,
            discount_percent: None,
            featured: false,
            new_arrival: false,
        }
    }

    #[test]
    fn category_parse_round_trips() {
        for c in Category::ALL {
            assert_eq!(Category::parse(c.id()), Some(c));
        }
        assert_eq!(Category::parse("livestock"), None);
    }

    #[test]
    fn filter_parse_handles_all_and_unknown() {
        assert_eq!(CategoryFilter::parse("all"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("tools"),
            Some(CategoryFilter::Only(Category::Tools))
        );
        assert_eq!(CategoryFilter::parse("livestock"), None);
    }

    #[test]
    fn filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Organic));
        assert!(CategoryFilter::Only(Category::Seeds).matches(Category::Seeds));
        assert!(!CategoryFilter::Only(Category::Seeds).matches(Category::Tools));
    }

    #[test]
    fn savings_per_unit() {
        assert_eq!(product(1899, Some(2199)).savings_per_unit(), 300);
        assert_eq!(product(999, None).savings_per_unit(), 0);
    }

    #[test]
    fn derived_discount_rounds_to_nearest() {
        // 300 / 2199 = 13.64% -> 14
        assert_eq!(product(1899, Some(2199)).derived_discount_percent(), Some(14));
        // 200 / 799 = 25.03% -> 25
        assert_eq!(product(599, Some(799)).derived_discount_percent(), Some(25));
        assert_eq!(product(999, None).derived_discount_percent(), None);
    }

    #[test]
    fn optional_fields_default_on_deserialize() {
        let json = r#"{
            "id": "1",
            "name": "Seeds",
            "description": "",
            "price": 999,
            "category": "seeds",
            "rating": 4.5,
            "reviews": 128,
            "in_stock": true
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.original_price, None);
        assert_eq!(p.discount_percent, None);
        assert!(!p.featured);
        assert!(!p.new_arrival);
    }
}
