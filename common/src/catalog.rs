use serde::{Deserialize, Serialize};

use crate::product::{Category, CategoryFilter, Product, ProductId};

/// The product catalog. Seeded once at startup and read-only afterwards; no
/// product is created, updated, or deleted while the application runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list. Ids must be unique.
    pub fn new(products: Vec<Product>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<&ProductId> = products.iter().map(|p| &p.id).collect();
                ids.sort();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate product id in catalog"
        );
        Self { products }
    }

    /// The fixed storefront dataset.
    pub fn seed() -> Self {
        Self::new(seed_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up one product. A miss is an ordinary absent value.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in a category, in catalog order. `All` returns everything.
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    pub fn new_arrivals(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.new_arrival).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

fn item(
    id: &str,
    name: &str,
    price: u64,
    category: Category,
    description: &str,
    rating: f32,
    reviews: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.into(),
        description: description.into(),
        price,
        original_price: None,
        category,
        rating,
        reviews,
        in_stock: true,
        discount_percent: None,
        featured: false,
        new_arrival: false,
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        Product {
            featured: true,
            ..item(
                "1",
                "Organic Wheat Seeds - 5kg Bag",
                999,
                Category::Seeds,
                "Premium quality organic wheat seeds for high yield farming. \
                 Disease resistant variety with excellent germination rate.",
                4.5,
                128,
            )
        },
        Product {
            new_arrival: true,
            ..item(
                "2",
                "Hybrid Tomato Seeds - 100g Pack",
                649,
                Category::Seeds,
                "High yielding hybrid tomato seeds with superior taste and disease \
                 resistance. Perfect for greenhouse and field cultivation.",
                4.3,
                89,
            )
        },
        Product {
            original_price: Some(2199),
            discount_percent: Some(14),
            featured: true,
            ..item(
                "3",
                "Premium Basmati Rice - 10kg",
                1899,
                Category::Organic,
                "Authentic premium basmati rice with long grains and aromatic \
                 fragrance. Aged for perfect taste and texture.",
                4.7,
                256,
            )
        },
        item(
            "4",
            "Neem Fertilizer Cake - 2kg",
            750,
            Category::Fertilizers,
            "100% organic neem cake fertilizer for soil enrichment and natural \
             pest control. Slow release nutrients for plants.",
            4.4,
            167,
        ),
        item(
            "5",
            "Urea Fertilizer Pack - 5kg",
            1299,
            Category::Fertilizers,
            "High grade urea fertilizer for enhanced plant growth and nitrogen \
             supplementation. Suitable for all crops.",
            4.2,
            203,
        ),
        Product {
            original_price: Some(2999),
            discount_percent: Some(17),
            featured: true,
            ..item(
                "6",
                "Garden Tool Set (5 pcs)",
                2499,
                Category::Tools,
                "Complete gardening tool set including trowel, pruner, rake, \
                 weeder, and cultivator. Durable steel construction.",
                4.6,
                145,
            )
        },
        item(
            "7",
            "Steel Farming Shovel",
            899,
            Category::Tools,
            "Heavy duty steel farming shovel with ergonomic wooden handle. \
             Perfect for digging and soil preparation.",
            4.3,
            78,
        ),
        item(
            "8",
            "Organic Compost Fertilizer - 10kg",
            1299,
            Category::Organic,
            "Premium organic compost made from kitchen waste and farm residue. \
             Rich in nutrients and beneficial microorganisms.",
            4.5,
            189,
        ),
        Product {
            original_price: Some(3999),
            discount_percent: Some(13),
            new_arrival: true,
            ..item(
                "9",
                "Drip Irrigation Kit (100m Pipe + Fittings)",
                3499,
                Category::Tools,
                "Complete drip irrigation system for efficient water management. \
                 Includes pipes, emitters, and connectors.",
                4.4,
                112,
            )
        },
        Product {
            featured: true,
            ..item(
                "10",
                "Vermicompost - 25kg Pack",
                1799,
                Category::Organic,
                "High quality vermicompost produced by earthworms. Rich in \
                 nutrients and improves soil health naturally.",
                4.6,
                234,
            )
        },
        item(
            "11",
            "Hybrid Maize Seeds - 1kg",
            799,
            Category::Seeds,
            "High yielding hybrid maize seeds with excellent drought tolerance \
             and disease resistance.",
            4.3,
            95,
        ),
        Product {
            original_price: Some(799),
            discount_percent: Some(25),
            new_arrival: true,
            ..item(
                "12",
                "Biodegradable Plant Pots - Set of 12",
                599,
                Category::Tools,
                "Eco-friendly biodegradable plant pots made from natural fibers. \
                 Perfect for seedling cultivation.",
                4.4,
                156,
            )
        },
    ]
}
