use serde::{Deserialize, Serialize};

use crate::product::ProductId;

/// Account profile shown on the account page. Authentication is out of
/// scope; the demo session uses the seeded profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl UserProfile {
    pub fn seed() -> Self {
        Self {
            name: "Rajesh Sharma".into(),
            email: "rajesh.sharma@email.com".into(),
            phone: "+91 98765 43210".into(),
            address: "Village Kharedi, Tal. Indapur, Dist. Pune, Maharashtra 413106".into(),
        }
    }
}

/// Saved-for-later products. Stores ids only; prices come from the catalog
/// at render time, unlike cart lines, which snapshot them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wishlist {
    product_ids: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed() -> Self {
        Self {
            product_ids: vec![ProductId::new("9"), ProductId::new("10")],
        }
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.product_ids.iter().any(|p| p == id)
    }

    /// Add the product if absent, remove it if present. Returns whether it
    /// is in the wishlist afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.contains(&id) {
            self.remove(&id);
            false
        } else {
            self.product_ids.push(id);
            true
        }
    }

    pub fn remove(&mut self, id: &ProductId) {
        self.product_ids.retain(|p| p != id);
    }
}
