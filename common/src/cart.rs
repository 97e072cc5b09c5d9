use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// Shipping fee policy, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Orders at or above this subtotal ship free.
    pub free_shipping_threshold: u64,
    /// Flat fee charged below the threshold.
    pub flat_shipping_fee: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 999,
            flat_shipping_fee: 99,
        }
    }
}

/// One cart line. Unit prices are snapshots taken when the product was first
/// added, so a later catalog price change never reprices an existing cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub original_unit_price: Option<u64>,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }

    pub fn line_savings(&self) -> u64 {
        match self.original_unit_price {
            Some(original) => original.saturating_sub(self.unit_price) * u64::from(self.quantity),
            None => 0,
        }
    }
}

/// A single shopper's cart. Lines keep insertion order; one line per product.
///
/// The cart has exactly one owner (the session) and is mutated only through
/// the methods here, synchronously, in response to user actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(default)]
    config: CartConfig,
}

impl Cart {
    /// An empty cart with the default shipping policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CartConfig) -> Self {
        Self {
            lines: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> CartConfig {
        self.config
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product, snapshotting its current prices. Adding a product that
    /// is already in the cart increments its line. A zero quantity is a
    /// no-op; quantity adjustment goes through [`Cart::set_quantity`].
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity,
                unit_price: product.price,
                original_unit_price: product.original_price,
            }),
        }
    }

    /// Set a line's quantity exactly. Zero removes the line. No-op when the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line. No-op when the product is not in the cart.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn savings(&self) -> u64 {
        self.lines.iter().map(CartLine::line_savings).sum()
    }

    /// Zero for an empty cart and for subtotals at or above the free-shipping
    /// threshold; the flat fee otherwise.
    pub fn shipping_fee(&self) -> u64 {
        if self.lines.is_empty() || self.subtotal() >= self.config.free_shipping_threshold {
            0
        } else {
            self.config.flat_shipping_fee
        }
    }

    pub fn total(&self) -> u64 {
        self.subtotal() + self.shipping_fee()
    }

    /// Rupees still needed for free shipping; `None` once shipping is free
    /// (or the cart is empty and there is nothing to ship).
    pub fn amount_to_free_shipping(&self) -> Option<u64> {
        if self.shipping_fee() == 0 {
            None
        } else {
            Some(self.config.free_shipping_threshold - self.subtotal())
        }
    }

    /// Snapshot of the derived totals, handed to checkout. Checkout reads
    /// this value and never mutates the cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            subtotal: self.subtotal(),
            savings: self.savings(),
            shipping: self.shipping_fee(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// Derived cart totals at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: u64,
    pub savings: u64,
    pub shipping: u64,
    pub total: u64,
    pub item_count: u32,
}
