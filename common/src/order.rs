use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::OrderId;

/// Monotonic fulfilment status. Higher ordinal always wins; an order never
/// moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub fn ordinal(self) -> u8 {
        match self {
            OrderStatus::Processing => 0,
            OrderStatus::InTransit => 1,
            OrderStatus::Delivered => 2,
        }
    }

    /// Returns true if transitioning from self to `next` is valid.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::InTransit)
                | (OrderStatus::InTransit, OrderStatus::Delivered)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

/// An order as shown on the account page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub placed_on: NaiveDate,
    pub total: u64,
    pub status: OrderStatus,
    pub item_names: Vec<String>,
}

/// A customer's order list, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderHistory {
    orders: Vec<PlacedOrder>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The account page's mock orders.
    pub fn seed() -> Self {
        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
        }
        Self {
            orders: vec![
                PlacedOrder {
                    id: OrderId("#AGR2024001".into()),
                    placed_on: date(2024, 1, 15),
                    total: 2499,
                    status: OrderStatus::Delivered,
                    item_names: vec!["Garden Tool Set".into(), "Neem Fertilizer".into()],
                },
                PlacedOrder {
                    id: OrderId("#AGR2024002".into()),
                    placed_on: date(2024, 1, 10),
                    total: 1899,
                    status: OrderStatus::InTransit,
                    item_names: vec!["Premium Basmati Rice".into()],
                },
                PlacedOrder {
                    id: OrderId("#AGR2024003".into()),
                    placed_on: date(2024, 1, 5),
                    total: 999,
                    status: OrderStatus::Processing,
                    item_names: vec!["Organic Wheat Seeds".into()],
                },
            ],
        }
    }

    pub fn orders(&self) -> &[PlacedOrder] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, id: &OrderId) -> Option<&PlacedOrder> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Record a freshly confirmed order from the cart it was placed for.
    /// New orders start in `Processing` and appear first.
    pub fn record(&mut self, id: OrderId, placed_on: NaiveDate, cart: &Cart) {
        self.orders.insert(
            0,
            PlacedOrder {
                id,
                placed_on,
                total: cart.total(),
                status: OrderStatus::Processing,
                item_names: cart.lines().iter().map(|l| l.name.clone()).collect(),
            },
        );
    }

    /// Apply a status update if it is a valid forward transition. Returns
    /// whether anything changed.
    pub fn set_status(&mut self, id: &OrderId, next: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|o| &o.id == id) {
            Some(order) if order.status.can_transition_to(next) => {
                order.status = next;
                true
            }
            _ => false,
        }
    }
}
