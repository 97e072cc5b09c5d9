use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartSummary;

/// Unique order identifier, e.g. "#AGR2024001".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints sequential order ids for one storefront year.
///
/// Order persistence is out of scope; the minted id is handed back to the
/// caller and nothing is recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIdMinter {
    year: i32,
    next_seq: u32,
}

impl OrderIdMinter {
    pub fn new(year: i32) -> Self {
        Self { year, next_seq: 1 }
    }

    pub fn mint(&mut self) -> OrderId {
        let id = OrderId(format!("#AGR{}{:03}", self.year, self.next_seq));
        self.next_seq += 1;
        id
    }
}

/// Payment options offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cod, PaymentMethod::Upi, PaymentMethod::Card];

    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Card => "Credit/Debit Card",
        }
    }

    pub fn parse(id: &str) -> Option<PaymentMethod> {
        PaymentMethod::ALL.into_iter().find(|m| m.id() == id)
    }
}

/// Shipping address fields. Field-level validation belongs to the
/// presentation layer; [`ShippingDetails::is_complete`] only checks that the
/// required fields are non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

impl ShippingDetails {
    pub fn is_complete(&self) -> bool {
        ![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.city,
            &self.state,
            &self.pin_code,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// The three checkout steps, strictly linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    /// 1-based step number shown in the wizard indicator.
    pub fn number(self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Confirmation => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmation => "Confirmation",
        }
    }

    /// Returns true if moving from self to `next` is valid. `Confirmation`
    /// is terminal; placing another order starts a fresh session.
    pub fn can_transition_to(self, next: CheckoutStep) -> bool {
        matches!(
            (self, next),
            (CheckoutStep::Shipping, CheckoutStep::Payment)
                | (CheckoutStep::Payment, CheckoutStep::Shipping)
                | (CheckoutStep::Payment, CheckoutStep::Confirmation)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("no payment method selected")]
    NoPaymentMethod,
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: CheckoutStep,
        to: CheckoutStep,
    },
}

/// One checkout flow over a cart snapshot. Created when checkout begins and
/// discarded after confirmation or abandonment; it never mutates the cart it
/// was summarized from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    step: CheckoutStep,
    shipping: ShippingDetails,
    payment_method: Option<PaymentMethod>,
    summary: CartSummary,
    order_id: Option<OrderId>,
}

impl CheckoutSession {
    /// Start a flow over the given cart snapshot. Cash on Delivery is
    /// preselected, matching the storefront's payment form, so a shopper who
    /// changes nothing can advance straight through to confirmation.
    pub fn new(summary: CartSummary) -> Self {
        Self {
            step: CheckoutStep::Shipping,
            shipping: ShippingDetails::default(),
            payment_method: Some(PaymentMethod::Cod),
            summary,
            order_id: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn summary(&self) -> CartSummary {
        self.summary
    }

    pub fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// The minted id, present once the order is placed.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Store the shipping form. Allowed while still on the shipping step.
    pub fn set_shipping(&mut self, details: ShippingDetails) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Shipping {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                to: CheckoutStep::Shipping,
            });
        }
        self.shipping = details;
        Ok(())
    }

    /// Select how to pay. Allowed any time before confirmation.
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                to: CheckoutStep::Payment,
            });
        }
        self.payment_method = Some(method);
        Ok(())
    }

    /// Move forward one step. `Shipping -> Payment` is unconditional;
    /// `Payment -> Confirmation` requires a selected payment method and is a
    /// one-way commit that mints the order id. The caller owns clearing the
    /// cart and recording the order afterwards.
    pub fn advance(&mut self, minter: &mut OrderIdMinter) -> Result<CheckoutStep, CheckoutError> {
        match self.step {
            CheckoutStep::Shipping => {
                self.step = CheckoutStep::Payment;
                Ok(self.step)
            }
            CheckoutStep::Payment => {
                if self.payment_method.is_none() {
                    return Err(CheckoutError::NoPaymentMethod);
                }
                self.order_id = Some(minter.mint());
                self.step = CheckoutStep::Confirmation;
                Ok(self.step)
            }
            CheckoutStep::Confirmation => Err(CheckoutError::InvalidTransition {
                from: self.step,
                to: CheckoutStep::Confirmation,
            }),
        }
    }

    /// Move back from payment to shipping. Any other backward move is
    /// invalid; in particular there is no way out of `Confirmation`.
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                to: CheckoutStep::Shipping,
            });
        }
        self.step = CheckoutStep::Shipping;
        Ok(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> CartSummary {
        CartSummary {
            subtotal: 5397,
            savings: 0,
            shipping: 0,
            total: 5397,
            item_count: 4,
        }
    }

    fn filled_shipping() -> ShippingDetails {
        ShippingDetails {
            first_name: "Rajesh".into(),
            last_name: "Sharma".into(),
            email: "rajesh.sharma@email.com".into(),
            phone: "+91 98765 43210".into(),
            address: "Village Kharedi, Tal. Indapur".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            pin_code: "413106".into(),
        }
    }

    #[test]
    fn transition_matrix_is_linear() {
        use CheckoutStep::*;
        assert!(Shipping.can_transition_to(Payment));
        assert!(Payment.can_transition_to(Shipping));
        assert!(Payment.can_transition_to(Confirmation));

        assert!(!Shipping.can_transition_to(Confirmation));
        assert!(!Confirmation.can_transition_to(Payment));
        assert!(!Confirmation.can_transition_to(Shipping));
    }

    #[test]
    fn advance_twice_without_input_reaches_confirmation() {
        let mut minter = OrderIdMinter::new(2024);
        let mut session = CheckoutSession::new(summary());
        assert_eq!(session.step(), CheckoutStep::Shipping);

        // No form input at all: the preselected method carries the flow.
        assert_eq!(session.advance(&mut minter).unwrap(), CheckoutStep::Payment);
        assert_eq!(
            session.advance(&mut minter).unwrap(),
            CheckoutStep::Confirmation
        );
        assert_eq!(session.payment_method(), Some(PaymentMethod::Cod));
        assert_eq!(session.order_id().unwrap().0, "#AGR2024001");
    }

    #[test]
    fn preselected_cod_can_be_overridden() {
        let mut minter = OrderIdMinter::new(2024);
        let mut session = CheckoutSession::new(summary());
        assert_eq!(session.payment_method(), Some(PaymentMethod::Cod));

        session.select_payment(PaymentMethod::Card).unwrap();
        session.advance(&mut minter).unwrap();
        session.advance(&mut minter).unwrap();
        assert_eq!(session.payment_method(), Some(PaymentMethod::Card));
    }

    #[test]
    fn confirmation_is_terminal() {
        let mut minter = OrderIdMinter::new(2024);
        let mut session = CheckoutSession::new(summary());
        session.select_payment(PaymentMethod::Upi).unwrap();
        session.advance(&mut minter).unwrap();
        session.advance(&mut minter).unwrap();

        assert!(matches!(
            session.back(),
            Err(CheckoutError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.advance(&mut minter),
            Err(CheckoutError::InvalidTransition { .. })
        ));
        assert!(session.select_payment(PaymentMethod::Card).is_err());
        assert_eq!(session.step(), CheckoutStep::Confirmation);
    }

    #[test]
    fn advance_refuses_a_cleared_payment_method() {
        // A round-tripped session can carry a cleared method; the commit
        // still requires one.
        let json = r#"{
            "step": "Payment",
            "shipping": {
                "first_name": "", "last_name": "", "email": "", "phone": "",
                "address": "", "city": "", "state": "", "pin_code": ""
            },
            "payment_method": null,
            "summary": {
                "subtotal": 5397, "savings": 0, "shipping": 0,
                "total": 5397, "item_count": 4
            },
            "order_id": null
        }"#;
        let mut session: CheckoutSession = serde_json::from_str(json).unwrap();

        let mut minter = OrderIdMinter::new(2024);
        assert_eq!(session.advance(&mut minter), Err(CheckoutError::NoPaymentMethod));
        assert_eq!(session.step(), CheckoutStep::Payment);
        assert!(session.order_id().is_none());
    }

    #[test]
    fn back_returns_to_shipping_and_keeps_details() {
        let mut minter = OrderIdMinter::new(2024);
        let mut session = CheckoutSession::new(summary());
        session.set_shipping(filled_shipping()).unwrap();
        session.advance(&mut minter).unwrap();

        assert_eq!(session.back().unwrap(), CheckoutStep::Shipping);
        assert_eq!(session.shipping(), &filled_shipping());
        assert!(session.back().is_err());
    }

    #[test]
    fn shipping_edits_blocked_after_leaving_the_step() {
        let mut minter = OrderIdMinter::new(2024);
        let mut session = CheckoutSession::new(summary());
        session.advance(&mut minter).unwrap();
        assert!(session.set_shipping(filled_shipping()).is_err());
    }

    #[test]
    fn minted_ids_are_sequential() {
        let mut minter = OrderIdMinter::new(2024);
        assert_eq!(minter.mint().0, "#AGR2024001");
        assert_eq!(minter.mint().0, "#AGR2024002");
        assert_eq!(minter.mint().0, "#AGR2024003");
    }

    #[test]
    fn shipping_completeness_checks_every_field() {
        assert!(filled_shipping().is_complete());
        assert!(!ShippingDetails::default().is_complete());

        let mut missing_pin = filled_shipping();
        missing_pin.pin_code = "  ".into();
        assert!(!missing_pin.is_complete());
    }

    #[test]
    fn payment_method_parse_round_trips() {
        for m in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::parse(m.id()), Some(m));
        }
        assert_eq!(PaymentMethod::parse("netbanking"), None);
    }

    #[test]
    fn session_keeps_the_cart_snapshot() {
        let session = CheckoutSession::new(summary());
        assert_eq!(session.summary().total, 5397);
        assert_eq!(session.summary().item_count, 4);
    }
}
