pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod currency;
pub mod order;
pub mod product;
pub mod query;
