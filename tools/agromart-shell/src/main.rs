//! AgroMart storefront shell.
//!
//! A thin command-line front end over `agromart-common`: it plays the role
//! of the presentation layer, driving the catalog query engine, the cart,
//! and the checkout flow against the seeded dataset.

use anyhow::{bail, Context};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use agromart_common::account::{UserProfile, Wishlist};
use agromart_common::cart::Cart;
use agromart_common::catalog::Catalog;
use agromart_common::checkout::{
    CheckoutSession, CheckoutStep, OrderIdMinter, PaymentMethod, ShippingDetails,
};
use agromart_common::currency::format_amount;
use agromart_common::order::OrderHistory;
use agromart_common::product::{CategoryFilter, Product, ProductId};
use agromart_common::query::{ProductQuery, SortKey};

#[derive(Parser)]
#[command(name = "agromart-shell", about = "AgroMart storefront shell")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the catalog with optional category, search, and sort.
    Browse {
        /// Category id ("all", "seeds", "fertilizers", "tools", "organic").
        #[arg(long, default_value = "all")]
        category: String,

        /// Free-text search over name and description.
        #[arg(long, default_value = "")]
        search: String,

        /// Sort key ("featured", "price-low", "price-high", "rating", "name").
        #[arg(long, default_value = "featured")]
        sort: String,

        /// Emit the result list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one product in detail.
    Show { id: String },

    /// Featured products (the home-page rail).
    Featured,

    /// New arrivals.
    New,

    /// Build a cart and walk the checkout flow end to end.
    Order {
        /// Product to order, as ID or ID:QTY. Repeatable.
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<(String, u32)>,

        #[arg(long, default_value = "Rajesh")]
        first_name: String,
        #[arg(long, default_value = "Sharma")]
        last_name: String,
        #[arg(long, default_value = "rajesh.sharma@email.com")]
        email: String,
        #[arg(long, default_value = "+91 98765 43210")]
        phone: String,
        #[arg(long, default_value = "Village Kharedi, Tal. Indapur")]
        address: String,
        #[arg(long, default_value = "Pune")]
        city: String,
        #[arg(long, default_value = "Maharashtra")]
        state: String,
        #[arg(long, default_value = "413106")]
        pin_code: String,

        /// Payment method ("cod", "upi", "card").
        #[arg(long, default_value = "cod")]
        payment: String,
    },

    /// Account overview: profile, order history, wishlist.
    Account,
}

fn parse_item(raw: &str) -> Result<(String, u32), String> {
    match raw.split_once(':') {
        Some((id, qty)) => {
            let quantity: u32 = qty
                .parse()
                .map_err(|_| format!("invalid quantity in '{raw}'"))?;
            if quantity == 0 {
                return Err(format!("quantity must be positive in '{raw}'"));
            }
            Ok((id.to_string(), quantity))
        }
        None => Ok((raw.to_string(), 1)),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::seed();

    match cli.command {
        Command::Browse {
            category,
            search,
            sort,
            json,
        } => browse(&catalog, &category, &search, &sort, json),
        Command::Show { id } => show(&catalog, &id),
        Command::Featured => {
            print_listing(&catalog.featured());
            Ok(())
        }
        Command::New => {
            print_listing(&catalog.new_arrivals());
            Ok(())
        }
        Command::Order {
            items,
            first_name,
            last_name,
            email,
            phone,
            address,
            city,
            state,
            pin_code,
            payment,
        } => {
            let shipping = ShippingDetails {
                first_name,
                last_name,
                email,
                phone,
                address,
                city,
                state,
                pin_code,
            };
            order(&catalog, &items, shipping, &payment)
        }
        Command::Account => {
            account(&catalog);
            Ok(())
        }
    }
}

fn browse(
    catalog: &Catalog,
    category: &str,
    search: &str,
    sort: &str,
    json: bool,
) -> anyhow::Result<()> {
    let filter = CategoryFilter::parse(category).unwrap_or_else(|| {
        warn!(category, "unknown category, showing all products");
        CategoryFilter::All
    });
    let sort_key = SortKey::parse(sort).unwrap_or_else(|| {
        warn!(sort, "unknown sort key, using featured order");
        SortKey::default()
    });

    let query = ProductQuery {
        category: filter,
        search: search.to_string(),
        sort: sort_key,
    };
    let results = catalog.search(&query);
    info!(
        category = filter.label(),
        sort = sort_key.id(),
        matches = results.len(),
        "browse"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    print_listing(&results);
    Ok(())
}

fn print_listing(products: &[&Product]) {
    for p in products {
        let badge = match (p.featured, p.new_arrival) {
            (true, _) => " [featured]",
            (_, true) => " [new]",
            _ => "",
        };
        let was = match p.original_price {
            Some(original) => format!(" (was {})", format_amount(original)),
            None => String::new(),
        };
        println!(
            "{:>3}  {:<45} {:>8}{}  {:.1}★ ({}){}",
            p.id,
            p.name,
            format_amount(p.price),
            was,
            p.rating,
            p.reviews,
            badge
        );
    }
}

fn show(catalog: &Catalog, id: &str) -> anyhow::Result<()> {
    let id = ProductId::new(id);
    let Some(product) = catalog.get(&id) else {
        bail!("product {id} not found");
    };

    println!("{}", product.name);
    println!("  Category: {} {}", product.category.icon(), product.category.label());
    println!("  Price:    {}", format_amount(product.price));
    if let Some(original) = product.original_price {
        let percent = product.derived_discount_percent().unwrap_or(0);
        println!("  Was:      {} ({percent}% off)", format_amount(original));
    }
    println!("  Rating:   {:.1}★ from {} reviews", product.rating, product.reviews);
    println!("  Stock:    {}", if product.in_stock { "in stock" } else { "out of stock" });
    println!();
    println!("  {}", product.description);
    Ok(())
}

fn order(
    catalog: &Catalog,
    items: &[(String, u32)],
    shipping: ShippingDetails,
    payment: &str,
) -> anyhow::Result<()> {
    let method = PaymentMethod::parse(payment)
        .with_context(|| format!("unknown payment method '{payment}'"))?;

    let mut cart = Cart::new();
    for (id, quantity) in items {
        let id = ProductId::new(id.as_str());
        let Some(product) = catalog.get(&id) else {
            bail!("product {id} not found");
        };
        cart.add(product, *quantity);
    }

    println!("Order summary");
    for line in cart.lines() {
        println!(
            "  {:>2} x {:<45} {}",
            line.quantity,
            line.name,
            format_amount(line.line_total())
        );
    }
    println!("  Subtotal ({} items): {}", cart.item_count(), format_amount(cart.subtotal()));
    if cart.savings() > 0 {
        println!("  Savings:             -{}", format_amount(cart.savings()));
    }
    match cart.amount_to_free_shipping() {
        None => println!("  Shipping:            FREE"),
        Some(short) => {
            println!("  Shipping:            {}", format_amount(cart.shipping_fee()));
            println!("  (add {} more for free shipping)", format_amount(short));
        }
    }
    println!("  Total:               {}", format_amount(cart.total()));
    println!();

    if !shipping.is_complete() {
        warn!("shipping details incomplete, continuing with what was given");
    }

    let mut minter = OrderIdMinter::new(Utc::now().year());
    let mut session = CheckoutSession::new(cart.summary());
    session.set_shipping(shipping)?;

    let step = session.advance(&mut minter)?;
    info!(step = step.title(), "checkout");
    session.select_payment(method)?;
    let step = session.advance(&mut minter)?;
    info!(step = step.title(), "checkout");
    debug_assert_eq!(step, CheckoutStep::Confirmation);

    let order_id = session
        .order_id()
        .context("confirmed session carries an order id")?
        .clone();

    // The session only read a snapshot; recording the order and emptying the
    // cart are the shell's moves.
    let mut history = OrderHistory::seed();
    history.record(order_id.clone(), Utc::now().date_naive(), &cart);
    cart.clear();

    println!("Order Confirmed!");
    println!("  Order ID: {order_id}");
    println!("  Payment:  {}", method.label());
    println!("  Estimated delivery: 3-5 business days");
    Ok(())
}

fn account(catalog: &Catalog) {
    let profile = UserProfile::seed();
    println!("{}", profile.name);
    println!("  {}", profile.email);
    println!("  {}", profile.phone);
    println!("  {}", profile.address);

    println!();
    println!("Orders");
    for order in OrderHistory::seed().orders() {
        println!(
            "  {}  {}  {:<10}  {}  ({})",
            order.id,
            order.placed_on,
            order.status.label(),
            format_amount(order.total),
            order.item_names.join(", ")
        );
    }

    println!();
    println!("Wishlist");
    for id in Wishlist::seed().ids() {
        match catalog.get(id) {
            Some(p) => println!("  {:<45} {}", p.name, format_amount(p.price)),
            None => println!("  {id} (no longer in catalog)"),
        }
    }
}
