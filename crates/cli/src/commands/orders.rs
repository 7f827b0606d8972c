//! `lulu orders` commands.

use clap::Args;
use lulu_core::{Money, OrderId};
use lulu_storefront::api::types::{CustomerInfo, DeliveryZone, Order, ShippingAddress};
use lulu_storefront::{CheckoutDetails, Storefront, StorefrontError};

/// Customer and delivery details for `lulu orders checkout`.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    street: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    landmark: Option<String>,
    /// Delivery zone name
    #[arg(long)]
    zone: String,
    /// Delivery cost in naira
    #[arg(long, default_value_t = 0)]
    delivery_cost: i64,
    #[arg(long, default_value = "bank_transfer")]
    payment_method: String,
    #[arg(long)]
    notes: Option<String>,
}

impl From<CheckoutArgs> for CheckoutDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            customer_info: CustomerInfo {
                first_name: args.first_name,
                last_name: args.last_name,
                email: args.email,
                phone: args.phone,
            },
            shipping_address: ShippingAddress {
                street: args.street,
                city: args.city,
                state: args.state,
                landmark: args.landmark,
            },
            delivery_zone: DeliveryZone {
                zone: args.zone,
                cost: Money::from_naira(args.delivery_cost),
            },
            payment_method: args.payment_method,
            notes: args.notes,
        }
    }
}

pub async fn checkout(storefront: &Storefront, args: CheckoutArgs) -> Result<(), StorefrontError> {
    let order = storefront.place_order(args.into()).await?;
    println!("Order placed!");
    print_order(&order);
    Ok(())
}

pub async fn list(storefront: &Storefront) -> Result<(), StorefrontError> {
    let orders = storefront.api().my_orders().await?;
    if orders.is_empty() {
        println!("No orders yet");
    }
    for order in orders {
        println!(
            "{:<12} {:<24} {:<10} {:>12}  {}",
            order.order_number,
            order.id,
            order.status,
            order.total.display(),
            order.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

pub async fn show(storefront: &Storefront, id: &OrderId) -> Result<(), StorefrontError> {
    let order = storefront.api().order(id).await?;
    print_order(&order);
    Ok(())
}

pub async fn cancel(storefront: &Storefront, id: &OrderId, reason: &str) -> Result<(), StorefrontError> {
    let order = storefront.api().cancel_order(id, reason).await?;
    println!("Order {} is now {}", order.order_number, order.status);
    Ok(())
}

fn print_order(order: &Order) {
    println!("Order {} ({})", order.order_number, order.id);
    println!("Status:   {}", order.status);
    println!("Placed:   {}", order.created_at.format("%Y-%m-%d %H:%M"));
    for item in &order.items {
        println!(
            "  {:<24} {:>4} x {:>12}",
            item.product,
            item.quantity,
            item.price.display()
        );
    }
    println!(
        "Delivery: {} ({})",
        order.delivery_zone.zone,
        order.delivery_zone.cost.display()
    );
    println!("Total:    {}", order.total.display());
}
