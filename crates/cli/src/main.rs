//! Lulu Artistry CLI - shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! lulu products list --category lashes --search glue
//!
//! # Add to the cart and check out
//! lulu cart add 64f1c0ffee
//! lulu orders checkout --first-name Ada --last-name Obi --email ada@example.com \
//!     --phone 08012345678 --street "1 Admiralty Way" --city Lagos --state Lagos \
//!     --zone Lekki --delivery-cost 2000
//!
//! # Book an appointment
//! lulu bookings availability --date 2025-03-14 --location Lekki --artist-type lash
//! ```
//!
//! Cart, wishlist and session token persist under `LULU_STORAGE_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lulu_core::SocialProvider;
use lulu_storefront::{Storefront, StorefrontConfig, StorefrontError};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lulu")]
#[command(author, version, about = "Lulu Artistry storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorited products
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },
    /// Sign in, sign out and manage the account
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place and track orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Book and manage appointments
    Bookings {
        #[command(subcommand)]
        action: BookingsAction,
    },
    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add one unit of a product
    Add { product_id: String },
    /// Set a line item's quantity (0 removes it)
    Set { product_id: String, quantity: u32 },
    /// Remove a line item
    Remove { product_id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List favorited product ids
    Show,
    /// Add or remove a product
    Toggle { product_id: String },
    /// Remove every favorite
    Clear,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products for a shop page
    List {
        /// Category slug, e.g. `lashes` or `all`
        #[arg(short, long)]
        category: Option<String>,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show { product_id: String },
    /// List featured products
    Featured,
}

#[derive(Subcommand)]
enum CategoriesAction {
    /// List every category
    List,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Me,
    /// Email a password reset link
    ForgotPassword { email: String },
    /// Print the URL that starts a social sign-in (`google` or `facebook`)
    SocialUrl { provider: SocialProvider },
    /// Finish a social sign-in from the callback URL
    Callback { url: String },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders
    List,
    /// Show one order
    Show { order_id: String },
    /// Cancel an order
    Cancel {
        order_id: String,
        #[arg(short, long)]
        reason: String,
    },
    /// Place an order for the cart contents
    Checkout(commands::orders::CheckoutArgs),
}

#[derive(Subcommand)]
enum BookingsAction {
    /// Show open slots
    Availability {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        location: String,
        #[arg(long)]
        artist_type: String,
    },
    /// Book an appointment
    Create(commands::bookings::CreateBookingArgs),
    /// List your bookings
    List,
    /// Show one booking
    Show { booking_id: String },
    /// Cancel a booking
    Cancel {
        booking_id: String,
        #[arg(short, long)]
        reason: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lulu_storefront=info,lulu_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        if e.is_unexpected() {
            sentry::capture_error(&e);
        }
        tracing::error!(error = %e, "Command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), StorefrontError> {
    let storefront = Storefront::open(config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { product_id } => {
                commands::cart::add(&storefront, &product_id.into()).await?;
            }
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(&storefront, &product_id.into(), quantity)?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&storefront, &product_id.into())?;
            }
            CartAction::Clear => commands::cart::clear(&storefront)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&storefront),
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&storefront, &product_id.into())?;
            }
            WishlistAction::Clear => commands::wishlist::clear(&storefront)?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List { category, search } => {
                commands::catalog::list_products(
                    &storefront,
                    category.as_deref(),
                    search.as_deref(),
                )
                .await?;
            }
            ProductsAction::Show { product_id } => {
                commands::catalog::show_product(&storefront, &product_id.into()).await?;
            }
            ProductsAction::Featured => commands::catalog::featured(&storefront).await?,
        },
        Commands::Categories { action } => match action {
            CategoriesAction::List => commands::catalog::list_categories(&storefront).await?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Register {
                first_name,
                last_name,
                email,
                phone,
                password,
                confirm_password,
            } => {
                let form = lulu_storefront::session::RegistrationForm {
                    first_name,
                    last_name,
                    email,
                    phone,
                    password,
                    confirm_password,
                };
                commands::auth::register(&storefront, &form).await?;
            }
            AuthAction::Login { email, password } => {
                let form = lulu_storefront::session::LoginForm { email, password };
                commands::auth::login(&storefront, &form).await?;
            }
            AuthAction::Logout => commands::auth::logout(&storefront).await?,
            AuthAction::Me => commands::auth::me(&storefront).await?,
            AuthAction::ForgotPassword { email } => {
                commands::auth::forgot_password(&storefront, &email).await?;
            }
            AuthAction::SocialUrl { provider } => {
                commands::auth::social_url(&storefront, provider)?;
            }
            AuthAction::Callback { url } => commands::auth::callback(&storefront, &url).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&storefront).await?,
            OrdersAction::Show { order_id } => {
                commands::orders::show(&storefront, &order_id.into()).await?;
            }
            OrdersAction::Cancel { order_id, reason } => {
                commands::orders::cancel(&storefront, &order_id.into(), &reason).await?;
            }
            OrdersAction::Checkout(args) => commands::orders::checkout(&storefront, args).await?,
        },
        Commands::Bookings { action } => match action {
            BookingsAction::Availability {
                date,
                location,
                artist_type,
            } => {
                commands::bookings::availability(&storefront, date, location, artist_type).await?;
            }
            BookingsAction::Create(args) => commands::bookings::create(&storefront, args).await?,
            BookingsAction::List => commands::bookings::list(&storefront).await?,
            BookingsAction::Show { booking_id } => {
                commands::bookings::show(&storefront, &booking_id.into()).await?;
            }
            BookingsAction::Cancel { booking_id, reason } => {
                commands::bookings::cancel(&storefront, &booking_id.into(), &reason).await?;
            }
        },
        Commands::Health => commands::health(&storefront).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_cart_set() {
        let cli = Cli::try_parse_from(["lulu", "cart", "set", "p1", "3"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Set { quantity: 3, .. }
            }
        ));
    }

    #[test]
    fn test_parses_social_provider() {
        let cli = Cli::try_parse_from(["lulu", "auth", "social-url", "Google"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthAction::SocialUrl {
                    provider: SocialProvider::Google
                }
            }
        ));
    }
}
