//! Level-Up CLI - the Level-Up Gamer storefront in a terminal.
//!
//! Commands:
//! - `levelup catalog` / `levelup product` - Browse products
//! - `levelup cart` - Show and edit the cart
//! - `levelup register` / `login` / `logout` - Accounts
//! - `levelup profile` - Profile, points and order history
//! - `levelup checkout` / `receipt` - Place orders and show receipts
//! - `levelup review` - Product reviews
//! - `levelup community` - Community fund and events
//! - `levelup migrate` - Upgrade a store written by an older version
//! - `levelup config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, CatalogArgs, ConfigArgs, LoginArgs, ProductArgs, ProfileArgs, ReceiptArgs,
    RegisterArgs, ReviewArgs,
};

/// Level-Up Gamer storefront
#[derive(Parser)]
#[command(name = "levelup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Store file path (overrides the config)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and search products
    Catalog(CatalogArgs),

    /// Show one product with related items and reviews
    Product(ProductArgs),

    /// Show and edit the cart
    Cart(CartArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign in
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show and edit your profile
    Profile(ProfileArgs),

    /// Buy what is in the cart
    Checkout,

    /// Show an order receipt
    Receipt(ReceiptArgs),

    /// Read and write product reviews
    Review(ReviewArgs),

    /// Community fund and upcoming events
    Community,

    /// Upgrade the store from older key layouts
    Migrate,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.store.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Product(args) => commands::catalog::run_product(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Register(args) => commands::account::register(args, &ctx),
        Commands::Login(args) => commands::account::login(args, &ctx),
        Commands::Logout => commands::account::logout(&ctx),
        Commands::Profile(args) => commands::profile::run(args, &ctx),
        Commands::Checkout => commands::orders::checkout(&ctx),
        Commands::Receipt(args) => commands::orders::receipt(args, &ctx),
        Commands::Review(args) => commands::review::run(args, &ctx),
        Commands::Community => commands::community::run(&ctx),
        Commands::Migrate => commands::migrate::run(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
