//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod community;
pub mod config;
pub mod migrate;
pub mod orders;
pub mod profile;
pub mod review;

use clap::{Args, Subcommand};
use levelup_commerce::search::SortOption;

/// Tag storefront failures with their stable code, e.g. `[EMPTY] cart is empty`.
pub trait WithCode<T> {
    fn coded(self) -> anyhow::Result<T>;
}

impl<T> WithCode<T> for levelup_storefront::Result<T> {
    fn coded(self) -> anyhow::Result<T> {
        self.map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
    }
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Text to look for in name, description or code.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Highest price, in CLP.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Sort order: relevancia, precio_asc, precio_desc, nombre_asc.
    #[arg(long, default_value = "relevancia")]
    pub sort: SortOption,

    /// Read the category from a page link such as `catalogo.html?cat=Mouse`.
    #[arg(long)]
    pub link: Option<String>,

    /// List the categories instead of products.
    #[arg(long)]
    pub categories: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product code.
    pub code: Option<String>,

    /// Read the code from a page link such as `producto.html?code=JM001`.
    #[arg(long)]
    pub link: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals.
    Show,
    /// Add units of a product.
    Add {
        /// Product code.
        code: String,
        /// Units to add.
        #[arg(default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set a line's quantity; below 1 removes it.
    Set {
        /// Product code.
        code: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a line.
    Remove {
        /// Product code.
        code: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Password; prompted for when absent.
    #[arg(long)]
    pub password: Option<String>,

    /// Birthdate, YYYY-MM-DD.
    #[arg(long)]
    pub birthdate: Option<String>,

    /// Shipping address.
    #[arg(long, default_value = "")]
    pub address: String,

    /// Mobile phone, 9 digits starting with 9.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Favourite game genres.
    #[arg(long, default_value = "")]
    pub preferences: String,

    /// A friend's referral code.
    #[arg(long)]
    pub referral: Option<String>,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address; defaults to the remembered one.
    #[arg(long)]
    pub email: Option<String>,

    /// Password; prompted for when absent.
    #[arg(long)]
    pub password: Option<String>,

    /// Remember the email for next time.
    #[arg(short, long)]
    pub remember: bool,
}

/// Arguments for the profile command.
#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show profile, points and tier.
    Show,
    /// Change profile fields.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// YYYY-MM-DD.
        #[arg(long)]
        birthdate: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        preferences: Option<String>,
    },
    /// Delete the account.
    Delete {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// List your orders, newest first.
    History,
}

/// Arguments for the receipt command.
#[derive(Args)]
pub struct ReceiptArgs {
    /// Order id; defaults to the last order.
    pub order_id: Option<String>,

    /// Read the order id from a page link such as `boleta.html?orderId=...`.
    #[arg(long)]
    pub link: Option<String>,
}

/// Arguments for the review command.
#[derive(Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// List a product's reviews.
    List {
        /// Product code.
        code: String,
    },
    /// Review a product.
    Add {
        /// Product code.
        code: String,
        /// Stars, 1 to 5.
        #[arg(short, long)]
        rating: u8,
        /// Review text.
        #[arg(short, long)]
        text: String,
        /// Name to show; defaults to the signed-in user's.
        #[arg(long)]
        name: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Ask a yes/no question, defaulting to no.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Use `value` if given, otherwise prompt for it.
pub fn prompt_text(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Use `value` if given, otherwise prompt without echo.
pub fn prompt_password(value: Option<String>, confirm: bool) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let mut prompt = dialoguer::Password::new().with_prompt("Contraseña");
    if confirm {
        prompt = prompt.with_confirmation("Repite la contraseña", "Las contraseñas no coinciden");
    }
    Ok(prompt.interact()?)
}
