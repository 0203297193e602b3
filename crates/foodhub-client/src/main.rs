use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use foodhub_client::config::Config;
use foodhub_client::db::SqliteStore;
use foodhub_client::models::Meal;
use foodhub_client::routes::auth::{LoginPage, RegisterPage};
use foodhub_client::routes::meals::{MealBrowser, MealCard};
use foodhub_client::routes::nav::NavBar;
use foodhub_client::routes::Route;
use foodhub_client::services::listing::CATEGORIES;
use foodhub_client::{ApiClient, SessionRepository, SessionStore};

#[derive(Parser)]
#[command(name = "foodhub")]
#[command(version, about = "FoodHub marketplace client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin (overrides FOODHUB_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Local storage file (overrides FOODHUB_STORAGE_PATH)
    #[arg(long)]
    storage_path: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Register as a meal provider instead of a customer
        #[arg(long)]
        provider: bool,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse meals
    Meals {
        /// Filter by meal or provider name
        #[arg(short, long, default_value = "")]
        search: String,
        /// Highlighted category
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// List providers
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foodhub_client=info,foodhub=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.api_url, cli.storage_path);
    tracing::debug!("Using backend {}", config.api_url);

    let api = ApiClient::new(&config.api_url);
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(SessionStore::new(SqliteStore::open(&config.storage_path)?));

    match cli.command {
        Commands::Login { email, password } => {
            let mut page = LoginPage::new(email, password);
            match page.submit(&api, sessions.as_ref()).await {
                Some(route) => println!("Signed in. Continue at {route}"),
                None => bail!(page.error.unwrap_or_default()),
            }
        }
        Commands::Register {
            name,
            email,
            password,
            provider,
        } => {
            let mut page = RegisterPage::new(provider.then_some("provider"));
            page.form.name = name;
            page.form.email = email;
            page.form.password = password;
            match page.submit(&api).await {
                Some(route) => println!("Account created. Sign in at {route}"),
                None => bail!(page.error.unwrap_or_default()),
            }
        }
        Commands::Logout => {
            let mut nav = NavBar::new(sessions);
            let route = nav.logout()?;
            println!("Signed out. Back to {route}");
        }
        Commands::Whoami => {
            let nav = NavBar::new(sessions);
            match nav.user() {
                Some(user) => println!("{} ({}, id {})", user.name, user.role, user.id),
                None => println!("Not signed in"),
            }
        }
        Commands::Meals { search, category } => {
            let mut browser = MealBrowser::new();
            browser.load(&api).await?;
            browser.listing.set_search_query(search);
            browser.listing.select_category(category);

            print_categories(browser.listing.selected_category());
            let sections = browser.listing.sections();
            print_section("Daily Deals", &sections.deals, true);
            print_section("Special Combos", &sections.combos, false);
            print_section("Recommended for you", &sections.recommended, false);

            println!("\nTop Providers");
            for provider in sections.top_providers {
                println!("  {}  {}", provider.user.name, Route::Provider(provider.id));
            }
        }
        Commands::Providers => {
            for provider in api.fetch_providers().await? {
                println!("{:>5}  {}", provider.id, provider.user.name);
            }
        }
    }

    Ok(())
}

fn print_categories(selected: &str) {
    let chips: Vec<String> = CATEGORIES
        .iter()
        .map(|c| if *c == selected { format!("[{c}]") } else { c.to_string() })
        .collect();
    println!("{}", chips.join("  "));
}

fn print_section(title: &str, meals: &[&Meal], is_deal: bool) {
    if meals.is_empty() {
        return;
    }
    println!("\n{title}");
    for meal in meals {
        let card = MealCard::new(meal, is_deal);
        println!("  {}  {}", meal.name, card.price_label());
        println!("      {}", card.description());
    }
}
