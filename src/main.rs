//! Demo client: lists prices, toggles EUR display and shows a detail view.

use clap::Parser;
use crypto_list_sdk::{
    app, constants::DEFAULT_LOG_FILTER, AppConfig, CryptoListViewModel, DetailViewModel,
    SettingsViewModel,
};
use tracing_subscriber::EnvFilter;

/// Crypto price list backed by bundled fixtures
#[derive(Parser, Debug)]
#[clap(name = "crypto-list", version, about, long_about = None)]
struct Args {
    /// Only list assets whose name, symbol or tag contains this text
    #[clap(short, long)]
    search: Option<String>,

    /// Flip the EUR display setting after the first listing
    #[clap(long = "toggle-eur")]
    toggle_eur: bool,

    /// Show the detail view for the asset with this id
    #[clap(short, long, value_name = "ID")]
    detail: Option<i64>,
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn print_list(list: &CryptoListViewModel) {
    println!("\n{:-<60}", "");
    if let Some(message) = list.error_message() {
        println!("Error: {}", message);
        return;
    }

    for item in list.items() {
        let eur = item.eur_price.as_deref().unwrap_or("");
        println!(
            "{:>3} {:<12} {:<4} {:>16} {:>16}  [{}]",
            item.id,
            item.name,
            item.symbol,
            item.usd_price,
            eur,
            item.tags.join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing()?;

    let config = AppConfig::from_env()?;
    let container = app::build_container(&config);

    let mut list = CryptoListViewModel::new(&container)?;
    let mut settings = SettingsViewModel::new(&container)?;

    if let Some(search) = &args.search {
        list.set_search_text(search.as_str());
    }
    list.refresh().await;
    println!("EUR display: {}", settings.support_eur());
    print_list(&list);

    if args.toggle_eur {
        let support_eur = settings.toggle_support_eur();
        list.apply_flag_changes().await;
        println!("\nEUR display: {}", support_eur);
        print_list(&list);
    }

    if let Some(id) = args.detail {
        match list.items().iter().find(|item| item.id == id) {
            Some(item) => {
                let detail = DetailViewModel::new(item.clone(), &container)?;
                println!("\n{}\n{}", detail.token_name(), detail.formatted_prices());
            }
            None => println!("\nNo listed asset with id {}", id),
        }
    }

    Ok(())
}
