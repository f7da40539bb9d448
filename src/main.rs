//! storefront: browse a storefront catalog and cart from the terminal
//!
//! Usage:
//!   storefront products [--q TEXT] [--category NAME] [--min PRICE] [--max PRICE]
//!                       [--sort price_asc|price_desc] [--page N]
//!   storefront product <id>
//!   storefront cart
//!   storefront shell    - interactive session that keeps its cart cookie
//!   storefront help
//!
//! The storefront origin comes from `STOREFRONT_BASE_URL`.

use std::process::ExitCode;
use storefront_client::catalog::{FilterUpdate, SortOrder};
use storefront_client::render::TerminalView;
use storefront_client::{create_storefront, ClientConfig, Storefront, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type TerminalStorefront = Storefront<TerminalView, TerminalView, TerminalView>;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging (RUST_LOG overrides the default level)
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront_client=info")),
        )
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_help();
        return ExitCode::SUCCESS;
    };

    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = ClientConfig::from_env();
    tracing::debug!("using storefront at {}", config.base_url);

    let storefront = match create_storefront(
        config,
        TerminalView::new(),
        TerminalView::new(),
        TerminalView::new(),
    ) {
        Ok(storefront) => storefront,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = match command.as_str() {
        "products" => match parse_listing_flags(&args[1..]) {
            Ok((update, page)) => {
                storefront.catalog().open_at(update, page).await;
                ExitCode::SUCCESS
            }
            Err(msg) => usage_error(&msg),
        },
        "product" => match parse_id(args.get(1)) {
            Ok(id) => {
                storefront.handle(UiEvent::ViewDetail(id)).await;
                ExitCode::SUCCESS
            }
            Err(msg) => usage_error(&msg),
        },
        "cart" => {
            storefront.handle(UiEvent::OpenCart).await;
            ExitCode::SUCCESS
        }
        "shell" => {
            run_shell(&storefront).await;
            ExitCode::SUCCESS
        }
        _ => usage_error(&format!("Unknown command: {}", command)),
    };

    storefront.close().await;
    code
}

fn print_help() {
    println!("storefront - browse a storefront from the terminal\n");
    println!("Usage: storefront <command>\n");
    println!("Commands:");
    println!("  products [--q TEXT] [--category NAME] [--min PRICE] [--max PRICE]");
    println!("           [--sort price_asc|price_desc] [--page N]");
    println!("  product <id>  Show one product");
    println!("  cart          Show the cart");
    println!("  shell         Interactive session (cart survives between commands)");
    println!("  help          Show this help message");
    println!("\nSet STOREFRONT_BASE_URL to point at the store.");
}

fn usage_error(msg: &str) -> ExitCode {
    eprintln!("Error: {}", msg);
    eprintln!("Run 'storefront help' for usage");
    ExitCode::FAILURE
}

fn parse_id(raw: Option<&String>) -> Result<u64, String> {
    let raw = raw.ok_or_else(|| "missing product id".to_string())?;
    raw.parse()
        .map_err(|_| format!("invalid product id: {}", raw))
}

/// Parses `products` flags into one filter update and a page
fn parse_listing_flags(flags: &[String]) -> Result<(FilterUpdate, u32), String> {
    let mut update = FilterUpdate::default();
    let mut min = String::new();
    let mut max = String::new();
    let mut page = 1;

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--q" => update.text = Some(value.trim().to_string()),
            "--category" => update.category = Some(value.clone()),
            "--min" => min = value.clone(),
            "--max" => max = value.clone(),
            "--sort" => update.sort = Some(SortOrder::parse(value)),
            "--page" => {
                page = value
                    .parse()
                    .map_err(|_| format!("invalid page: {}", value))?
            }
            _ => return Err(format!("unknown flag: {}", flag)),
        }
    }

    let prices = FilterUpdate::price_range(&min, &max);
    update.price_min = prices.price_min;
    update.price_max = prices.price_max;
    Ok((update, page))
}

/// Reads commands from stdin until EOF or `quit`
async fn run_shell(storefront: &TerminalStorefront) {
    println!("Type 'help' for commands, 'quit' to leave.");
    storefront.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("could not read stdin: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        match parse_shell_line(line) {
            Ok(event) => storefront.handle(event).await,
            Err(msg) => eprintln!("{}", msg),
        }
    }
}

fn parse_shell_line(line: &str) -> Result<UiEvent, String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let id = || -> Result<u64, String> {
        rest.parse()
            .map_err(|_| format!("expected a product id, got {:?}", rest))
    };

    match command {
        "search" => Ok(UiEvent::SearchInput(rest.to_string())),
        "category" => Ok(UiEvent::CategorySelected(rest.to_string())),
        "price" => {
            let mut bounds = rest.split_whitespace();
            Ok(UiEvent::PriceApplied {
                min: bounds.next().unwrap_or_default().to_string(),
                max: bounds.next().unwrap_or_default().to_string(),
            })
        }
        "sort" => Ok(UiEvent::SortChanged(rest.to_string())),
        "page" => rest
            .parse()
            .map(UiEvent::PageSelected)
            .map_err(|_| format!("expected a page number, got {:?}", rest)),
        "view" => id().map(UiEvent::ViewDetail),
        "add" => id().map(UiEvent::AddToCart),
        "remove" => id().map(UiEvent::RemoveFromCart),
        "cart" => Ok(UiEvent::OpenCart),
        "help" => Err(
            "commands: search TEXT | category NAME | price MIN MAX | sort ORDER | page N | \
             view ID | add ID | remove ID | cart | quit"
                .to_string(),
        ),
        _ => Err(format!("unknown command: {}", command)),
    }
}
