use clap::{Parser, Subcommand};
use std::sync::Arc;

use merchant_console::application::dispatch::NotifyingHandler;
use merchant_console::application::errors::DashboardError;
use merchant_console::application::gate::{GateState, PlanGate};
use merchant_console::application::mutation::Mutation;
use merchant_console::application::query::QueryOptions;
use merchant_console::domain::entities::{menu_for, Commission, Money, PlanKey};
use merchant_console::infrastructure::adapters::ConsoleAdapter;
use merchant_console::infrastructure::api::endpoints::{self, control, shop_account};
use merchant_console::infrastructure::api::Binding;
use merchant_console::infrastructure::config::Config;
use merchant_console::Dashboard;

#[derive(Parser)]
#[command(name = "merchant-console")]
#[command(about = "Merchant dashboard data layer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// API base URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Run a read operation and print its data
    Get {
        /// Operation name, e.g. __listById
        operation: String,
        /// Resource id or filter for the operation
        #[arg(long)]
        id: Option<String>,
    },
    /// Approve a pending listing
    ApproveListing { id: String },
    /// Reject a pending listing
    RejectListing {
        id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Request a payout withdrawal
    Withdraw { amount: String },
    /// Show the navigation menu for a plan key
    Menu { plan: Option<String> },
    /// Evaluate the plan gate of a page
    Gate {
        required: String,
        current: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DashboardError> {
    match cli.command {
        Commands::Version => {
            println!("merchant-console v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        command => {
            let config = load_config(&cli.config, cli.api_url)?;
            let console = Arc::new(ConsoleAdapter::new());
            let dashboard = Dashboard::connect(config, console.clone(), console.clone())?;
            run_command(command, &dashboard, console).await
        }
    }
}

fn load_config(path: &str, api_url: Option<String>) -> Result<Config, DashboardError> {
    let mut config = if std::path::Path::new(path).exists() {
        Config::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };
    config.apply_env();

    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    config.validate()?;
    Ok(config)
}

async fn run_command(
    command: Commands,
    dashboard: &Dashboard,
    console: Arc<ConsoleAdapter>,
) -> Result<(), DashboardError> {
    match command {
        Commands::Get { operation, id } => get(dashboard, &operation, id.as_deref()).await,
        Commands::ApproveListing { id } => {
            let binding = Binding::new("approveListing", dashboard.api.clone(), |id: &String| {
                control::approve_listing(id)
            });
            let handler = NotifyingHandler::new(control::approve_profile(), dashboard.dispatcher.clone());
            Mutation::new(binding, Arc::new(handler)).mutate(id).await?;
            Ok(())
        }
        Commands::RejectListing { id, reason } => {
            let binding = Binding::new(
                "rejectListing",
                dashboard.api.clone(),
                |(id, reason): &(String, String)| control::reject_listing(id, reason),
            );
            let handler = NotifyingHandler::new(control::reject_profile(), dashboard.dispatcher.clone());
            Mutation::new(binding, Arc::new(handler)).mutate((id, reason)).await?;
            Ok(())
        }
        Commands::Withdraw { amount } => withdraw(dashboard, &amount).await,
        Commands::Menu { plan } => {
            let plan = plan
                .map(PlanKey::new)
                .unwrap_or_else(|| dashboard.config.merchant.plan.clone());
            for item in menu_for(&plan, &dashboard.config.plans) {
                println!("{:<20} {}", item.label, item.route.path());
            }
            Ok(())
        }
        Commands::Gate { required, current } => {
            let current = current
                .map(PlanKey::new)
                .unwrap_or_else(|| dashboard.config.merchant.plan.clone());
            let mut gate = PlanGate::new(PlanKey::new(required), console);
            match gate.evaluate(&current) {
                GateState::Allowed => println!("allowed"),
                GateState::Redirecting => println!("redirecting"),
            }
            Ok(())
        }
        Commands::Version | Commands::InitConfig => Ok(()),
    }
}

async fn get(dashboard: &Dashboard, operation: &str, id: Option<&str>) -> Result<(), DashboardError> {
    let (key, request) = endpoints::read(operation, id).ok_or_else(|| match id {
        None => DashboardError::MissingParam(format!("{} needs --id or is unknown", operation)),
        Some(_) => DashboardError::UnknownOperation(operation.to_string()),
    })?;

    let api = dashboard.api.clone();
    let fetcher = move || {
        let api = api.clone();
        let request = request.clone();
        async move { api.send(request).await }
    };

    let result = dashboard.queries.query(key, fetcher, QueryOptions::default()).await;
    if let Some(error) = result.error {
        dashboard.dispatcher.dispatch_error(&error);
        return Err(error.into());
    }

    let data = result.data.unwrap_or_default();
    println!(
        "{}",
        serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
    );
    Ok(())
}

async fn withdraw(dashboard: &Dashboard, amount: &str) -> Result<(), DashboardError> {
    let merchant = &dashboard.config.merchant;
    let amount = Money::parse(amount, merchant.currency.clone())
        .filter(|m| m.minor > 0)
        .ok_or_else(|| DashboardError::MissingParam(format!("invalid amount: {}", amount)))?;

    let commission = Commission::from_percent(merchant.commission_percent);
    println!(
        "amount {}, fee {}, payout {}",
        amount,
        commission.fee_for(&amount),
        commission.net_of(&amount)
    );

    let binding = Binding::new("requestWithdrawal", dashboard.api.clone(), |amount: &Money| {
        shop_account::request_withdrawal(amount)
    });
    let handler = NotifyingHandler::new(shop_account::withdrawal_profile(), dashboard.dispatcher.clone());
    Mutation::new(binding, Arc::new(handler)).mutate(amount).await?;
    Ok(())
}

fn init_config() -> Result<(), DashboardError> {
    let config = Config::default();
    println!("{}", config.to_yaml()?);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
