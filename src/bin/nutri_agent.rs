// Terminal entry point for the nutritional risk agent
//
// Usage: cargo run --bin nutri_agent
// Configuration: NUTRI_DB_PATH, NUTRI_SEED_CSV, NUTRI_REPORT_CSV,
// NUTRI_THRESHOLDS, NUTRI_CLEAR_SCREEN, RUST_LOG

use nutri_risk_agent::app::bootstrap;
use nutri_risk_agent::menu::Menu;
use nutri_risk_agent::{AppConfig, RuleEngine};
use owo_colors::OwoColorize;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr so the menu owns stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutri_risk_agent=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("{} {:#}", "ERRO CRÍTICO NA EXECUÇÃO:".bright_red(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  DB: {}", config.db_path.display());
    tracing::info!("  SEED CSV: {}", config.seed_csv.display());
    tracing::info!("  REPORT CSV: {}", config.report_csv.display());

    let thresholds = config.load_thresholds()?;
    tracing::info!(?thresholds, "thresholds loaded");

    println!("\n--- INICIALIZAÇÃO DO SISTEMA ---");
    let db = bootstrap(&config)?;
    println!("--- BANCO DE DADOS PRONTO ---\n");

    let stdin = io::stdin();
    let engine = RuleEngine::new(thresholds);
    let result = Menu::new(&db, engine, &config, stdin.lock(), io::stdout()).run();

    db.close()?;
    result
}
