use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod db;
mod domain;
mod errors;
mod exports;
mod model_eval;
mod scraper;

#[cfg(test)]
mod tests;

fn main() {
    // .env is optional; CL_* variables may also come from the shell.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cl_rentals=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    if let Err(e) = cli::run(cli) {
        tracing::error!("❌ {e}");
        std::process::exit(1);
    }
}
