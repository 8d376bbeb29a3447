use clap::Parser;
use env_logger::Env;
use std::path::Path;
use taxlookup::{app::TaxLookupCliArguments, config::AppConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = TaxLookupCliArguments::parse();
    log::debug!("taxlookup started at {}", chrono::Local::now().to_rfc3339());
    let config = match AppConfig::load(args.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed loading taxlookup configuration: {e}");
            std::process::exit(1);
        }
    };
    match args.op.run(config).await {
        Ok(_) => log::debug!("finished."),
        Err(e) => {
            log::error!("failed running taxlookup: {e}");
            std::process::exit(1);
        }
    }
}
