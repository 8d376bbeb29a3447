use super::{build_validator, load_index, AppError};
use crate::{
    config::{AppConfig, RedirectMode},
    server,
};
use clap::{Parser, Subcommand};

/// jurisdiction validation service for California sales & use tax districts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TaxLookupCliArguments {
    /// TOML configuration file. environment variables override its values.
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// select the operation to run
    #[command(subcommand)]
    pub op: TaxLookupOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TaxLookupOperation {
    /// serves the jurisdiction validation API and lookup form
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// tax district dataset (.shp, .csv or .geojson)
        #[arg(short, long)]
        dataset: Option<String>,
    },
    /// serves the front end of a retired deployment, sending visitors
    /// to the new location
    Redirect {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// URL of the new deployment
        #[arg(short, long)]
        target_url: Option<String>,
        #[arg(short, long, value_enum)]
        mode: Option<RedirectMode>,
    },
    /// geocodes an address and prints every tax district at that location
    Lookup {
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        dataset: Option<String>,
    },
    /// checks an address against a claimed jurisdiction, e.g. "City of Sacramento"
    Validate {
        #[arg(short, long)]
        address: String,
        #[arg(short, long)]
        jurisdiction: String,
        #[arg(short, long)]
        dataset: Option<String>,
    },
    /// loads the tax district dataset and prints a summary of it
    Inspect {
        #[arg(short, long)]
        dataset: Option<String>,
    },
}

impl TaxLookupOperation {
    /// applies command line overrides on top of the loaded configuration.
    pub fn configure(&self, mut config: AppConfig) -> Result<AppConfig, AppError> {
        match self {
            TaxLookupOperation::Serve {
                host,
                port,
                dataset,
            } => {
                override_listen(&mut config, host, port);
                override_dataset(&mut config, dataset);
            }
            TaxLookupOperation::Redirect {
                host,
                port,
                target_url,
                mode,
            } => {
                override_listen(&mut config, host, port);
                if let Some(url) = target_url {
                    config.redirect.target_url = url.clone();
                }
                if let Some(mode) = mode {
                    config.redirect.mode = *mode;
                }
            }
            TaxLookupOperation::Lookup { dataset, .. }
            | TaxLookupOperation::Validate { dataset, .. }
            | TaxLookupOperation::Inspect { dataset } => override_dataset(&mut config, dataset),
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn run(&self, config: AppConfig) -> Result<(), AppError> {
        let config = self.configure(config)?;
        match self {
            TaxLookupOperation::Serve { .. } => {
                let validator = build_validator(&config).await?;
                let router = server::lookup_routes(validator, &config.server.health_path);
                server::serve(router, &config.server.host, config.server.port).await
            }
            TaxLookupOperation::Redirect { .. } => {
                log::info!(
                    "redirecting to {} ({})",
                    config.redirect.target_url,
                    config.redirect.mode
                );
                let router = server::redirect_routes(&config.redirect)?;
                server::serve(router, &config.server.host, config.server.port).await
            }
            TaxLookupOperation::Lookup { address, .. } => {
                let validator = build_validator(&config).await?;
                let outcome = validator.lookup(address).await;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(())
            }
            TaxLookupOperation::Validate {
                address,
                jurisdiction,
                ..
            } => {
                let validator = build_validator(&config).await?;
                let outcome = validator.validate(address, jurisdiction).await;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                Ok(())
            }
            TaxLookupOperation::Inspect { .. } => {
                let index = load_index(&config.dataset).await?;
                println!("{}", serde_json::to_string_pretty(&index.summary())?);
                Ok(())
            }
        }
    }
}

fn override_listen(config: &mut AppConfig, host: &Option<String>, port: &Option<u16>) {
    if let Some(host) = host {
        config.server.host = host.clone();
    }
    if let Some(port) = port {
        config.server.port = *port;
    }
}

fn override_dataset(config: &mut AppConfig, dataset: &Option<String>) {
    if let Some(file) = dataset {
        config.dataset.file = file.clone();
    }
}
