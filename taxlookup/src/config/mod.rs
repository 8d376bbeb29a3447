mod app_config;
mod dataset_config;
mod geocoder_config;
mod redirect_config;
mod server_config;

pub use app_config::AppConfig;
pub use dataset_config::DatasetConfig;
pub use geocoder_config::GeocoderConfig;
pub use redirect_config::{RedirectConfig, RedirectMode};
pub use server_config::ServerConfig;
