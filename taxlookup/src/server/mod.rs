mod lookup_routes;
mod redirect_routes;
mod request_log;
mod serve;

pub use lookup_routes::lookup_routes;
pub use redirect_routes::redirect_routes;
pub use request_log::log_request;
pub use serve::{serve, shutdown_signal};
