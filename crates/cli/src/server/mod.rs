pub mod dns;
pub mod signal;
pub mod web;

pub use dns::run_dns_server;
pub use signal::shutdown_signal;
pub use web::{bind_web_listener, serve_web};
