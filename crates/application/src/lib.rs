//! Ports and use cases of the relaydns forwarding cache.
pub mod ports;
pub mod use_cases;
