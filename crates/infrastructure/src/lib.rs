//! Wire format, UDP transport and in-memory state of the relaydns forwarder.
pub mod dns;
