#![allow(dead_code)]

mod mock_upstream;

pub use mock_upstream::{MockUpstream, UpstreamBehavior};
pub use relay::{RelayHarness, TestClient};
