//! This module provides reusable test utilities:
//! - Mock HTTP servers (token endpoint, webhook)
//! - Recording and failing collaborators for the notifier traits
//! - Test configuration builders
//! - Common test data

// Each test binary uses a different subset of the fixtures
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod collaborators;
pub mod mock_token_endpoint;
pub mod mock_webhook;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use collaborators::*;
pub use mock_token_endpoint::MockTokenEndpoint;
pub use mock_webhook::MockWebhookServer;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
