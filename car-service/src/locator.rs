//! Logical service name to base URL resolution.

use std::collections::HashMap;

/// Logical name the client service registers under.
pub const CLIENT_SERVICE: &str = "SERVICE-CLIENT";

pub trait ServiceLocator: Send + Sync {
    /// Base URL for `service`, or `None` when nothing is registered.
    fn locate(&self, service: &str) -> Option<String>;
}

/// Fixed name-to-address table, filled from configuration at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    services: HashMap<String, String>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, service: &str, base_url: &str) -> Self {
        self.services.insert(service.to_string(), base_url.to_string());
        self
    }
}

impl ServiceLocator for StaticLocator {
    fn locate(&self, service: &str) -> Option<String> {
        self.services.get(service).cloned()
    }
}
