//! Static `AuthN` plugin module.

use std::collections::HashSet;
use std::sync::Arc;

use authn_provider_sdk::{AuthenticationService, SessionFactory};
use tracing::{info, warn};

use crate::config::StaticAuthNPluginConfig;
use crate::domain::{InMemorySessionFactory, Service};

/// Static `AuthN` plugin.
///
/// Validates the configuration and hands out the collaborators the
/// credential authenticator is built from.
pub struct StaticAuthNPlugin {
    service: Arc<Service>,
    sessions: Arc<InMemorySessionFactory>,
}

impl StaticAuthNPlugin {
    /// Build the plugin from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if two accounts share an email address or an account
    /// has a blank email.
    pub fn new(cfg: &StaticAuthNPluginConfig) -> anyhow::Result<Self> {
        info!("Initializing static_authn_plugin");

        let mut seen = HashSet::new();
        for account in &cfg.accounts {
            let email = account.email.trim().to_lowercase();
            if email.is_empty() {
                anyhow::bail!("static_authn account with blank email");
            }
            if !seen.insert(email) {
                anyhow::bail!("duplicate static_authn account: {}", account.email);
            }
        }

        let implicit_networks = cfg.networks.iter().filter(|n| n.email.is_some()).count();
        if implicit_networks > 0 {
            warn!(
                networks = implicit_networks,
                "Implicit authentication by network is enabled; requests from these \
                 networks are logged in without credentials"
            );
        }

        let service = Service::from_config(cfg);
        let disabled = service.disabled_implicit_networks();
        if disabled > 0 {
            warn!(
                networks = disabled,
                "Trusted networks assign accounts that may not log in; implicit \
                 authentication is refused for them"
            );
        }
        info!(
            accounts = service.account_count(),
            networks = service.network_count(),
            "Loaded plugin configuration"
        );

        Ok(Self {
            service: Arc::new(service),
            sessions: Arc::new(InMemorySessionFactory::new()),
        })
    }

    #[must_use]
    pub fn authentication_service(&self) -> Arc<dyn AuthenticationService> {
        self.service.clone()
    }

    #[must_use]
    pub fn session_factory(&self) -> Arc<dyn SessionFactory> {
        self.sessions.clone()
    }

    /// Number of sessions opened so far.
    #[must_use]
    pub fn sessions_opened(&self) -> u64 {
        self.sessions.opened()
    }
}
