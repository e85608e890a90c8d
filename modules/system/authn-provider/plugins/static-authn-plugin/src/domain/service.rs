//! Service implementation for the static `AuthN` plugin.

use std::collections::HashMap;
use std::net::IpAddr;

use authn_provider_sdk::{AuthStatus, Group, Principal};
use ipnet::IpNet;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::config::StaticAuthNPluginConfig;

/// Static `AuthN` service.
///
/// Holds the configured accounts and trusted networks:
/// - explicit authentication checks a password account
/// - implicit authentication binds the account assigned to the caller's network
/// - special groups are granted per network
pub struct Service {
    accounts: HashMap<String, Account>,
    networks: Vec<Network>,
}

struct Account {
    principal: Principal,
    password: SecretString,
    can_log_in: bool,
}

struct Network {
    cidr: IpNet,
    principal: Option<Principal>,
    /// False when the assigned account is configured with `can_log_in: false`.
    can_log_in: bool,
    groups: Vec<Group>,
}

impl Service {
    /// Create a service from plugin configuration.
    ///
    /// Group names map to one id across all networks. Later accounts with a
    /// duplicate email replace earlier ones.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        let accounts: HashMap<String, Account> = cfg
            .accounts
            .iter()
            .map(|a| {
                let principal = Principal::new(
                    a.id.unwrap_or_else(Uuid::new_v4),
                    Some(a.email.clone()),
                );
                let account = Account {
                    principal,
                    password: a.password.clone(),
                    can_log_in: a.can_log_in,
                };
                (normalize(&a.email), account)
            })
            .collect();

        let mut groups_by_name: HashMap<&str, Group> = HashMap::new();
        let networks = cfg
            .networks
            .iter()
            .map(|n| {
                let account = n
                    .email
                    .as_deref()
                    .and_then(|email| accounts.get(&normalize(email)));
                let principal = n.email.as_deref().map(|email| {
                    account.map_or_else(
                        || Principal::new(Uuid::new_v4(), Some(email.to_owned())),
                        |account| account.principal.clone(),
                    )
                });
                let can_log_in = account.is_none_or(|account| account.can_log_in);
                let groups = n
                    .groups
                    .iter()
                    .map(|name| {
                        groups_by_name
                            .entry(name.as_str())
                            .or_insert_with(|| Group::new(Uuid::new_v4(), name.as_str()))
                            .clone()
                    })
                    .collect();
                Network {
                    cidr: n.cidr,
                    principal,
                    can_log_in,
                    groups,
                }
            })
            .collect();

        Self { accounts, networks }
    }

    /// Principal assigned to the first trusted network containing `addr`.
    ///
    /// `None` when no network assigns one, or when the assigned account may
    /// not log in.
    #[must_use]
    pub fn implicit_principal(&self, addr: IpAddr) -> Option<&Principal> {
        let network = self
            .networks
            .iter()
            .find(|n| n.cidr.contains(&addr) && n.principal.is_some())?;
        if !network.can_log_in {
            return None;
        }
        network.principal.as_ref()
    }

    /// Number of trusted networks that assign an account which may not log in.
    #[must_use]
    pub fn disabled_implicit_networks(&self) -> usize {
        self.networks
            .iter()
            .filter(|n| n.principal.is_some() && !n.can_log_in)
            .count()
    }

    /// Check a name/secret pair.
    ///
    /// # Errors
    ///
    /// - `BadArgs` for a blank name or a disabled account
    /// - `NoSuchUser` for an unknown name
    /// - `BadCredentials` for a wrong password
    pub fn verify(&self, name: &str, secret: &SecretString) -> Result<&Principal, AuthStatus> {
        if name.trim().is_empty() {
            return Err(AuthStatus::BadArgs);
        }
        let account = self
            .accounts
            .get(&normalize(name))
            .ok_or(AuthStatus::NoSuchUser)?;
        if !account.can_log_in {
            return Err(AuthStatus::BadArgs);
        }

        let expected = account.password.expose_secret().as_bytes();
        let given = secret.expose_secret().as_bytes();
        if bool::from(expected.ct_eq(given)) {
            Ok(&account.principal)
        } else {
            Err(AuthStatus::BadCredentials)
        }
    }

    /// Groups granted to every network containing `addr`, without duplicates.
    #[must_use]
    pub fn groups_for(&self, addr: IpAddr) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for group in self
            .networks
            .iter()
            .filter(|n| n.cidr.contains(&addr))
            .flat_map(|n| n.groups.iter())
        {
            if !groups.iter().any(|g| g.id == group.id) {
                groups.push(group.clone());
            }
        }
        groups
    }

    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn network_count(&self) -> usize {
        self.networks.len()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}
