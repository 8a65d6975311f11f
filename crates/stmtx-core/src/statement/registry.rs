//! Bank profile registry.

use std::collections::BTreeMap;

use tracing::debug;

use super::profiles::{BankProfile, PublicBank};
use crate::error::{Capability, ExtractionError};
use crate::models::config::StmtxConfig;

/// Immutable map from upper-cased bank name to its profile.
///
/// Built once (usually from [`StmtxConfig`]) and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, BankProfile>,
}

impl ProfileRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in profiles, using the configured layouts.
    pub fn from_config(config: &StmtxConfig) -> Self {
        Self::new()
            .with_profile(BankProfile::Public(PublicBank::new(config.layouts.public)))
            .with_profile(BankProfile::unimplemented("RHB"))
    }

    /// Add (or replace) a profile, keyed by its bank name.
    pub fn with_profile(mut self, profile: BankProfile) -> Self {
        self.profiles.insert(profile.bank_name().to_string(), profile);
        self
    }

    /// Registered bank names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Raw lookup, including unimplemented profiles.
    pub fn get(&self, bank: &str) -> Option<&BankProfile> {
        self.profiles.get(&bank.to_uppercase())
    }

    /// Select the profile to extract with.
    ///
    /// Unimplemented profiles are rejected here so the failure surfaces
    /// before any extraction work starts.
    pub fn select(&self, bank: &str) -> Result<&BankProfile, ExtractionError> {
        let name = bank.to_uppercase();
        let profile = self
            .profiles
            .get(&name)
            .ok_or_else(|| ExtractionError::ProfileNotRegistered(name.clone()))?;

        if !profile.is_implemented() {
            return Err(ExtractionError::UnimplementedProfile {
                capability: Capability::ProfileSelection,
                bank: name,
            });
        }

        debug!("Selected {} profile", name);
        Ok(profile)
    }
}
