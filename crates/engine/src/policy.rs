//! Versioned leave-policy registry.
//!
//! Settings are never edited in place. Each publish appends an immutable
//! snapshot with the next version number; older versions stay readable so
//! balances and applications can be explained against the policy they used.

use chrono::NaiveDate;
use leavebook_core::policy::{LeaveSettings, PolicySnapshot};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{EngineError, EngineResult};

/// Append-only store of policy snapshots.
#[derive(Debug)]
pub struct PolicyRegistry {
    snapshots: RwLock<Vec<Arc<PolicySnapshot>>>,
}

impl PolicyRegistry {
    /// Creates a registry whose version 1 is `settings`.
    ///
    /// # Errors
    ///
    /// Returns a policy error if the settings are invalid.
    pub fn new(settings: LeaveSettings, effective_date: NaiveDate) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            snapshots: RwLock::new(vec![Arc::new(PolicySnapshot {
                version: 1,
                effective_date,
                settings,
            })]),
        })
    }

    /// Latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Internal` if the registry is empty.
    pub fn current(&self) -> EngineResult<Arc<PolicySnapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .ok_or_else(|| EngineError::Internal("policy registry is empty".to_string()))
    }

    /// Snapshot with the given version.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` for an unknown version.
    pub fn get(&self, version: u32) -> EngineResult<Arc<PolicySnapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|s| s.version == version)
            .cloned()
            .ok_or_else(|| EngineError::not_found("policy version", version))
    }

    /// Publishes new settings as the next version.
    ///
    /// # Errors
    ///
    /// Returns a policy error if the settings are invalid.
    pub fn publish(
        &self,
        settings: LeaveSettings,
        effective_date: NaiveDate,
    ) -> EngineResult<Arc<PolicySnapshot>> {
        settings.validate()?;
        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        let version = snapshots.last().map_or(1, |s| s.version + 1);
        let snapshot = Arc::new(PolicySnapshot {
            version,
            effective_date,
            settings,
        });
        snapshots.push(Arc::clone(&snapshot));
        tracing::info!(version, %effective_date, "leave policy published");
        Ok(snapshot)
    }

    /// Every published version, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Arc<PolicySnapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
