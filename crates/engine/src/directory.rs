//! Employee directory.

use dashmap::DashMap;
use leavebook_core::policy::EmployeeProfile;
use leavebook_shared::types::EmployeeId;

/// Read access to employment facts owned by the identity provider.
pub trait EmployeeDirectory: Send + Sync {
    /// Profile for `employee_id`, if the employee exists.
    fn profile(&self, employee_id: EmployeeId) -> Option<EmployeeProfile>;
}

/// Directory backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: DashMap<EmployeeId, EmployeeProfile>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a profile.
    pub fn upsert(&self, profile: EmployeeProfile) {
        self.profiles.insert(profile.employee_id, profile);
    }

    /// Number of known employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no employee is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<EmployeeProfile> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = EmployeeProfile>>(iter: I) -> Self {
        let directory = Self::new();
        for profile in iter {
            directory.upsert(profile);
        }
        directory
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn profile(&self, employee_id: EmployeeId) -> Option<EmployeeProfile> {
        self.profiles.get(&employee_id).map(|p| p.value().clone())
    }
}
