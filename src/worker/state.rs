//! Lifecycle states of the offline worker.

use std::fmt;

/// Deployment lifecycle of one worker version.
///
/// A version moves strictly forward: Installing -> Installed ->
/// Activating -> Active. A failed install never leaves Installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Seeding this version's cache store; not yet eligible to intercept.
    Installing,
    /// Fully seeded, waiting to take over interception.
    Installed,
    /// Pruning superseded stores before claiming traffic.
    Activating,
    /// Terminal operating state; intercepting requests.
    Active,
}

impl LifecycleState {
    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Active)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Installing => "installing",
            LifecycleState::Installed => "installed",
            LifecycleState::Activating => "activating",
            LifecycleState::Active => "active",
        };
        f.write_str(name)
    }
}
