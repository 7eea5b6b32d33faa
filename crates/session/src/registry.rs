//! Stop flag and single-session enforcement.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use gesturemouse_common::error::{GestureMouseError, GestureMouseResult};

/// Cooperative "keep running" flag shared between a frame loop and its
/// supervisor. Read once per loop iteration.
#[derive(Debug, Clone)]
pub struct ActiveFlag(Arc<AtomicBool>);

impl ActiveFlag {
    /// A new flag in the active state.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Request a stop; takes effect at the next frame boundary.
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for ActiveFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Admits at most one session at a time.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    held: Arc<AtomicBool>,
}

static GLOBAL_REGISTRY: OnceLock<SessionRegistry> = OnceLock::new();

impl SessionRegistry {
    /// A registry independent of the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static SessionRegistry {
        GLOBAL_REGISTRY.get_or_init(SessionRegistry::new)
    }

    /// Claim the registry. Fails while another lease is alive.
    pub fn acquire(&self) -> GestureMouseResult<SessionLease> {
        self.held
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| GestureMouseError::SessionAlreadyActive)?;
        Ok(SessionLease {
            held: Arc::clone(&self.held),
        })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

/// Proof of the single active session; released on drop.
#[derive(Debug)]
pub struct SessionLease {
    held: Arc<AtomicBool>,
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.held.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected_until_release() {
        let registry = SessionRegistry::new();
        let lease = registry.acquire().unwrap();
        assert!(registry.is_held());
        assert!(matches!(
            registry.acquire(),
            Err(GestureMouseError::SessionAlreadyActive)
        ));

        drop(lease);
        assert!(!registry.is_held());
        assert!(registry.acquire().is_ok());
    }

    #[test]
    fn test_clones_share_the_lease() {
        let registry = SessionRegistry::new();
        let other = registry.clone();
        let _lease = registry.acquire().unwrap();
        assert!(other.acquire().is_err());
    }

    #[test]
    fn test_active_flag_stop_is_shared() {
        let flag = ActiveFlag::new();
        let worker = flag.clone();
        assert!(worker.is_active());
        flag.stop();
        assert!(!worker.is_active());
    }
}
