//! Process-wide outside-click registry.
//!
//! Dismissing an open suggestion panel when the user clicks anywhere else
//! requires a global click listener. Attaching one listener per mounted
//! control would leak a listener per instance, so the registry ref-counts:
//! the first registered watcher attaches the host's real platform listener
//! (via [`ClickHook`]), the last deregistration detaches it, and every
//! dispatched outside click fans out to all registered watchers.
//!
//! The host side is two calls: install a [`ClickHook`] once with
//! [`set_platform_hook`], and call [`dispatch_outside_click`] from the
//! platform listener whenever a click lands outside a control. Controls
//! register themselves on first open and deregister on drop.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a registered outside-click watcher.
    pub struct OutsideClickId;
}

/// The host's real platform listener, attached and detached by ref-count.
pub trait ClickHook: Send + Sync {
    /// Attach the platform's global click listener.
    fn attach(&self);

    /// Detach the platform's global click listener.
    fn detach(&self);
}

type Watcher = Arc<dyn Fn() + Send + Sync>;

/// Ref-counted registry of outside-click watchers.
///
/// A process-wide instance backs the free functions in this module; the
/// struct itself is separate so behavior is testable in isolation.
#[derive(Default)]
pub struct OutsideClickRegistry {
    /// The platform listener, if the host installed one.
    hook: Option<Box<dyn ClickHook>>,
    /// Per-instance dismissal callbacks.
    watchers: SlotMap<OutsideClickId, Watcher>,
}

impl OutsideClickRegistry {
    /// Create an empty registry with no platform hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the platform listener hook.
    ///
    /// If watchers are already registered, the old hook (if any) is detached
    /// and the new one attached immediately, keeping exactly one platform
    /// listener alive.
    pub fn set_hook(&mut self, hook: Option<Box<dyn ClickHook>>) {
        if !self.watchers.is_empty() {
            if let Some(old) = &self.hook {
                old.detach();
            }
            if let Some(new) = &hook {
                new.attach();
            }
        }
        self.hook = hook;
    }

    /// Register a watcher; the first registration attaches the platform hook.
    pub fn register(&mut self, watcher: Watcher) -> OutsideClickId {
        let was_empty = self.watchers.is_empty();
        let id = self.watchers.insert(watcher);
        if was_empty {
            if let Some(hook) = &self.hook {
                hook.attach();
            }
            tracing::debug!(
                target: "horizon_typeahead::outside_click",
                "first watcher registered, platform listener attached"
            );
        }
        id
    }

    /// Deregister a watcher; the last deregistration detaches the platform hook.
    ///
    /// Returns `true` if the watcher was found and removed.
    pub fn deregister(&mut self, id: OutsideClickId) -> bool {
        let removed = self.watchers.remove(id).is_some();
        if removed && self.watchers.is_empty() {
            if let Some(hook) = &self.hook {
                hook.detach();
            }
            tracing::debug!(
                target: "horizon_typeahead::outside_click",
                "last watcher deregistered, platform listener detached"
            );
        }
        removed
    }

    /// Number of registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Snapshot the registered watchers for dispatch outside the lock.
    fn snapshot(&self) -> Vec<Watcher> {
        self.watchers.iter().map(|(_, w)| w.clone()).collect()
    }
}

/// Get the process-wide registry, initializing it if necessary.
fn global() -> &'static Mutex<OutsideClickRegistry> {
    static REGISTRY: OnceLock<Mutex<OutsideClickRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(OutsideClickRegistry::new()))
}

/// Install the host's platform listener hook on the process-wide registry.
pub fn set_platform_hook(hook: impl ClickHook + 'static) {
    global().lock().set_hook(Some(Box::new(hook)));
}

/// Remove the platform listener hook from the process-wide registry.
pub fn clear_platform_hook() {
    global().lock().set_hook(None);
}

/// Register an outside-click watcher on the process-wide registry.
pub fn register(watcher: impl Fn() + Send + Sync + 'static) -> OutsideClickId {
    global().lock().register(Arc::new(watcher))
}

/// Deregister a watcher from the process-wide registry.
pub fn deregister(id: OutsideClickId) -> bool {
    global().lock().deregister(id)
}

/// Number of watchers on the process-wide registry.
pub fn watcher_count() -> usize {
    global().lock().watcher_count()
}

/// Fan an outside click out to every registered watcher.
///
/// Called by the host's global click listener when a click lands outside a
/// control. Watchers are invoked outside the registry lock, so they may
/// register or deregister reentrantly.
pub fn dispatch_outside_click() {
    let watchers = global().lock().snapshot();
    tracing::trace!(
        target: "horizon_typeahead::outside_click",
        watcher_count = watchers.len(),
        "dispatching outside click"
    );
    for watcher in watchers {
        watcher();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHook {
        attached: AtomicUsize,
        detached: AtomicUsize,
    }

    impl ClickHook for Arc<CountingHook> {
        fn attach(&self) {
            self.attached.fetch_add(1, Ordering::SeqCst);
        }

        fn detach(&self) {
            self.detached.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_hook_attaches_on_first_and_detaches_on_last() {
        let hook = Arc::new(CountingHook::default());
        let mut registry = OutsideClickRegistry::new();
        registry.set_hook(Some(Box::new(hook.clone())));

        let a = registry.register(Arc::new(|| {}));
        let b = registry.register(Arc::new(|| {}));
        assert_eq!(hook.attached.load(Ordering::SeqCst), 1);
        assert_eq!(registry.watcher_count(), 2);

        assert!(registry.deregister(a));
        assert_eq!(hook.detached.load(Ordering::SeqCst), 0);

        assert!(registry.deregister(b));
        assert_eq!(hook.detached.load(Ordering::SeqCst), 1);
        assert_eq!(registry.watcher_count(), 0);

        // Re-registering attaches again.
        registry.register(Arc::new(|| {}));
        assert_eq!(hook.attached.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deregister_unknown_id_is_false() {
        let mut registry = OutsideClickRegistry::new();
        let id = registry.register(Arc::new(|| {}));
        assert!(registry.deregister(id));
        assert!(!registry.deregister(id));
    }

    #[test]
    fn test_replacing_hook_with_live_watchers_swaps_listener() {
        let first = Arc::new(CountingHook::default());
        let second = Arc::new(CountingHook::default());
        let mut registry = OutsideClickRegistry::new();
        registry.set_hook(Some(Box::new(first.clone())));

        registry.register(Arc::new(|| {}));
        assert_eq!(first.attached.load(Ordering::SeqCst), 1);

        registry.set_hook(Some(Box::new(second.clone())));
        assert_eq!(first.detached.load(Ordering::SeqCst), 1);
        assert_eq!(second.attached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_snapshot_invokes_all_watchers() {
        let mut registry = OutsideClickRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = count.clone();
            registry.register(Arc::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }

        for watcher in registry.snapshot() {
            watcher();
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}
