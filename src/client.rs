//! Managed window bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use crate::display::WindowId;

/// Registry entry for one managed window.
#[derive(Debug, Clone)]
pub struct Client {
    /// Index of the owning monitor in registration order.
    pub monitor: usize,
    /// Virtual screen this window belongs to.
    pub vscreen: usize,
    /// Matches the configured priority class.
    pub special: bool,
}

/// Authoritative mapping from window id to its management state, plus the
/// set of currently visible windows.
///
/// Both collections are ordered by window id, which is the stable identity
/// order used for layout and focus cycling.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: BTreeMap<WindowId, Client>,
    visible: BTreeSet<WindowId>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly managed window. Idempotent: re-registering an already
    /// known window changes nothing.
    pub fn register(&mut self, window: WindowId, client: Client) {
        self.clients.entry(window).or_insert(client);
    }

    /// Remove a window from all indices. Returns its last known state.
    pub fn unregister(&mut self, window: WindowId) -> Option<Client> {
        self.visible.remove(&window);
        self.clients.remove(&window)
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.clients.contains_key(&window)
    }

    pub fn get(&self, window: WindowId) -> Option<&Client> {
        self.clients.get(&window)
    }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut Client> {
        self.clients.get_mut(&window)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// All managed window ids in identity order.
    pub fn ids(&self) -> Vec<WindowId> {
        self.clients.keys().copied().collect()
    }

    pub fn is_visible(&self, window: WindowId) -> bool {
        self.visible.contains(&window)
    }

    /// Mark a window visible or hidden. Unknown windows are ignored.
    pub fn set_visible(&mut self, window: WindowId, visible: bool) {
        if !self.clients.contains_key(&window) {
            return;
        }
        if visible {
            self.visible.insert(window);
        } else {
            self.visible.remove(&window);
        }
    }

    /// Visible window ids in identity order.
    pub fn visible_ids(&self) -> Vec<WindowId> {
        self.visible.iter().copied().collect()
    }

    /// Visible window ids on one monitor, in identity order.
    pub fn visible_on_monitor(&self, monitor: usize) -> Vec<WindowId> {
        self.visible
            .iter()
            .filter(|w| self.clients.get(w).map(|c| c.monitor) == Some(monitor))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(vscreen: usize) -> Client {
        Client {
            monitor: 0,
            vscreen,
            special: false,
        }
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = ClientRegistry::new();
        registry.register(WindowId(7), client(0));
        registry.register(WindowId(7), client(3));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(WindowId(7)).unwrap().vscreen, 0);
    }

    #[test]
    fn unregister_removes_from_visible_set() {
        let mut registry = ClientRegistry::new();
        registry.register(WindowId(7), client(0));
        registry.set_visible(WindowId(7), true);

        assert!(registry.is_visible(WindowId(7)));
        assert!(registry.unregister(WindowId(7)).is_some());
        assert!(!registry.is_visible(WindowId(7)));
        assert!(!registry.contains(WindowId(7)));
    }

    #[test]
    fn visibility_of_unknown_windows_is_ignored() {
        let mut registry = ClientRegistry::new();
        registry.set_visible(WindowId(9), true);
        assert!(!registry.is_visible(WindowId(9)));
    }

    #[test]
    fn visible_ids_are_in_identity_order() {
        let mut registry = ClientRegistry::new();
        for id in &[30u64, 10, 20] {
            registry.register(WindowId(*id), client(0));
            registry.set_visible(WindowId(*id), true);
        }

        assert_eq!(
            registry.visible_ids(),
            vec![WindowId(10), WindowId(20), WindowId(30)]
        );
    }

    #[test]
    fn visible_on_monitor_filters_by_owner() {
        let mut registry = ClientRegistry::new();
        registry.register(
            WindowId(1),
            Client {
                monitor: 0,
                vscreen: 0,
                special: false,
            },
        );
        registry.register(
            WindowId(2),
            Client {
                monitor: 1,
                vscreen: 0,
                special: false,
            },
        );
        registry.set_visible(WindowId(1), true);
        registry.set_visible(WindowId(2), true);

        assert_eq!(registry.visible_on_monitor(0), vec![WindowId(1)]);
        assert_eq!(registry.visible_on_monitor(1), vec![WindowId(2)]);
    }
}
