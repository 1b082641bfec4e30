//! Layout listeners and the registry that notifies them.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::Point;

/// Observer of a layout run. Every callback defaults to a no-op.
pub trait GraphLayoutListener<N>: Send + Sync {
    fn graph_layout_started(&self) {}

    fn graph_layout_finished(&self) {}

    fn nodes_layout_started(&self, _nodes: &[N]) {}

    fn nodes_layout_finished(&self, _nodes: &[N]) {}

    /// A node was committed to `new`; `previous` is where it was before, if anywhere.
    fn node_location_changed(&self, _node: &N, _previous: Option<Point>, _new: Point) {}
}

pub type SharedListener<N> = Arc<dyn GraphLayoutListener<N>>;

/// Listener list guarded by a mutex.
///
/// Notification always walks a snapshot taken under the lock, never the live
/// list, so a listener may add or remove listeners while being notified.
pub struct ListenerRegistry<N> {
    listeners: Mutex<Vec<SharedListener<N>>>,
}

impl<N> Default for ListenerRegistry<N> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<N> ListenerRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: SharedListener<N>) {
        self.listeners.lock().push(listener);
    }

    /// Remove the first registration of exactly this listener instance.
    pub fn remove(&self, listener: &SharedListener<N>) {
        let mut listeners = self.listeners.lock();
        if let Some(pos) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            listeners.remove(pos);
        }
    }

    /// Point-in-time copy of the registered listeners, in registration order.
    pub fn snapshot(&self) -> Vec<SharedListener<N>> {
        self.listeners.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}
