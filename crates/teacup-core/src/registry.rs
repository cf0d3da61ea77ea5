//! Bookkeeping of the windows the frame loop drives.

use crate::backend::{Backend, WindowId};
use crate::window::Window;

/// Open windows, in registration order. Each id appears at most once.
#[derive(Debug, Default)]
pub struct Registry {
    windows: Vec<Window>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window. A window whose id is already registered is handed back
    /// untouched and the registry does not change.
    pub fn register(&mut self, window: Window) -> Option<Window> {
        if self.contains(window.id()) {
            log::debug!("Window {} already registered", window.id());
            return Some(window);
        }
        log::debug!("Registered window {}", window.id());
        self.windows.push(window);
        None
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(Window::id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Window> {
        self.windows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// True while at least one window is registered.
    pub fn running(&self) -> bool {
        !self.windows.is_empty()
    }

    /// Destroy a window and drop it from the registry.
    ///
    /// Returns `false` if `id` is not registered.
    pub fn destroy(&mut self, id: WindowId, backend: &mut dyn Backend) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let mut window = self.windows.remove(index);
        window.destroy(backend);
        log::debug!("Unregistered window {}", id);
        true
    }

    /// Destroy every window marked closed. Returns how many went away.
    pub fn destroy_closed(&mut self, backend: &mut dyn Backend) -> usize {
        let closed: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| !w.is_open())
            .map(Window::id)
            .collect();
        for id in &closed {
            self.destroy(*id, backend);
        }
        closed.len()
    }

    /// Destroy every registered window.
    pub fn destroy_all(&mut self, backend: &mut dyn Backend) {
        for mut window in self.windows.drain(..) {
            window.destroy(backend);
        }
    }

    fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }
}
