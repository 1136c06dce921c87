//! Client-side navigation.
//!
//! [`NavigationRouter`] is a small state machine holding the active
//! [`ViewId`]. It is driven by three triggers: initial resolution of the
//! current location, intercepted link activations, and history traversal
//! (back/forward). Observers follow the active view through a
//! [`tokio::sync::watch`] channel.

pub mod history;
pub mod link;
pub mod view;

pub use history::{History, MemoryHistory, pathname_of};
pub use link::{LinkActivation, Modifiers, MouseButton, is_root_relative};
pub use view::ViewId;

use tokio::sync::watch;
use tracing::debug;

/// Events the router listens for once mounted.
#[derive(Debug)]
pub enum BrowserEvent<'a> {
    /// Anchor activation bubbling to the document.
    Click(&'a mut LinkActivation),
    /// Back/forward by `delta` entries, followed by a popstate.
    Traverse(isize),
}

pub struct NavigationRouter<H: History> {
    history: H,
    state: watch::Sender<ViewId>,
    mounted: bool,
}

impl<H: History> NavigationRouter<H> {
    /// Build the router and resolve the current location once.
    pub fn new(history: H) -> Self {
        let initial = ViewId::from_path(&history.pathname());
        let (state, _) = watch::channel(initial);
        debug!(view = %initial, "router initialized");
        Self {
            history,
            state,
            mounted: false,
        }
    }

    /// View for the current location. No side effects.
    pub fn resolve_current_view(&self) -> ViewId {
        ViewId::from_path(&self.history.pathname())
    }

    /// Last published view.
    pub fn current_view(&self) -> ViewId {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewId> {
        self.state.subscribe()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Register the document-level listeners. Only the first call per
    /// session registers anything; returns whether this call did.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            debug!("router listeners already registered");
            return false;
        }
        self.mounted = true;
        debug!("router listeners registered");
        true
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deliver a browser event to the mounted listeners. Returns whether
    /// the router handled it; events are ignored while unmounted.
    pub fn dispatch(&mut self, event: BrowserEvent<'_>) -> bool {
        if !self.mounted {
            return false;
        }
        match event {
            BrowserEvent::Click(activation) => self.intercept_activation(activation),
            BrowserEvent::Traverse(delta) => self.traverse(delta),
        }
    }

    /// Handle a link activation in-app when it qualifies.
    ///
    /// On interception the event is default-prevented, exactly one history
    /// entry is pushed and the view is re-resolved. Otherwise the event is
    /// left untouched for the browser.
    pub fn intercept_activation(&mut self, activation: &mut LinkActivation) -> bool {
        let Some(href) = activation.in_app_destination().map(str::to_owned) else {
            return false;
        };

        activation.prevent_default();
        self.history.push_state(&href);
        let view = self.publish();
        debug!(%href, %view, "intercepted link activation");
        true
    }

    /// Re-resolve after the history moved on its own. Never pushes.
    pub fn on_history_change(&mut self) -> ViewId {
        self.publish()
    }

    /// Move back (negative) or forward (positive) and re-resolve. Returns
    /// false when there is no entry in that direction.
    pub fn traverse(&mut self, delta: isize) -> bool {
        if !self.history.go(delta) {
            return false;
        }
        self.on_history_change();
        true
    }

    pub fn back(&mut self) -> bool {
        self.traverse(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.traverse(1)
    }

    /// Programmatic navigation to a root-relative path.
    pub fn navigate(&mut self, path: &str) -> Option<ViewId> {
        self.intercept_activation(&mut LinkActivation::new(path))
            .then(|| self.current_view())
    }

    fn publish(&mut self) -> ViewId {
        let view = self.resolve_current_view();
        self.state.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            debug!(from = %current, to = %view, "view changed");
            *current = view;
            true
        });
        view
    }
}

impl Default for NavigationRouter<MemoryHistory> {
    fn default() -> Self {
        Self::new(MemoryHistory::default())
    }
}
