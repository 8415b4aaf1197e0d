//! Component and ActiveElement traits.

use crate::core::keys::KeyEvent;
use crate::render::surface::Surface;

/// A drawable widget backed by its own [`Surface`].
///
/// The compositor drives the hooks: after resolving the component's size
/// against its parent it calls [`resize_hook`](Component::resize_hook) if the
/// size changed, then [`draw_hook`](Component::draw_hook) so the buffer is
/// current before it is blitted.
pub trait Component {
    fn surface(&self) -> &Surface;
    fn surface_mut(&mut self) -> &mut Surface;

    /// Called after the surface was resized by the compositor.
    fn resize_hook(&mut self) {}

    /// Regenerate the surface contents.
    fn draw_hook(&mut self) {}

    /// Handle a key. Returns `true` when the key was consumed.
    fn handle_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Focus behavior, for components that can be activated.
    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        None
    }
}

impl Component for Surface {
    fn surface(&self) -> &Surface {
        self
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self
    }
}

/// The boolean half of [`ActiveElement`], embedded in each implementor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveState {
    active: bool,
}

impl ActiveState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Store `active`; returns whether the value changed.
    pub fn set(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }
}

/// Focus state machine with transition hooks.
///
/// `activate` and `deactivate` can be called any number of times; the hooks
/// run only when the state actually flips. Composites forward activation to
/// the children they own from inside their hooks.
pub trait ActiveElement {
    fn active_state(&self) -> &ActiveState;
    fn active_state_mut(&mut self) -> &mut ActiveState;

    fn on_activate(&mut self) {}
    fn on_deactivate(&mut self) {}

    fn is_active(&self) -> bool {
        self.active_state().is_active()
    }

    fn activate(&mut self) {
        if self.active_state_mut().set(true) {
            tracing::trace!("element activated");
            self.on_activate();
        }
    }

    fn deactivate(&mut self) {
        if self.active_state_mut().set(false) {
            tracing::trace!("element deactivated");
            self.on_deactivate();
        }
    }

    fn set_active(&mut self, active: bool) {
        if active {
            self.activate();
        } else {
            self.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveElement, ActiveState};

    #[derive(Default)]
    struct Counter {
        state: ActiveState,
        activations: usize,
        deactivations: usize,
    }

    impl ActiveElement for Counter {
        fn active_state(&self) -> &ActiveState {
            &self.state
        }

        fn active_state_mut(&mut self) -> &mut ActiveState {
            &mut self.state
        }

        fn on_activate(&mut self) {
            self.activations += 1;
        }

        fn on_deactivate(&mut self) {
            self.deactivations += 1;
        }
    }

    #[test]
    fn hooks_fire_once_per_transition() {
        let mut counter = Counter::default();
        counter.deactivate();
        assert_eq!(counter.deactivations, 0, "already inactive");

        counter.activate();
        counter.activate();
        assert!(counter.is_active());
        assert_eq!(counter.activations, 1);

        counter.set_active(false);
        counter.deactivate();
        assert!(!counter.is_active());
        assert_eq!(counter.deactivations, 1);

        counter.set_active(true);
        assert_eq!(counter.activations, 2);
    }
}
