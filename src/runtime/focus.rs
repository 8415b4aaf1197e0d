//! Exclusive focus over a set of owned components.

use crate::core::component::{ActiveElement, ActiveState, Component};
use crate::core::keys::{Key, KeyEvent};
use crate::core::layout::SizeSpec;
use crate::render::surface::Surface;
use crate::widgets::group::Group;

/// A [`Group`] in which at most one activatable child is active at a time.
///
/// While the navigation group itself is active, the `next` key moves focus
/// forward (wrapping) and the `previous` key moves it back. All other keys go
/// to the selected child only.
pub struct NavigationGroup {
    group: Group,
    selected: Option<usize>,
    next_key: KeyEvent,
    previous_key: Option<KeyEvent>,
    active: ActiveState,
}

impl NavigationGroup {
    pub fn new(size_spec: SizeSpec) -> Self {
        Self {
            group: Group::new(size_spec),
            selected: None,
            next_key: KeyEvent::new(Key::Tab),
            previous_key: Some(KeyEvent::new(Key::Tab).shift()),
            active: ActiveState::default(),
        }
    }

    pub fn with_element(mut self, component: Box<dyn Component>) -> Self {
        self.push(component);
        self
    }

    /// Add a child. Children without focus behavior are drawn but never
    /// selected.
    pub fn push(&mut self, component: Box<dyn Component>) -> usize {
        self.group.push(component)
    }

    pub fn len(&self) -> usize {
        self.group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&dyn Component> {
        self.group.child(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut (dyn Component + 'static)> {
        self.group.child_mut(index)
    }

    /// Index of the active child.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_next_key(&mut self, key: KeyEvent) {
        self.next_key = key;
    }

    pub fn set_previous_key(&mut self, key: Option<KeyEvent>) {
        self.previous_key = key;
    }

    /// Activate child `index` alone. Returns `false` when it cannot be
    /// activated. Selecting the current child leaves it untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if self.selected == Some(index) {
            return true;
        }
        let activatable = self
            .group
            .child_mut(index)
            .is_some_and(|child| child.as_active().is_some());
        if !activatable {
            return false;
        }
        self.deactivate_all();
        if let Some(element) = self
            .group
            .child_mut(index)
            .and_then(|child| child.as_active())
        {
            element.activate();
        }
        tracing::debug!(index, "navigation selection changed");
        self.selected = Some(index);
        true
    }

    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, direction: isize) -> bool {
        let count = self.group.len();
        if count == 0 {
            return false;
        }
        let start = match self.selected {
            Some(index) => index as isize,
            None if direction > 0 => -1,
            None => count as isize,
        };
        for offset in 1..=count as isize {
            let candidate = (start + direction * offset).rem_euclid(count as isize) as usize;
            if self.select(candidate) {
                return true;
            }
        }
        false
    }

    fn deactivate_all(&mut self) {
        for child in self.group.children_mut() {
            if let Some(element) = child.as_active() {
                element.deactivate();
            }
        }
        self.selected = None;
    }
}

impl Default for NavigationGroup {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}

impl Component for NavigationGroup {
    fn surface(&self) -> &Surface {
        self.group.surface()
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self.group.surface_mut()
    }

    fn resize_hook(&mut self) {
        self.group.resize_hook();
    }

    fn draw_hook(&mut self) {
        self.group.draw_hook();
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_active() {
            return false;
        }
        if *key == self.next_key {
            self.next();
            return true;
        }
        if self.previous_key == Some(*key) {
            self.previous();
            return true;
        }
        match self.selected {
            Some(index) => self
                .group
                .child_mut(index)
                .is_some_and(|child| child.handle_key(key)),
            None => false,
        }
    }

    fn as_active(&mut self) -> Option<&mut dyn ActiveElement> {
        Some(self)
    }
}

impl ActiveElement for NavigationGroup {
    fn active_state(&self) -> &ActiveState {
        &self.active
    }

    fn active_state_mut(&mut self) -> &mut ActiveState {
        &mut self.active
    }

    fn on_activate(&mut self) {
        self.deactivate_all();
        self.next();
    }

    fn on_deactivate(&mut self) {
        self.deactivate_all();
    }
}
