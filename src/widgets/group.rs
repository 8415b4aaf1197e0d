//! Group widget: composites owned children in insertion order.

use crate::core::component::Component;
use crate::core::keys::KeyEvent;
use crate::core::layout::SizeSpec;
use crate::render::surface::Surface;

pub struct Group {
    surface: Surface,
    children: Vec<Box<dyn Component>>,
}

impl Group {
    pub fn new(size_spec: SizeSpec) -> Self {
        Self {
            surface: Surface::new(size_spec),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, component: Box<dyn Component>) -> Self {
        self.push(component);
        self
    }

    /// Append a child drawn above the ones already present. Returns its index.
    pub fn push(&mut self, component: Box<dyn Component>) -> usize {
        self.children.push(component);
        self.surface.mark_dirty();
        self.children.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index < self.children.len() {
            self.surface.mark_dirty();
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.surface.mark_dirty();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&dyn Component> {
        self.children.get(index).map(|child| child.as_ref())
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn Component + 'static)> {
        self.children.get_mut(index).map(|child| child.as_mut())
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Component>] {
        &mut self.children
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new(SizeSpec::fill())
    }
}

impl Component for Group {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn draw_hook(&mut self) {
        self.surface.make_transparent();
        for child in self.children.iter_mut() {
            self.surface.insert_surface(child.as_mut());
        }
    }

    /// Offered to each child in order until one consumes it.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.children.iter_mut().any(|child| child.handle_key(key))
    }
}
