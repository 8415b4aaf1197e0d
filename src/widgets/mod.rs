//! Composite widgets built from surfaces.

pub mod chart;
pub mod group;
pub mod input;
pub mod scrollbar;
pub mod text;

pub use chart::Chart;
pub use group::Group;
pub use input::{InputKeys, InputText};
pub use scrollbar::{Orientation, ScrollKeys, Scrollbar};
pub use text::Text;
