//! Core types: geometry, cells, layout, scrolling, text and input.

pub mod appearance;
pub mod capabilities;
pub mod cell;
pub mod component;
pub mod geometry;
pub mod input;
pub mod keys;
pub mod layout;
pub mod scroll;
pub mod terminal;
pub mod text;
