//! **gruid-core**: grid geometry shared by the *gruid* crates.
//!
//! [`Point`] identifies a map cell, [`Dir`] names the eight steps between
//! neighbouring cells, and [`Range`] is a half-open rectangle of cells.

pub mod geom;

pub use geom::{Dir, Point, Range};
