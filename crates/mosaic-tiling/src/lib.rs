//! Binary tiling layout for conversation windows.
//!
//! The layout is a persistent tree: every edit returns a new [`LayoutTree`]
//! that shares all untouched subtrees with the old one.

pub mod tree;

pub use tree::{Branch, Corner, Direction, LayoutTree, PaneNode};
