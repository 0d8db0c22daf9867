//! Component trait system for the TUI
//!
//! Panels declare what they can do through traits instead of `App` knowing
//! how to draw and drive each one.
//!
//! - [`Component`] - render into an area with a [`RenderContext`]
//! - [`Interactive`] - consume key events when focused

mod component;
mod interactive;

pub use component::{Component, RenderContext};
pub use interactive::{Handled, Interactive};
