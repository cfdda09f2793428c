//! Pluckboard Render Library
//!
//! Paint surface abstraction and the per-frame painter for Pluckboard.
//! `DisplayList` records draw calls; the optional Vello surface builds a GPU
//! scene.

mod display_list;
mod painter;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use display_list::{DisplayList, DrawCall, Primitive};
pub use painter::{paint_frame, round_stroke};
pub use renderer::{Layer, PaintSurface, RenderContext, Renderer};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
