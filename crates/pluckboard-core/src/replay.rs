//! Per-stroke replay copies.
//!
//! Every completed stroke gets a twin carrying its own presentation scale,
//! offset and alpha. Twins are created by backfill only; nothing here
//! interpolates them over time.

use crate::shapes::{PluckablePath, ShapeStyle};
use kurbo::{Affine, BezPath, Vec2};
use std::collections::BTreeMap;

/// A presentation copy of a completed stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayPath {
    /// Duplicated geometry.
    pub path: BezPath,
    /// Duplicated color and width.
    pub style: ShapeStyle,
    /// Presentation scale.
    pub scale: f64,
    /// Presentation offset, in screen units.
    pub offset: Vec2,
    /// Presentation opacity in `[0, 1]`.
    pub alpha: f32,
}

impl ReplayPath {
    fn from_stroke(stroke: &PluckablePath, alpha: f32) -> Self {
        Self {
            path: stroke.path.clone(),
            style: stroke.style,
            scale: 1.0,
            offset: Vec2::ZERO,
            alpha,
        }
    }

    /// Transform used to paint this copy instead of the camera transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

/// Index-keyed mapping from completed strokes to their replay copies.
#[derive(Debug, Clone)]
pub struct ReplayLayer {
    entries: BTreeMap<usize, ReplayPath>,
    initial_alpha: f32,
}

impl Default for ReplayLayer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ReplayLayer {
    /// Create an empty layer whose new copies start at `initial_alpha`.
    pub fn new(initial_alpha: f32) -> Self {
        Self {
            entries: BTreeMap::new(),
            initial_alpha: initial_alpha.clamp(0.0, 1.0),
        }
    }

    /// Create copies for every stroke index that lacks one.
    ///
    /// Returns the number of copies created.
    pub fn sync(&mut self, strokes: &[PluckablePath]) -> usize {
        let mut created = 0;
        for (index, stroke) in strokes.iter().enumerate() {
            if !self.entries.contains_key(&index) {
                self.entries
                    .insert(index, ReplayPath::from_stroke(stroke, self.initial_alpha));
                created += 1;
            }
        }
        if created > 0 {
            log::debug!("Backfilled {created} replay copies ({} total)", self.entries.len());
        }
        created
    }

    pub fn get(&self, index: usize) -> Option<&ReplayPath> {
        self.entries.get(&index)
    }

    /// Mutable access to a copy's presentation fields.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ReplayPath> {
        self.entries.get_mut(&index)
    }

    /// Indices that currently have a copy, ascending.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
