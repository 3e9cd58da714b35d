//! Scene-graph plumbing shared by drawable items.

use crate::backend::DrawingBackend;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::primitives::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Geometry,
    Content,
    Style,
}

impl ChangeKind {
    const fn bit(self) -> u8 {
        match self {
            ChangeKind::Geometry => 1 << 0,
            ChangeKind::Content => 1 << 1,
            ChangeKind::Style => 1 << 2,
        }
    }
}

/// Pending change notifications, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeSet(u8);

impl ChangeSet {
    pub const EMPTY: Self = Self(0);

    #[inline]
    pub fn insert(&mut self, kind: ChangeKind) {
        self.0 |= kind.bit();
    }

    #[inline]
    pub fn contains(&self, kind: ChangeKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Transform and change bookkeeping every item carries.
#[derive(Debug, Clone, Default)]
pub struct ItemBase {
    matrix: Matrix,
    changes: ChangeSet,
}

impl ItemBase {
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Move the item in its parent's coordinates.
    pub fn translate(&mut self, delta: Point) {
        if delta != Point::ORIGIN {
            self.matrix.translate(delta);
            self.changed(ChangeKind::Geometry);
        }
    }

    /// Record a change notification for the host.
    pub fn changed(&mut self, kind: ChangeKind) {
        self.changes.insert(kind);
    }

    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.changes)
    }
}

/// Per-draw settings supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Device pixels per view unit; scales shadow blur and offset.
    pub pixel_ratio: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self { pixel_ratio: 1.0 }
    }
}

/// A text item laid out inside a rectangle.
pub trait DrawableTextItem {
    /// Bounds of the wrap rectangle in local coordinates, mapped through
    /// `matrix` when one is given.
    fn bounds(&self, matrix: Option<&Matrix>) -> Rect;

    fn draw(
        &mut self,
        ctx: &mut dyn DrawingBackend,
        params: &DrawParams,
        view_matrix: Option<&Matrix>,
    ) -> Result<()>;

    /// Mark the cached layout stale.
    fn invalidate(&mut self);

    fn rectangle(&self) -> Rect;
    fn set_rectangle(&mut self, rect: Rect);
}
