//! Drawing backends.
//!
//! A backend is a canvas-like immediate-mode context: it measures text,
//! holds a saveable drawing state (font, alignment, paint, shadow,
//! translation, clip) and receives fill/stroke text calls.
//!
//! Two implementations ship with the crate:
//! - [`CosmicBackend`]: cosmic-text measurement, emits a [`TextBatch`]
//! - [`RecordingBackend`]: deterministic metrics, records every call

pub mod cosmic;
pub mod recording;

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::primitives::{Color, Point, Rect};
use crate::style::{Font, Justification};

pub use cosmic::{CosmicBackend, PaintMode, TextBatch, TextRun};
pub use recording::{DrawCall, RecordingBackend};

pub trait DrawingBackend {
    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> Result<f32>;

    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: Justification);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f32);

    fn shadow_color(&self) -> Color;
    fn set_shadow_color(&mut self, color: Color);
    fn set_shadow_blur(&mut self, blur: f32);
    fn set_shadow_offset(&mut self, offset: Point);

    /// Push a copy of the current drawing state.
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`.
    fn restore(&mut self);

    /// Intersect the clip with `rect`, in current coordinates.
    fn clip_rect(&mut self, rect: Rect);
    fn translate(&mut self, dx: f32, dy: f32);

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;
}

/// Scoped drawing state: `save()` on creation, `restore()` on drop.
///
/// Derefs to the backend, so calls made through the guard land inside the
/// saved scope. Early returns (including `?`) still restore.
pub struct StateGuard<'a> {
    ctx: &'a mut dyn DrawingBackend,
}

impl<'a> StateGuard<'a> {
    pub fn new(ctx: &'a mut dyn DrawingBackend) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<'a> Deref for StateGuard<'a> {
    type Target = dyn DrawingBackend + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<'a> DerefMut for StateGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}
