//! Rectangle-constrained text item.
//!
//! `AreaText` wraps its content to the width of a rectangle, centers the
//! block vertically, aligns each line on the style's justification and draws
//! clipped to the rectangle. Layout is cached and recomputed only after the
//! content, the rectangle or the font changes.
//!
//! # Layout contract
//!
//! `lines`, `min_width` and the anchor are derived state. [`AreaText::layout`]
//! and [`DrawableTextItem::draw`] recompute them first when the item is dirty;
//! [`AreaText::cached_lines`] returns the last computed lines as-is.

use std::ops::{Deref, DerefMut};

use crate::anchor::compute_anchor;
use crate::backend::{DrawingBackend, StateGuard};
use crate::config::TextConfig;
use crate::error::Result;
use crate::invalidation::{LayoutTracker, WrapState};
use crate::item::{ChangeKind, ChangeSet, DrawParams, DrawableTextItem, ItemBase};
use crate::matrix::Matrix;
use crate::primitives::{Color, Point, Rect};
use crate::style::{Justification, StyleChange, StyleObserver, TextStyle};
use crate::wrap::TextLayout;

#[derive(Debug)]
pub struct AreaText {
    base: ItemBase,
    content: String,
    /// Wrap box; its origin is where the item sits in its parent.
    rectangle: Rect,
    style: TextStyle,
    tracker: LayoutTracker,
    anchor: Point,
}

impl Default for AreaText {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaText {
    /// Empty content, zero rectangle, default style.
    pub fn new() -> Self {
        Self::with_style(TextStyle::default())
    }

    pub fn from_config(config: &TextConfig) -> Self {
        Self::with_style(TextStyle::from_config(config))
    }

    pub fn with_style(style: TextStyle) -> Self {
        let mut item = Self {
            base: ItemBase::default(),
            content: String::new(),
            rectangle: Rect::ZERO,
            style,
            tracker: LayoutTracker::new(),
            anchor: Point::ORIGIN,
        };
        item.update_anchor();
        item
    }

    // =========================================================================
    // Content and geometry
    // =========================================================================

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.tracker.invalidate();
        self.base.changed(ChangeKind::Content);
    }

    /// Store the wrap box and move the item so its origin is the box's
    /// top-left corner. Degenerate sizes are accepted as-is.
    pub fn set_rectangle(&mut self, rect: Rect) {
        self.rectangle = rect;
        let delta = rect.origin() - self.base.matrix().translation();
        self.base.translate(delta);
        // Uses the previous line count until the next wrap.
        self.update_anchor();
        self.tracker.invalidate();
        self.base.changed(ChangeKind::Geometry);
    }

    pub fn rectangle(&self) -> Rect {
        self.rectangle
    }

    pub fn justification(&self) -> Justification {
        self.style.justification()
    }

    /// Alignment never changes line breaks, so no rewrap is scheduled.
    pub fn set_justification(&mut self, justification: Justification) {
        let before = self.style.justification();
        self.style.set_justification(justification);
        if before != justification {
            self.style_changed(StyleChange::Justification);
        }
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Edit the style; the item is notified of what changed when the
    /// returned guard is dropped.
    pub fn style_mut(&mut self) -> StyleEdit<'_> {
        StyleEdit {
            before: self.style.clone(),
            item: self,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        self.base.matrix()
    }

    /// Drain pending change notifications.
    pub fn take_changes(&mut self) -> ChangeSet {
        self.base.take_changes()
    }

    // =========================================================================
    // Derived layout
    // =========================================================================

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn wrap_state(&self) -> WrapState {
        self.tracker.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Lines from the last successful wrap. Stale while [`is_dirty`](Self::is_dirty).
    pub fn cached_lines(&self) -> &[String] {
        &self.tracker.cached().lines
    }

    /// Widest first word from the last successful wrap.
    pub fn min_width(&self) -> f32 {
        self.tracker.cached().min_width
    }

    pub fn wrap_count(&self) -> u64 {
        self.tracker.wrap_count()
    }

    /// Current layout, rewrapping first if anything it depends on changed.
    ///
    /// Measurement runs with this item's font inside a saved scope, so
    /// `ctx` is left as it was found.
    pub fn layout(&mut self, ctx: &mut dyn DrawingBackend) -> Result<&TextLayout> {
        if self.tracker.is_dirty() {
            let mut scoped = StateGuard::new(ctx);
            scoped.set_font(self.style.font());
            self.refresh_layout(&mut *scoped)?;
        }
        Ok(self.tracker.cached())
    }

    /// Rewrap with whatever font `ctx` currently has, if dirty.
    fn refresh_layout(&mut self, ctx: &mut dyn DrawingBackend) -> Result<()> {
        let width = self.rectangle.width;
        if self.tracker.refresh(&self.content, width, |text| ctx.measure_text(text))? {
            self.update_anchor();
        }
        Ok(())
    }

    fn update_anchor(&mut self) {
        self.anchor = compute_anchor(
            &self.rectangle,
            self.style.font_size(),
            self.style.justification(),
            self.tracker.cached().line_count(),
        );
    }

    fn apply_styles(&self, ctx: &mut dyn DrawingBackend, params: &DrawParams, view_matrix: Option<&Matrix>) {
        let style = &self.style;
        if let Some(fill) = style.fill_color() {
            ctx.set_fill_color(fill);
        }
        if let Some(stroke) = style.stroke_color() {
            ctx.set_stroke_color(stroke);
            let mut width = style.stroke_width();
            if !style.stroke_scaling() {
                // Keep the stroke at its nominal width on screen.
                if let Some(view) = view_matrix {
                    let scaling = view.scaling();
                    let scale = (scaling.width + scaling.height) / 2.0;
                    if scale > 0.0 {
                        width /= scale;
                    }
                }
            }
            ctx.set_stroke_width(width);
        }
        if style.has_shadow() {
            if let Some(color) = style.shadow_color() {
                ctx.set_shadow_color(color);
            }
            ctx.set_shadow_blur(style.shadow_blur() * params.pixel_ratio);
            ctx.set_shadow_offset(style.shadow_offset() * params.pixel_ratio);
        }
    }
}

impl StyleObserver for AreaText {
    fn style_changed(&mut self, change: StyleChange) {
        match change {
            StyleChange::Font => {
                self.tracker.invalidate();
                self.update_anchor();
            }
            StyleChange::Justification => self.update_anchor(),
            StyleChange::Leading | StyleChange::Paint => {}
        }
        self.base.changed(ChangeKind::Style);
    }
}

impl DrawableTextItem for AreaText {
    fn bounds(&self, matrix: Option<&Matrix>) -> Rect {
        let local = self.rectangle.local();
        match matrix {
            Some(m) => m.transform_bounds(local),
            None => local,
        }
    }

    fn draw(
        &mut self,
        ctx: &mut dyn DrawingBackend,
        params: &DrawParams,
        view_matrix: Option<&Matrix>,
    ) -> Result<()> {
        if self.content.is_empty() {
            tracing::trace!("empty content, nothing to draw");
            return Ok(());
        }

        let mut styled = StateGuard::new(ctx);
        self.apply_styles(&mut *styled, params, view_matrix);
        styled.set_font(self.style.font());
        styled.set_text_align(self.style.justification());
        let shadow_color = styled.shadow_color();

        self.refresh_layout(&mut *styled)?;

        let rect = self.rectangle;
        let leading = self.style.leading();
        let has_fill = self.style.has_fill();
        let has_stroke = self.style.has_stroke();
        let anchor = self.anchor;

        let mut clipped = StateGuard::new(&mut *styled);
        clipped.clip_rect(rect.local());

        let lines = &self.tracker.cached().lines;
        for (i, line) in lines.iter().enumerate() {
            if i as f32 * leading > rect.height {
                tracing::trace!(hidden = lines.len() - i, "lines below rectangle");
                break;
            }
            clipped.set_shadow_color(shadow_color);
            if has_fill {
                clipped.fill_text(line, anchor.x, anchor.y)?;
                // Shadow applies to the fill only.
                clipped.set_shadow_color(Color::TRANSPARENT);
            }
            if has_stroke {
                clipped.stroke_text(line, anchor.x, anchor.y)?;
            }
            clipped.translate(0.0, leading);
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.tracker.invalidate();
    }

    fn rectangle(&self) -> Rect {
        self.rectangle
    }

    fn set_rectangle(&mut self, rect: Rect) {
        AreaText::set_rectangle(self, rect);
    }
}

/// Style edit scope returned by [`AreaText::style_mut`].
pub struct StyleEdit<'a> {
    item: &'a mut AreaText,
    before: TextStyle,
}

impl Deref for StyleEdit<'_> {
    type Target = TextStyle;

    fn deref(&self) -> &TextStyle {
        &self.item.style
    }
}

impl DerefMut for StyleEdit<'_> {
    fn deref_mut(&mut self) -> &mut TextStyle {
        &mut self.item.style
    }
}

impl Drop for StyleEdit<'_> {
    fn drop(&mut self) {
        for change in self.item.style.diff(&self.before) {
            self.item.style_changed(change);
        }
    }
}
