//! Call-recording backend with deterministic metrics.
//!
//! Width of a string is its Unicode display width (columns) times a fixed
//! advance, so layouts are reproducible without any font files. Every trait
//! call is appended to [`RecordingBackend::calls`].

use unicode_width::UnicodeWidthChar;

use super::DrawingBackend;
use crate::error::{Result, TextError};
use crate::primitives::{Color, Point, Rect};
use crate::style::{Font, Justification};

/// Display width in columns (1 for Latin, 2 for CJK, 0 for combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Measure(String),
    SetFont(String),
    SetTextAlign(Justification),
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetStrokeWidth(f32),
    GetShadowColor,
    SetShadowColor(Color),
    SetShadowBlur(f32),
    SetShadowOffset(Point),
    Save,
    Restore,
    ClipRect(Rect),
    Translate(f32, f32),
    FillText { text: String, x: f32, y: f32 },
    StrokeText { text: String, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy)]
struct RecordedState {
    shadow_color: Color,
    offset: Point,
}

#[derive(Debug)]
pub struct RecordingBackend {
    advance: f32,
    calls: Vec<DrawCall>,
    state: RecordedState,
    stack: Vec<RecordedState>,
    /// Successful measurements left before `measure_text` fails.
    measure_budget: Option<usize>,
    /// Successful fill/stroke calls left before drawing fails.
    draw_budget: Option<usize>,
    // `shadow_color` takes `&self`, so its calls are counted separately.
    shadow_queries: std::cell::Cell<usize>,
}

impl RecordingBackend {
    /// `advance` is the width of one display column.
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            calls: Vec::new(),
            state: RecordedState {
                shadow_color: Color::TRANSPARENT,
                offset: Point::ORIGIN,
            },
            stack: Vec::new(),
            measure_budget: None,
            draw_budget: None,
            shadow_queries: std::cell::Cell::new(0),
        }
    }

    /// Let `n` measurements succeed, then fail every one after.
    pub fn fail_measure_after(&mut self, n: usize) {
        self.measure_budget = Some(n);
    }

    /// Let `n` fill/stroke calls succeed, then fail every one after.
    pub fn fail_draw_after(&mut self, n: usize) {
        self.draw_budget = Some(n);
    }

    /// Remove any injected failure.
    pub fn heal(&mut self) {
        self.measure_budget = None;
        self.draw_budget = None;
    }

    /// Width this backend reports for `text`, without recording a call.
    pub fn width_of(&self, text: &str) -> f32 {
        unicode_display_width(text) * self.advance
    }

    /// Every recorded call except `shadow_color` queries, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Total number of trait calls received, queries included.
    pub fn call_count(&self) -> usize {
        self.calls.len() + self.shadow_queries.get()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.shadow_queries.set(0);
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Accumulated translation of the current state.
    pub fn offset(&self) -> Point {
        self.state.offset
    }

    /// Text and on-canvas position of every fill call, translation applied.
    pub fn filled(&self) -> Vec<(String, Point)> {
        self.text_calls(true)
    }

    /// Same as [`filled`](Self::filled) for stroke calls.
    pub fn stroked(&self) -> Vec<(String, Point)> {
        self.text_calls(false)
    }

    fn text_calls(&self, fill: bool) -> Vec<(String, Point)> {
        // Replays save/restore/translate to resolve positions.
        let mut offset = Point::ORIGIN;
        let mut stack = Vec::new();
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                DrawCall::Save => stack.push(offset),
                DrawCall::Restore => offset = stack.pop().unwrap_or(Point::ORIGIN),
                DrawCall::Translate(dx, dy) => offset = offset + Point::new(*dx, *dy),
                DrawCall::FillText { text, x, y } if fill => {
                    out.push((text.clone(), Point::new(*x, *y) + offset));
                }
                DrawCall::StrokeText { text, x, y } if !fill => {
                    out.push((text.clone(), Point::new(*x, *y) + offset));
                }
                _ => {}
            }
        }
        out
    }

    fn spend_draw(&mut self) -> Result<()> {
        match self.draw_budget.as_mut() {
            Some(0) => Err(TextError::Draw("injected draw failure".into())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl DrawingBackend for RecordingBackend {
    fn measure_text(&mut self, text: &str) -> Result<f32> {
        self.calls.push(DrawCall::Measure(text.to_string()));
        match self.measure_budget.as_mut() {
            Some(0) => return Err(TextError::Measure(format!("injected failure measuring {text:?}"))),
            Some(n) => *n -= 1,
            None => {}
        }
        Ok(self.width_of(text))
    }

    fn set_font(&mut self, font: &Font) {
        self.calls.push(DrawCall::SetFont(font.to_string()));
    }

    fn set_text_align(&mut self, align: Justification) {
        self.calls.push(DrawCall::SetTextAlign(align));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(DrawCall::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(DrawCall::SetStrokeColor(color));
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.calls.push(DrawCall::SetStrokeWidth(width));
    }

    fn shadow_color(&self) -> Color {
        self.shadow_queries.set(self.shadow_queries.get() + 1);
        self.state.shadow_color
    }

    fn set_shadow_color(&mut self, color: Color) {
        self.calls.push(DrawCall::SetShadowColor(color));
        self.state.shadow_color = color;
    }

    fn set_shadow_blur(&mut self, blur: f32) {
        self.calls.push(DrawCall::SetShadowBlur(blur));
    }

    fn set_shadow_offset(&mut self, offset: Point) {
        self.calls.push(DrawCall::SetShadowOffset(offset));
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.calls.push(DrawCall::ClipRect(rect));
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.calls.push(DrawCall::Translate(dx, dy));
        self.state.offset = self.state.offset + Point::new(dx, dy);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        self.calls.push(DrawCall::FillText { text: text.to_string(), x, y });
        self.spend_draw()
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        self.calls.push(DrawCall::StrokeText { text: text.to_string(), x, y });
        self.spend_draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_display_columns() {
        let mut ctx = RecordingBackend::new(10.0);
        assert_eq!(ctx.measure_text("abc ").unwrap(), 40.0);
        assert_eq!(ctx.measure_text("日本").unwrap(), 40.0);
        assert_eq!(ctx.measure_text("").unwrap(), 0.0);
    }

    #[test]
    fn measure_budget_runs_out() {
        let mut ctx = RecordingBackend::new(10.0);
        ctx.fail_measure_after(1);
        assert!(ctx.measure_text("a").is_ok());
        assert!(matches!(ctx.measure_text("b"), Err(TextError::Measure(_))));

        ctx.heal();
        assert!(ctx.measure_text("c").is_ok());
    }

    #[test]
    fn filled_positions_include_translation() {
        let mut ctx = RecordingBackend::new(10.0);
        ctx.save();
        ctx.fill_text("one", 5.0, 10.0).unwrap();
        ctx.translate(0.0, 20.0);
        ctx.fill_text("two", 5.0, 10.0).unwrap();
        ctx.restore();
        ctx.fill_text("three", 5.0, 10.0).unwrap();

        assert_eq!(
            ctx.filled(),
            vec![
                ("one".to_string(), Point::new(5.0, 10.0)),
                ("two".to_string(), Point::new(5.0, 30.0)),
                ("three".to_string(), Point::new(5.0, 10.0)),
            ]
        );
        assert_eq!(ctx.offset(), Point::ORIGIN);
    }

    #[test]
    fn shadow_queries_are_counted() {
        let ctx = RecordingBackend::new(10.0);
        assert_eq!(ctx.call_count(), 0);
        let _ = ctx.shadow_color();
        assert_eq!(ctx.call_count(), 1);
        assert!(ctx.calls().is_empty());
    }
}
