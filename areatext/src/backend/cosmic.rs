//! cosmic-text backed drawing context.
//!
//! Measures with cosmic-text shaping and collects positioned [`TextRun`]s into a
//! [`TextBatch`] for the host renderer. Only translation is tracked as a
//! transform; hosts that rotate or scale apply that when consuming the batch.

use std::num::NonZeroUsize;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use lru::LruCache;

use super::DrawingBackend;
use crate::config::{TextConfig, DEFAULT_MEASURE_CACHE, LEADING_RATIO};
use crate::error::{Result, TextError};
use crate::primitives::{Color, Point, Rect};
use crate::style::{Font, FontWeight, Justification};

/// How a run is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintMode {
    Fill,
    Stroke { width: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunShadow {
    pub color: Color,
    pub blur: f32,
    pub offset: Point,
}

/// A positioned run of text, ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Left end of the baseline, alignment and translation applied.
    pub origin: Point,
    pub width: f32,
    pub font: Font,
    pub color: Color,
    pub mode: PaintMode,
    pub shadow: Option<RunShadow>,
    pub clip_rect: Option<Rect>,
}

/// Runs collected since the last [`CosmicBackend::take_batch`].
#[derive(Debug, Default, Clone)]
pub struct TextBatch {
    pub runs: Vec<TextRun>,
}

impl TextBatch {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }
}

#[derive(Debug, Clone)]
struct CanvasState {
    font: Font,
    align: Justification,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    shadow_color: Color,
    shadow_blur: f32,
    shadow_offset: Point,
    translation: Point,
    clip: Option<Rect>,
}

impl CanvasState {
    fn new(config: &TextConfig) -> Self {
        Self {
            font: Font {
                family: config.font_family.clone(),
                weight: FontWeight(config.font_weight),
                size: config.font_size,
            },
            align: Justification::Left,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            shadow_color: Color::TRANSPARENT,
            shadow_blur: 0.0,
            shadow_offset: Point::ORIGIN,
            translation: Point::ORIGIN,
            clip: None,
        }
    }

    fn shadow(&self) -> Option<RunShadow> {
        let extends = self.shadow_blur > 0.0 || self.shadow_offset != Point::ORIGIN;
        (self.shadow_color.is_visible() && extends).then_some(RunShadow {
            color: self.shadow_color,
            blur: self.shadow_blur,
            offset: self.shadow_offset,
        })
    }

    /// Whether the clip leaves any area to draw into.
    fn clip_is_open(&self) -> bool {
        self.clip.is_none_or(|c| c.width > 0.0 && c.height > 0.0)
    }
}

pub struct CosmicBackend {
    font_system: FontSystem,
    /// (font shorthand, text) -> advance width
    measure_cache: LruCache<(String, String), f32>,
    state: CanvasState,
    stack: Vec<CanvasState>,
    batch: TextBatch,
}

impl CosmicBackend {
    pub fn new(font_system: FontSystem) -> Self {
        Self::with_config(font_system, &TextConfig::default())
    }

    pub fn with_config(font_system: FontSystem, config: &TextConfig) -> Self {
        let capacity = NonZeroUsize::new(config.measure_cache_capacity)
            .or(NonZeroUsize::new(DEFAULT_MEASURE_CACHE))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            font_system,
            measure_cache: LruCache::new(capacity),
            state: CanvasState::new(config),
            stack: Vec::new(),
            batch: TextBatch::default(),
        }
    }

    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }

    /// Runs collected so far.
    pub fn batch(&self) -> &TextBatch {
        &self.batch
    }

    /// Hand the collected runs to the renderer and start a fresh batch.
    pub fn take_batch(&mut self) -> TextBatch {
        std::mem::take(&mut self.batch)
    }

    pub fn cached_measurements(&self) -> usize {
        self.measure_cache.len()
    }

    fn shape_width(&mut self, text: &str) -> Result<f32> {
        let font = &self.state.font;
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(TextError::Font(format!("unusable font size in {font}")));
        }

        let family = match font.family.as_str() {
            "sans-serif" => Family::SansSerif,
            "serif" => Family::Serif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            name => Family::Name(name),
        };
        let attrs = Attrs::new().family(family).weight(Weight(font.weight.0));

        let metrics = Metrics::new(font.size, font.size * LEADING_RATIO);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(f32::MAX), Some(f32::MAX));
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        Ok(buffer.layout_runs().map(|run| run.line_w).fold(0.0, f32::max))
    }

    fn emit(&mut self, text: &str, x: f32, y: f32, color: Color, mode: PaintMode) -> Result<()> {
        if !self.state.clip_is_open() {
            tracing::trace!(text, "run fully clipped");
            return Ok(());
        }
        let width = self.measure_text(text)?;
        let shift = match self.state.align {
            Justification::Left => 0.0,
            Justification::Center => width / 2.0,
            Justification::Right => width,
        };
        self.batch.runs.push(TextRun {
            text: text.to_string(),
            origin: Point::new(x - shift, y) + self.state.translation,
            width,
            font: self.state.font.clone(),
            color,
            mode,
            shadow: self.state.shadow(),
            clip_rect: self.state.clip,
        });
        Ok(())
    }
}

impl DrawingBackend for CosmicBackend {
    fn measure_text(&mut self, text: &str) -> Result<f32> {
        let key = (self.state.font.to_string(), text.to_string());
        if let Some(width) = self.measure_cache.get(&key) {
            return Ok(*width);
        }
        let width = self.shape_width(text)?;
        self.measure_cache.put(key, width);
        Ok(width)
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: Justification) {
        self.state.align = align;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.state.stroke_width = width;
    }

    fn shadow_color(&self) -> Color {
        self.state.shadow_color
    }

    fn set_shadow_color(&mut self, color: Color) {
        self.state.shadow_color = color;
    }

    fn set_shadow_blur(&mut self, blur: f32) {
        self.state.shadow_blur = blur;
    }

    fn set_shadow_offset(&mut self, offset: Point) {
        self.state.shadow_offset = offset;
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn clip_rect(&mut self, rect: Rect) {
        let rect = rect.translate(self.state.translation);
        self.state.clip = Some(match self.state.clip {
            // Empty intersection: keep a zero-area clip so later runs are dropped.
            Some(clip) => clip
                .intersection(&rect)
                .unwrap_or(Rect::from_origin_size(clip.origin(), Default::default())),
            None => rect,
        });
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.translation = self.state.translation + Point::new(dx, dy);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        let color = self.state.fill;
        self.emit(text, x, y, color, PaintMode::Fill)
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        let color = self.state.stroke;
        let width = self.state.stroke_width;
        self.emit(text, x, y, color, PaintMode::Stroke { width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A font system with no faces. Tests seed the measurement cache so no
    /// shaping runs.
    fn empty_backend() -> CosmicBackend {
        let fs = FontSystem::new_with_locale_and_db("en-US".into(), cosmic_text::fontdb::Database::new());
        CosmicBackend::new(fs)
    }

    /// A font system holding only the bundled Inter face, as the generic
    /// sans-serif family.
    fn inter_backend() -> CosmicBackend {
        let mut db = cosmic_text::fontdb::Database::new();
        db.load_font_data(include_bytes!("../../tests/fonts/Inter-Regular.ttf").to_vec());
        db.set_sans_serif_family("Inter");
        CosmicBackend::new(FontSystem::new_with_locale_and_db("en-US".into(), db))
    }

    fn seed(ctx: &mut CosmicBackend, text: &str, width: f32) {
        let key = (ctx.state.font.to_string(), text.to_string());
        ctx.measure_cache.put(key, width);
    }

    #[test]
    fn cached_width_is_reused() {
        let mut ctx = empty_backend();
        seed(&mut ctx, "hello", 42.0);
        assert_eq!(ctx.measure_text("hello").unwrap(), 42.0);
        assert_eq!(ctx.cached_measurements(), 1);
    }

    #[test]
    fn alignment_shifts_origin_by_measured_width() {
        let mut ctx = empty_backend();
        seed(&mut ctx, "abc", 30.0);
        ctx.set_text_align(Justification::Center);
        ctx.fill_text("abc", 50.0, 10.0).unwrap();
        ctx.set_text_align(Justification::Right);
        ctx.fill_text("abc", 50.0, 10.0).unwrap();

        let runs = ctx.take_batch().runs;
        assert_eq!(runs[0].origin, Point::new(35.0, 10.0));
        assert_eq!(runs[1].origin, Point::new(20.0, 10.0));
        assert_eq!(runs[1].width, 30.0);
    }

    #[test]
    fn shaping_measures_trailing_space() {
        let mut ctx = inter_backend();
        let word = ctx.measure_text("ab").unwrap();
        let with_space = ctx.measure_text("ab ").unwrap();
        assert!(word > 0.0);
        assert!(with_space > word, "{with_space} <= {word}");
        assert_eq!(ctx.cached_measurements(), 2);

        ctx.set_font(&Font {
            family: "sans-serif".into(),
            weight: FontWeight::NORMAL,
            size: 24.0,
        });
        assert!(ctx.measure_text("ab").unwrap() > word);
    }

    #[test]
    fn zero_font_size_is_an_error() {
        let mut ctx = empty_backend();
        ctx.set_font(&Font {
            family: "sans-serif".into(),
            weight: FontWeight::NORMAL,
            size: 0.0,
        });
        assert!(matches!(ctx.measure_text("x"), Err(TextError::Font(_))));
    }

    #[test]
    fn runs_carry_translation_clip_and_paint() {
        let mut ctx = empty_backend();
        for text in ["a", "b", "c"] {
            seed(&mut ctx, text, 8.0);
        }
        ctx.translate(10.0, 20.0);
        ctx.save();
        ctx.clip_rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        ctx.set_fill_color(Color::RED);
        ctx.fill_text("a", 1.0, 2.0).unwrap();
        ctx.translate(0.0, 5.0);
        ctx.set_stroke_width(3.0);
        ctx.stroke_text("b", 1.0, 2.0).unwrap();
        ctx.restore();
        ctx.fill_text("c", 0.0, 0.0).unwrap();

        let runs = ctx.take_batch().runs;
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].origin, Point::new(11.0, 22.0));
        assert_eq!(runs[0].color, Color::RED);
        assert_eq!(runs[0].clip_rect, Some(Rect::new(10.0, 20.0, 100.0, 50.0)));
        assert_eq!(runs[1].origin, Point::new(11.0, 27.0));
        assert_eq!(runs[1].mode, PaintMode::Stroke { width: 3.0 });
        assert_eq!(runs[2].origin, Point::new(10.0, 20.0));
        assert_eq!(runs[2].color, Color::BLACK);
        assert_eq!(runs[2].clip_rect, None);
        assert!(ctx.batch().is_empty());
    }

    #[test]
    fn disjoint_clips_drop_runs() {
        let mut ctx = empty_backend();
        ctx.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.clip_rect(Rect::new(50.0, 50.0, 10.0, 10.0));
        ctx.fill_text("hidden", 0.0, 0.0).unwrap();
        assert!(ctx.batch().is_empty());
    }

    #[test]
    fn shadow_only_when_visible_and_extended() {
        let mut ctx = empty_backend();
        seed(&mut ctx, "flat", 8.0);
        seed(&mut ctx, "soft", 8.0);
        ctx.set_shadow_color(Color::BLACK);
        ctx.fill_text("flat", 0.0, 0.0).unwrap();
        ctx.set_shadow_blur(2.0);
        ctx.fill_text("soft", 0.0, 0.0).unwrap();

        let runs = ctx.take_batch().runs;
        assert_eq!(runs[0].shadow, None);
        assert_eq!(
            runs[1].shadow,
            Some(RunShadow {
                color: Color::BLACK,
                blur: 2.0,
                offset: Point::ORIGIN,
            })
        );
    }
}
