//! Wrap invalidation tracking.
//!
//! `Clean` means the cached [`TextLayout`] matches the current content, width
//! and font. Any of those changing moves the tracker to `NeedsWrap`; the next
//! refresh rewraps once and returns to `Clean`.

use crate::error::Result;
use crate::wrap::{self, TextLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapState {
    Clean,
    #[default]
    NeedsWrap,
}

#[derive(Debug, Default)]
pub struct LayoutTracker {
    state: WrapState,
    layout: TextLayout,
    wraps: u64,
}

impl LayoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WrapState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == WrapState::NeedsWrap
    }

    pub fn invalidate(&mut self) {
        self.state = WrapState::NeedsWrap;
    }

    /// The last successfully computed layout. Stale while dirty.
    pub fn cached(&self) -> &TextLayout {
        &self.layout
    }

    /// Number of wrap passes committed so far.
    pub fn wrap_count(&self) -> u64 {
        self.wraps
    }

    /// Rewrap if dirty. Returns `true` when a new layout was committed.
    ///
    /// On error the previous layout is kept and the tracker stays dirty.
    pub fn refresh<M>(&mut self, content: &str, width: f32, measure: M) -> Result<bool>
    where
        M: FnMut(&str) -> Result<f32>,
    {
        if !self.is_dirty() {
            return Ok(false);
        }
        let layout = wrap::wrap(content, width, measure)?;
        tracing::debug!(
            paragraphs = layout.paragraphs,
            lines = layout.lines.len(),
            min_width = layout.min_width,
            width,
            "text wrapped"
        );
        self.layout = layout;
        self.wraps += 1;
        self.state = WrapState::Clean;
        Ok(true)
    }
}
