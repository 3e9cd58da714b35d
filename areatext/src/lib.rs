//! AreaText: rectangle-constrained text layout for vector scenes
//!
//! An [`AreaText`] item owns a string and a wrap rectangle. On draw it:
//! - wraps the text greedily to the rectangle width (words are never split)
//! - anchors the block by justification and centers it vertically
//! - clips to the rectangle and paints fill then stroke, line by line
//!
//! Layout is cached; content, rectangle and font edits invalidate it.
//!
//! # Usage
//!
//! ```ignore
//! use areatext::{AreaText, DrawableTextItem, DrawParams, Rect, RecordingBackend};
//!
//! let mut text = AreaText::new();
//! text.set_content("The quick brown fox");
//! text.set_rectangle(Rect::new(0.0, 0.0, 120.0, 80.0));
//!
//! let mut ctx = RecordingBackend::new(7.0);
//! text.draw(&mut ctx, &DrawParams::default(), None)?;
//! ```

// Core types
pub mod primitives;
pub mod matrix;
pub mod error;
pub mod config;
pub mod style;

// Layout
pub mod wrap;
pub mod anchor;
pub mod invalidation;

// Scene graph and rendering
pub mod item;
pub mod backend;
pub mod area_text;

pub use primitives::{Color, Point, Rect, Size};
pub use matrix::Matrix;
pub use error::{Result, TextError};
pub use config::TextConfig;
pub use style::{Font, FontWeight, Justification, StyleChange, StyleObserver, TextStyle};
pub use wrap::{wrap, TextLayout};
pub use anchor::compute_anchor;
pub use invalidation::{LayoutTracker, WrapState};
pub use item::{ChangeKind, ChangeSet, DrawParams, DrawableTextItem, ItemBase};
pub use backend::{CosmicBackend, DrawCall, DrawingBackend, RecordingBackend, StateGuard, TextBatch, TextRun};
pub use area_text::{AreaText, StyleEdit};
