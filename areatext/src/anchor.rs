//! Alignment anchor for a wrapped text block.

use crate::primitives::{Point, Rect};
use crate::style::Justification;

/// Where lines are drawn from, in the item's local frame.
///
/// x is the alignment point: 0, half the width or the full width for
/// left, center and right. y centers the block vertically using the font
/// size as the line height (not the leading), and never goes above one
/// font size from the top.
pub fn compute_anchor(
    rect: &Rect,
    font_size: f32,
    justification: Justification,
    line_count: usize,
) -> Point {
    let lines = line_count as f32;
    let y = font_size.max(rect.height / 2.0 - font_size * (lines - 2.0) / 2.0);
    let x = match justification {
        Justification::Left => 0.0,
        Justification::Center => rect.width / 2.0,
        Justification::Right => rect.width,
    };
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_follows_justification() {
        let rect = Rect::new(30.0, 40.0, 200.0, 100.0);
        assert_eq!(compute_anchor(&rect, 10.0, Justification::Left, 1).x, 0.0);
        assert_eq!(compute_anchor(&rect, 10.0, Justification::Center, 1).x, 100.0);
        assert_eq!(compute_anchor(&rect, 10.0, Justification::Right, 1).x, 200.0);
    }

    #[test]
    fn y_centers_block() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        // 50 - 10 * (3 - 2) / 2
        assert_eq!(compute_anchor(&rect, 10.0, Justification::Left, 3).y, 45.0);
        // no lines yet: 50 + 10
        assert_eq!(compute_anchor(&rect, 10.0, Justification::Left, 0).y, 60.0);
    }

    #[test]
    fn y_never_above_one_font_size() {
        let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
        assert_eq!(compute_anchor(&rect, 12.0, Justification::Left, 40).y, 12.0);

        let degenerate = Rect::new(0.0, 0.0, -10.0, -10.0);
        let anchor = compute_anchor(&degenerate, 12.0, Justification::Right, 1);
        assert_eq!(anchor, Point::new(-10.0, 12.0));
    }
}
