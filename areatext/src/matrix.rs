//! 2D affine transform.
//!
//! Stored as `[a b c d tx ty]`; a point maps to
//! `(a*x + c*y + tx, b*x + d*y + ty)`.

use crate::primitives::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// A pure translation.
    #[inline]
    pub const fn translation_of(dx: f32, dy: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    /// A pure scale about the origin.
    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// The translation component.
    #[inline]
    pub fn translation(&self) -> Point {
        Point::new(self.tx, self.ty)
    }

    /// Move the transformed frame by `delta` in parent coordinates.
    ///
    /// The linear part is untouched, so an existing rotation or scale keeps
    /// applying around the new origin.
    #[inline]
    pub fn translate(&mut self, delta: Point) {
        self.tx += delta.x;
        self.ty += delta.y;
    }

    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Axis-aligned bounding box of the transformed rectangle.
    pub fn transform_bounds(&self, rect: Rect) -> Rect {
        let corners = [
            self.transform_point(Point::new(rect.x, rect.y)),
            self.transform_point(Point::new(rect.right(), rect.y)),
            self.transform_point(Point::new(rect.x, rect.bottom())),
            self.transform_point(Point::new(rect.right(), rect.bottom())),
        ];
        let (mut min, mut max) = (corners[0], corners[0]);
        for p in &corners[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::from_origin_size(min, Size::new(max.x - min.x, max.y - min.y))
    }

    /// Length of the transformed unit axes.
    #[inline]
    pub fn scaling(&self) -> Size {
        Size::new(self.a.hypot(self.b), self.c.hypot(self.d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_accumulates() {
        let mut m = Matrix::IDENTITY;
        m.translate(Point::new(10.0, 5.0));
        m.translate(Point::new(-2.0, 1.0));
        assert_eq!(m.translation(), Point::new(8.0, 6.0));
    }

    #[test]
    fn translate_keeps_linear_part() {
        let mut m = Matrix::scale(2.0, 3.0);
        m.translate(Point::new(1.0, 1.0));
        assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(3.0, 4.0));
    }

    #[test]
    fn transform_bounds_of_rotation() {
        // 90 degree rotation: (x, y) -> (-y, x)
        let m = Matrix::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
        let r = m.transform_bounds(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(r, Rect::new(-50.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn scaling_reports_axis_lengths() {
        assert_eq!(Matrix::scale(2.0, 0.5).scaling(), Size::new(2.0, 0.5));
        assert_eq!(Matrix::IDENTITY.scaling(), Size::new(1.0, 1.0));
    }
}
