//! Basic geometry types shared by layout and drawing.
//!
//! Every type is generic over a [`Coord`] so the same code serves widget
//! coordinates (`i32`) and drawing coordinates (`f32`). The aliases
//! [`PointI`], [`SizeI`], [`RectI`] and [`PointF`], [`SizeF`], [`RectF`]
//! name the two instantiations used throughout the workspace.
//!
//! Arithmetic is only provided where it is dimensionally sound:
//!
//! ```
//! use horizon_trellis_core::geometry::{PointI, SizeI};
//!
//! let p = PointI::new(10, 20);
//! let moved = p + SizeI::new(5, 5);
//! assert_eq!(moved, PointI::new(15, 25));
//! assert_eq!(moved - p, SizeI::new(5, 5));
//! assert_eq!(SizeI::new(3, 4) * 2, SizeI::new(6, 8));
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Numeric coordinate type usable in [`Point`], [`Size`] and [`Rect`].
pub trait Coord:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;
    /// The value two, used for halving.
    const TWO: Self;

    /// Smaller of two values.
    #[inline]
    fn min_of(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Larger of two values.
    #[inline]
    fn max_of(self, other: Self) -> Self {
        if other > self { other } else { self }
    }
}

impl Coord for i32 {
    const ZERO: Self = 0;
    const TWO: Self = 2;
}

impl Coord for f32 {
    const ZERO: Self = 0.0;
    const TWO: Self = 2.0;
}

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: Coord> Point<T> {
    /// The origin point.
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
    };

    /// Create a new point.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T: Coord> Size<T> {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: T::ZERO,
        height: T::ZERO,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= T::ZERO || self.height <= T::ZERO
    }

    /// Component-wise maximum of two sizes.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.width.max_of(other.width),
            self.height.max_of(other.height),
        )
    }
}

impl<T> From<(T, T)> for Size<T> {
    fn from((width, height): (T, T)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect<T> {
    pub origin: Point<T>,
    pub size: Size<T>,
}

impl<T: Coord> Rect<T> {
    /// Empty rectangle at the origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Create a rectangle from position and dimensions.
    #[inline]
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point<T>, size: Size<T>) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle spanning two corner points, in any order.
    pub fn from_corners(a: Point<T>, b: Point<T>) -> Self {
        let min = Point::new(a.x.min_of(b.x), a.y.min_of(b.y));
        let max = Point::new(a.x.max_of(b.x), a.y.max_of(b.y));
        Self {
            origin: min,
            size: max - min,
        }
    }

    #[inline]
    pub fn left(&self) -> T {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> T {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> T {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> T {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> T {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> T {
        self.size.height
    }

    /// Top-left corner.
    #[inline]
    pub fn top_left(&self) -> Point<T> {
        self.origin
    }

    /// Top-right corner.
    #[inline]
    pub fn top_right(&self) -> Point<T> {
        Point::new(self.right(), self.top())
    }

    /// Bottom-right corner.
    #[inline]
    pub fn bottom_right(&self) -> Point<T> {
        self.origin + self.size
    }

    /// Bottom-left corner.
    #[inline]
    pub fn bottom_left(&self) -> Point<T> {
        Point::new(self.left(), self.bottom())
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point<T> {
        Point::new(
            self.origin.x + self.size.width / T::TWO,
            self.origin.y + self.size.height / T::TWO,
        )
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point<T>) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Shrink the rectangle by per-side insets, never below zero size.
    pub fn deflate(&self, sides: Sides<T>) -> Self {
        Self::new(
            self.origin.x + sides.left,
            self.origin.y + sides.top,
            (self.size.width - sides.horizontal()).max_of(T::ZERO),
            (self.size.height - sides.vertical()).max_of(T::ZERO),
        )
    }
}

impl<T: Coord> Add<Size<T>> for Point<T> {
    type Output = Point<T>;

    fn add(self, rhs: Size<T>) -> Point<T> {
        Point::new(self.x + rhs.width, self.y + rhs.height)
    }
}

impl<T: Coord> Sub<Size<T>> for Point<T> {
    type Output = Point<T>;

    fn sub(self, rhs: Size<T>) -> Point<T> {
        Point::new(self.x - rhs.width, self.y - rhs.height)
    }
}

impl<T: Coord> Sub for Point<T> {
    type Output = Size<T>;

    fn sub(self, rhs: Point<T>) -> Size<T> {
        Size::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Coord> Add for Size<T> {
    type Output = Size<T>;

    fn add(self, rhs: Size<T>) -> Size<T> {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl<T: Coord> Sub for Size<T> {
    type Output = Size<T>;

    fn sub(self, rhs: Size<T>) -> Size<T> {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl<T: Coord> Mul<T> for Size<T> {
    type Output = Size<T>;

    fn mul(self, rhs: T) -> Size<T> {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

impl From<Point<i32>> for Point<f32> {
    fn from(p: Point<i32>) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl From<Size<i32>> for Size<f32> {
    fn from(s: Size<i32>) -> Self {
        Self::new(s.width as f32, s.height as f32)
    }
}

impl From<Rect<i32>> for Rect<f32> {
    fn from(r: Rect<i32>) -> Self {
        Self::from_origin_size(r.origin.into(), r.size.into())
    }
}

/// Per-side spacing values (top, right, bottom, left).
///
/// Converts from CSS-style shorthands: one value for all sides, two for
/// vertical/horizontal, three for top/horizontal/bottom and four for
/// top/right/bottom/left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Coord> Sides<T> {
    /// No spacing on any side.
    pub const ZERO: Self = Self::uniform(T::ZERO);

    /// Create per-side values in CSS order.
    #[inline]
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every side.
    #[inline]
    pub const fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    /// Separate vertical (top/bottom) and horizontal (left/right) values.
    #[inline]
    pub const fn symmetric(vertical: T, horizontal: T) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right.
    #[inline]
    pub fn horizontal(&self) -> T {
        self.left + self.right
    }

    /// Top plus bottom.
    #[inline]
    pub fn vertical(&self) -> T {
        self.top + self.bottom
    }

    /// Space taken by these sides around a rectangle.
    #[inline]
    pub fn size(&self) -> Size<T> {
        Size::new(self.horizontal(), self.vertical())
    }

    /// Multiply every side by a factor.
    #[inline]
    pub fn scaled(self, factor: T) -> Self {
        Self::new(
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
            self.left * factor,
        )
    }
}

impl<T: Coord> From<T> for Sides<T> {
    fn from(all: T) -> Self {
        Self::uniform(all)
    }
}

impl<T: Coord> From<(T, T)> for Sides<T> {
    fn from((vertical, horizontal): (T, T)) -> Self {
        Self::symmetric(vertical, horizontal)
    }
}

impl<T: Coord> From<(T, T, T)> for Sides<T> {
    fn from((top, horizontal, bottom): (T, T, T)) -> Self {
        Self::new(top, horizontal, bottom, horizontal)
    }
}

impl<T: Coord> From<(T, T, T, T)> for Sides<T> {
    fn from((top, right, bottom, left): (T, T, T, T)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Integer point, used for widget coordinates.
pub type PointI = Point<i32>;
/// Integer size, used for widget coordinates.
pub type SizeI = Size<i32>;
/// Integer rectangle, used for widget coordinates.
pub type RectI = Rect<i32>;
/// Floating-point point, used for drawing coordinates.
pub type PointF = Point<f32>;
/// Floating-point size, used for drawing coordinates.
pub type SizeF = Size<f32>;
/// Floating-point rectangle, used for drawing coordinates.
pub type RectF = Rect<f32>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_size_arithmetic() {
        let p = PointI::new(1, 2);
        assert_eq!(p + SizeI::new(3, 4), PointI::new(4, 6));
        assert_eq!(p - SizeI::new(1, 1), PointI::new(0, 1));
        assert_eq!(PointI::new(10, 10) - p, SizeI::new(9, 8));
        assert_eq!(SizeF::new(1.5, 2.0) * 2.0, SizeF::new(3.0, 4.0));
    }

    #[test]
    fn test_rect_geometry() {
        let r = RectI::new(10, 20, 100, 50);
        assert_eq!(r.left(), 10);
        assert_eq!(r.top(), 20);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.center(), PointI::new(60, 45));
        assert_eq!(r.bottom_right(), PointI::new(110, 70));
    }

    #[test]
    fn test_rect_constructors_agree() {
        let a = RectF::new(1.0, 2.0, 3.0, 4.0);
        let b = RectF::from_origin_size(PointF::new(1.0, 2.0), SizeF::new(3.0, 4.0));
        let c = RectF::from_corners(PointF::new(4.0, 6.0), PointF::new(1.0, 2.0));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_rect_contains() {
        let r = RectI::new(0, 0, 100, 100);
        assert!(r.contains(PointI::new(50, 50)));
        assert!(r.contains(PointI::new(0, 0)));
        assert!(!r.contains(PointI::new(100, 100)));
    }

    #[test]
    fn test_rect_deflate_clamps() {
        let r = RectI::new(0, 0, 10, 10);
        let inner = r.deflate(Sides::uniform(3));
        assert_eq!(inner, RectI::new(3, 3, 4, 4));
        let collapsed = r.deflate(Sides::uniform(8));
        assert_eq!(collapsed.size, SizeI::ZERO);
    }

    #[test]
    fn test_sides_shorthand() {
        assert_eq!(Sides::from(4), Sides::new(4, 4, 4, 4));
        assert_eq!(Sides::from((1, 2)), Sides::new(1, 2, 1, 2));
        assert_eq!(Sides::from((1, 2, 3)), Sides::new(1, 2, 3, 2));
        assert_eq!(Sides::from((1, 2, 3, 4)), Sides::new(1, 2, 3, 4));
        assert_eq!(Sides::new(1, 2, 3, 4).size(), SizeI::new(6, 4));
    }

    #[test]
    fn test_integer_to_float_conversion() {
        let r: RectF = RectI::new(1, 2, 3, 4).into();
        assert_eq!(r, RectF::new(1.0, 2.0, 3.0, 4.0));
    }
}
