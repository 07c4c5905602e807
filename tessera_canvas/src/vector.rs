// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// A 2D vector used for positions, sizes, and deltas.
///
/// The in-place mutators return `&mut Self` so they can be chained:
///
/// ```
/// use tessera_canvas::Vector2;
///
/// let mut v = Vector2::new(400.0, 300.0);
/// v.divide_scalar(2.0).add_vector(Vector2::new(10.0, 10.0));
/// assert_eq!(v, Vector2::new(210.0, 160.0));
/// ```
///
/// No finiteness check is made; callers are responsible for not producing
/// NaN or infinite components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Overwrites both components.
    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Adds `value` to both components.
    pub fn add_scalar(&mut self, value: f64) -> &mut Self {
        self.x += value;
        self.y += value;
        self
    }

    /// Adds `other` componentwise.
    pub fn add_vector(&mut self, other: Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    /// Subtracts `value` from both components.
    pub fn subtract_scalar(&mut self, value: f64) -> &mut Self {
        self.x -= value;
        self.y -= value;
        self
    }

    /// Subtracts `other` componentwise.
    pub fn subtract_vector(&mut self, other: Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    /// Multiplies both components by `value`.
    pub fn multiply_scalar(&mut self, value: f64) -> &mut Self {
        self.x *= value;
        self.y *= value;
        self
    }

    /// Multiplies componentwise by `other`.
    pub fn multiply_vector(&mut self, other: Self) -> &mut Self {
        self.x *= other.x;
        self.y *= other.y;
        self
    }

    /// Divides both components by `value`.
    pub fn divide_scalar(&mut self, value: f64) -> &mut Self {
        self.x /= value;
        self.y /= value;
        self
    }

    /// Divides componentwise by `other`.
    pub fn divide_vector(&mut self, other: Self) -> &mut Self {
        self.x /= other.x;
        self.y /= other.y;
        self
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Reads a vector from a JSON object with numeric `x` and `y` fields.
    ///
    /// Returns `None` if the value is not an object, or if either field is
    /// missing or not a number. Other fields are ignored.
    ///
    /// ```
    /// use serde_json::json;
    /// use tessera_canvas::Vector2;
    ///
    /// assert_eq!(Vector2::from_json(&json!({ "x": 3, "y": 4 })), Some(Vector2::new(3.0, 4.0)));
    /// assert_eq!(Vector2::from_json(&json!({ "x": 3 })), None);
    /// ```
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let x = object.get("x")?.as_f64()?;
        let y = object.get("y")?.as_f64()?;
        Some(Self::new(x, y))
    }

    /// Converts to a JSON object `{ "x": .., "y": .. }`.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        serde_json::json!({ "x": self.x, "y": self.y })
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self.add_vector(rhs);
        self
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.add_vector(rhs);
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self.subtract_vector(rhs);
        self
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_vector(rhs);
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self.multiply_scalar(rhs);
        self
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.multiply_scalar(rhs);
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;

    fn div(mut self, rhs: f64) -> Self {
        self.divide_scalar(rhs);
        self
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, rhs: f64) {
        self.divide_scalar(rhs);
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Size> for Vector2 {
    fn from(s: Size) -> Self {
        Self::new(s.width, s.height)
    }
}

impl From<Vector2> for Size {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mutators_chain_in_place() {
        let mut v = Vector2::new(1.0, 2.0);
        v.add_scalar(1.0)
            .multiply_vector(Vector2::new(3.0, 0.5))
            .subtract_vector(Vector2::new(1.0, 1.0))
            .divide_scalar(2.0);
        assert_eq!(v, Vector2::new(2.5, 0.25));

        v.set(8.0, 6.0).subtract_scalar(2.0).divide_vector(Vector2::new(3.0, 2.0));
        assert_eq!(v, Vector2::new(2.0, 2.0));
    }

    #[test]
    fn copies_are_independent() {
        let a = Vector2::new(1.0, 1.0);
        let mut b = a;
        b.multiply_scalar(10.0);
        assert_eq!(a, Vector2::new(1.0, 1.0));
        assert_eq!(b, Vector2::new(10.0, 10.0));
    }

    #[test]
    fn operators_match_mutators() {
        let a = Vector2::new(6.0, 8.0);
        let b = Vector2::new(2.0, 4.0);
        assert_eq!(a + b, Vector2::new(8.0, 12.0));
        assert_eq!(a - b, Vector2::new(4.0, 4.0));
        assert_eq!(a * 0.5, Vector2::new(3.0, 4.0));
        assert_eq!(a / 2.0, Vector2::new(3.0, 4.0));
        assert_eq!(-a, Vector2::new(-6.0, -8.0));
        assert!((a.length() - 10.0).abs() < 1e-12, "length");
        assert!((a.distance(b) - 32_f64.sqrt()).abs() < 1e-12, "distance");
        assert_eq!(a.midpoint(b), Vector2::new(4.0, 6.0));
    }

    #[test]
    fn from_json_requires_both_numeric_fields() {
        assert_eq!(
            Vector2::from_json(&json!({ "x": 3, "y": 4 })),
            Some(Vector2::new(3.0, 4.0))
        );
        assert_eq!(
            Vector2::from_json(&json!({ "x": -1.5, "y": 2e3, "label": "spawn" })),
            Some(Vector2::new(-1.5, 2000.0))
        );
        assert_eq!(Vector2::from_json(&json!({ "x": 3 })), None);
        assert_eq!(Vector2::from_json(&json!({ "y": 3 })), None);
        assert_eq!(Vector2::from_json(&json!({ "x": "3", "y": 4 })), None);
        assert_eq!(Vector2::from_json(&json!([3, 4])), None);
    }

    #[test]
    fn serde_uses_named_fields() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.to_json(), json!({ "x": 3.0, "y": 4.0 }));
        let back: Vector2 = serde_json::from_value(v.to_json()).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn kurbo_conversions() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(Point::from(v), Point::new(1.0, 2.0));
        assert_eq!(Vec2::from(v), Vec2::new(1.0, 2.0));
        assert_eq!(Size::from(v), Size::new(1.0, 2.0));
        assert_eq!(Vector2::from(Size::new(800.0, 600.0)), Vector2::new(800.0, 600.0));
    }
}
