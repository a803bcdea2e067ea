use std::f64::consts::TAU;

use super::{Point2, Vector2};
use crate::geometry::BBox;

/// A polynomial `c3·t³ + c2·t² + c1·t + c0` of degree at most three.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polynomial {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl Polynomial {
    /// Creates a polynomial from its coefficients, lowest order first.
    #[must_use]
    pub fn new(c0: f64, c1: f64, c2: f64, c3: f64) -> Self {
        Self { c0, c1, c2, c3 }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c0: f64) -> Self {
        Self::new(c0, 0.0, 0.0, 0.0)
    }

    /// Creates a linear polynomial `c0 + c1 t`.
    #[must_use]
    pub fn linear(c0: f64, c1: f64) -> Self {
        Self::new(c0, c1, 0.0, 0.0)
    }

    /// Creates a quadratic polynomial from ascending coefficients.
    #[must_use]
    pub fn quadratic(c0: f64, c1: f64, c2: f64) -> Self {
        Self::new(c0, c1, c2, 0.0)
    }

    /// Creates a cubic polynomial from ascending coefficients.
    #[must_use]
    pub fn cubic(c0: f64, c1: f64, c2: f64, c3: f64) -> Self {
        Self::new(c0, c1, c2, c3)
    }

    /// The degree of the polynomial, ignoring vanishing leading coefficients.
    #[must_use]
    pub fn degree(&self) -> usize {
        if self.c3 != 0.0 {
            3
        } else if self.c2 != 0.0 {
            2
        } else if self.c1 != 0.0 {
            1
        } else {
            0
        }
    }

    /// Returns the `n`th derivative. Derivatives past the third are zero.
    #[must_use]
    pub fn differentiate(&self, n: usize) -> Self {
        match n {
            0 => *self,
            1 => Self::new(self.c1, 2.0 * self.c2, 3.0 * self.c3, 0.0),
            2 => Self::new(2.0 * self.c2, 6.0 * self.c3, 0.0, 0.0),
            3 => Self::constant(6.0 * self.c3),
            _ => Self::default(),
        }
    }

    /// Evaluates the polynomial at `t`.
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        ((self.c3 * t + self.c2) * t + self.c1) * t + self.c0
    }

    /// Splits the polynomial at `u` into two polynomials over `[0, 1]` that
    /// trace the same values as `[0, u]` and `[u, 1]` respectively.
    #[must_use]
    pub fn split(&self, u: f64) -> (Self, Self) {
        let d = 1.0 - u;

        let pre = Self::new(self.c0, self.c1 * u, self.c2 * u * u, self.c3 * u * u * u);
        let post = Self::new(
            self.eval(u),
            d * self.differentiate(1).eval(u),
            (d * d / 2.0) * self.differentiate(2).eval(u),
            (d * d * d / 6.0) * self.differentiate(3).eval(u),
        );

        (pre, post)
    }

    /// Real roots of the polynomial. Between zero and three values.
    #[must_use]
    pub fn roots(&self) -> Vec<f64> {
        match self.degree() {
            3 => self.solve_cubic_roots(),
            2 => self.solve_quadratic_roots(),
            1 => vec![-self.c0 / self.c1],
            _ => Vec::new(),
        }
    }

    /// Parameter values of the local extrema.
    #[must_use]
    pub fn local_extrema(&self) -> Vec<f64> {
        self.differentiate(1).roots()
    }

    /// Local extrema that fall inside the unit interval.
    #[must_use]
    pub fn local_extrema_01(&self) -> Vec<f64> {
        self.local_extrema()
            .into_iter()
            .filter(|t| (0.0..=1.0).contains(t))
            .collect()
    }

    /// The `(min, max)` output range over `t ∈ [0, 1]`.
    #[must_use]
    pub fn output_range_01(&self) -> (f64, f64) {
        let a = self.eval(0.0);
        let b = self.eval(1.0);
        let mut range = (a.min(b), a.max(b));
        for t in self.local_extrema_01() {
            let value = self.eval(t);
            range = (range.0.min(value), range.1.max(value));
        }
        range
    }

    fn solve_quadratic_roots(&self) -> Vec<f64> {
        let a = self.c2;
        let b = self.c1;
        let c = self.c0;
        let discriminant = b * b - 4.0 * a * c;

        if almost_zero(discriminant) {
            return vec![-b / (2.0 * a)];
        }
        if discriminant < 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        let r0 = (-b - root) / (2.0 * a);
        let r1 = (-b + root) / (2.0 * a);
        vec![r0.min(r1), r0.max(r1)]
    }

    fn solve_cubic_roots(&self) -> Vec<f64> {
        let a = self.c3;
        let b = self.c2;
        let c = self.c1;
        let d = self.c0;

        // Depress to t³ + pt + q = 0 with x = t - b / 3a.
        let p = (3.0 * a * c - b * b) / (3.0 * a * a);
        let q = (2.0 * b * b * b - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a * a * a);
        let shift = b / (3.0 * a);

        solve_depressed_cubic(p, q)
            .into_iter()
            .map(|root| root - shift)
            .collect()
    }
}

fn almost_zero(value: f64) -> bool {
    value.abs() <= f64::EPSILON
}

fn solve_depressed_cubic(p: f64, q: f64) -> Vec<f64> {
    if almost_zero(p) {
        return vec![(-q).cbrt()];
    }

    let discriminant = 4.0 * p * p * p + 27.0 * q * q;
    if discriminant < 1e-5 {
        // Two or three real roots: trigonometric solution.
        let pre = 2.0 * (-p / 3.0).sqrt();
        let acos_inner = ((3.0 * q) / (2.0 * p)) * (-3.0 / p).sqrt();
        let root = |k: f64| {
            pre * ((1.0 / 3.0) * acos_inner.clamp(-1.0, 1.0).acos() - (TAU / 3.0) * k).cos()
        };

        if acos_inner >= 0.9999 {
            return vec![root(0.0), root(2.0)];
        }
        if acos_inner <= -0.9999 {
            return vec![root(1.0), root(2.0)];
        }
        return vec![root(0.0), root(1.0), root(2.0)];
    }

    if p < 0.0 {
        let cosh_inner =
            (1.0 / 3.0) * (((-3.0 * q.abs()) / (2.0 * p)) * (-3.0 / p).sqrt()).acosh();
        return vec![-2.0 * q.signum() * (-p / 3.0).sqrt() * cosh_inner.cosh()];
    }

    let sinh_inner = (1.0 / 3.0) * (((3.0 * q) / (2.0 * p)) * (3.0 / p).sqrt()).asinh();
    vec![-2.0 * (p / 3.0).sqrt() * sinh_inner.sinh()]
}

/// A planar curve whose coordinates are each a [`Polynomial`] in `t`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polynomial2D {
    pub x: Polynomial,
    pub y: Polynomial,
}

impl Polynomial2D {
    /// Creates a planar polynomial from its coordinate polynomials.
    #[must_use]
    pub fn new(x: Polynomial, y: Polynomial) -> Self {
        Self { x, y }
    }

    /// Builds the curve from vector coefficients, lowest order first.
    #[must_use]
    pub fn from_coefficients(c0: Vector2, c1: Vector2, c2: Vector2, c3: Vector2) -> Self {
        Self {
            x: Polynomial::new(c0.x, c1.x, c2.x, c3.x),
            y: Polynomial::new(c0.y, c1.y, c2.y, c3.y),
        }
    }

    /// Evaluates the position at `t`.
    #[must_use]
    pub fn eval(&self, t: f64) -> Point2 {
        Point2::new(self.x.eval(t), self.y.eval(t))
    }

    /// Evaluates the first derivative at `t`.
    #[must_use]
    pub fn eval_derivative(&self, t: f64) -> Vector2 {
        Vector2::new(
            self.x.differentiate(1).eval(t),
            self.y.differentiate(1).eval(t),
        )
    }

    /// Returns the `n`-th derivative of both coordinates.
    #[must_use]
    pub fn differentiate(&self, n: usize) -> Self {
        Self::new(self.x.differentiate(n), self.y.differentiate(n))
    }

    /// Splits both coordinates at `u`, each half reparametrized over `[0, 1]`.
    #[must_use]
    pub fn split(&self, u: f64) -> (Self, Self) {
        let (x_pre, x_post) = self.x.split(u);
        let (y_pre, y_post) = self.y.split(u);
        (Self::new(x_pre, y_pre), Self::new(x_post, y_post))
    }

    /// Tight axis-aligned bounds of the curve over `t ∈ [0, 1]`.
    #[must_use]
    pub fn bounds(&self) -> BBox {
        let (min_x, max_x) = self.x.output_range_01();
        let (min_y, max_y) = self.y.output_range_01();
        BBox::new(Point2::new(min_x, min_y), Point2::new(max_x, max_y))
    }
}
