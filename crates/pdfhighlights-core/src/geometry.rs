//! Points, transformation matrices and highlight quads.
//!
//! `/QuadPoints` are split into [`Quad`]s, and each quad's axis-aligned
//! [`Band`] is the region compared against text runs.

/// A point in PDF user space (origin bottom-left, y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Affine transformation matrix `[a b c d e f]` in PDF row-vector convention.
///
/// A point maps as `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ctm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Ctm {
    fn default() -> Self {
        Self::identity()
    }
}

impl Ctm {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Build a matrix from a 6-element operand array.
    pub fn from_array(m: [f64; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    /// Matrix product `self × other`.
    ///
    /// Applying the result is the same as applying `self` first, then `other`.
    pub fn concat(&self, other: &Ctm) -> Ctm {
        Ctm {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// One highlight quadrilateral: four corners in `[tL, tR, bL, bR]` order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad {
    pub points: [Point; 4],
}

impl Quad {
    pub fn top_left(&self) -> Point {
        self.points[0]
    }

    pub fn top_right(&self) -> Point {
        self.points[1]
    }

    pub fn bottom_left(&self) -> Point {
        self.points[2]
    }

    pub fn bottom_right(&self) -> Point {
        self.points[3]
    }

    /// Axis-aligned envelope of the four corners.
    pub fn band(&self) -> Band {
        Band::from_quad(self)
    }
}

/// Axis-aligned search region derived from a [`Quad`].
///
/// Rotated quads are approximated by their bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Band {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn from_quad(quad: &Quad) -> Self {
        let first = quad.points[0];
        quad.points[1..].iter().fold(
            Band::new(first.x, first.x, first.y, first.y),
            |band, p| Band {
                min_x: band.min_x.min(p.x),
                max_x: band.max_x.max(p.x),
                min_y: band.min_y.min(p.y),
                max_y: band.max_y.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether a baseline at `y` falls inside the band (inclusive).
    pub fn contains_y(&self, y: f64) -> bool {
        self.min_y <= y && y <= self.max_y
    }
}

/// Split a flat `/QuadPoints` array into quads.
///
/// Every 8 numbers form one quad of 4 `(x, y)` pairs. A trailing group of
/// fewer than 8 numbers is ignored.
pub fn decompose_quad_points(values: &[f64]) -> Vec<Quad> {
    values
        .chunks_exact(8)
        .map(|c| Quad {
            points: [
                Point::new(c[0], c[1]),
                Point::new(c[2], c[3]),
                Point::new(c[4], c[5]),
                Point::new(c[6], c[7]),
            ],
        })
        .collect()
}
