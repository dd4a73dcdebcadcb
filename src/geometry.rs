use macroquad::math::Vec2;

/// Finite line segment in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Segment { start, end }
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }
}

/// Strict counter-clockwise orientation test for the triangle (a, b, c)
///
/// Collinear points are not counter-clockwise.
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Return true if segments AB and CD cross each other
///
/// Pure orientation test: touching endpoints and collinear overlap are not reported.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Find the unique intersection point of two finite segments
///
/// Solves `p + t*r = q + u*s` for both segment parameters. Endpoints count as part of
/// the segment (`t, u` in `[0, 1]`). Parallel, collinear and zero-length segments have
/// no unique solution and return `None`.
pub fn intersection_point(first: &Segment, second: &Segment) -> Option<Vec2> {
    let r = first.direction();
    let s = second.direction();

    let denom = r.perp_dot(s);
    // Scale-aware zero test; also catches zero-length segments
    if denom.abs() <= f32::EPSILON * r.length() * s.length() {
        return None;
    }

    let qp = second.start - first.start;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(first.start + r * t)
    } else {
        None
    }
}
