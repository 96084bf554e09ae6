//! Surface geometry shared by every animated effect.

use glam::Vec2;

/// Pixel dimensions of a rendering target, in CSS pixels, plus the device
/// pixel ratio needed to size the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl SurfaceBounds {
    /// Sanitizes raw measurements: non-finite or negative extents collapse
    /// to zero, and the pixel ratio never drops below 1.
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
            dpr: if dpr.is_finite() { dpr.max(1.0) } else { 1.0 },
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// What happens to an entity that leaves the surface. Fixed per effect
/// instance; never mixed within one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryPolicy {
    /// Toroidal topology: exit one edge, re-enter the opposite one offset by
    /// `margin`. Velocity is untouched.
    Wrap { margin: f32 },
    /// Hard boundary: positions are clamped `margin` inside the edges.
    Clamp { margin: f32 },
}

impl BoundaryPolicy {
    /// Applies the policy to one position. Always returns finite
    /// coordinates inside `[0, extent]`, even for degenerate bounds smaller
    /// than twice the margin.
    pub fn confine(&self, pos: Vec2, bounds: &SurfaceBounds) -> Vec2 {
        match *self {
            BoundaryPolicy::Wrap { margin } => Vec2::new(
                wrap_axis(pos.x, bounds.width, margin),
                wrap_axis(pos.y, bounds.height, margin),
            ),
            BoundaryPolicy::Clamp { margin } => Vec2::new(
                clamp_axis(pos.x, bounds.width, margin),
                clamp_axis(pos.y, bounds.height, margin),
            ),
        }
    }
}

fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    if !v.is_finite() {
        return extent * 0.5;
    }
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

fn clamp_axis(v: f32, extent: f32, margin: f32) -> f32 {
    if extent <= margin * 2.0 {
        // Degenerate surface: nothing fits, park at the midpoint.
        return extent * 0.5;
    }
    if !v.is_finite() {
        return extent * 0.5;
    }
    v.clamp(margin, extent - margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_reenters_at_opposite_edge_with_margin() {
        let b = SurfaceBounds::new(200.0, 100.0, 1.0);
        let p = BoundaryPolicy::Wrap { margin: 10.0 };
        let out = p.confine(Vec2::new(211.0, 50.0), &b);
        assert_eq!(out.x, -10.0);
        let out = p.confine(Vec2::new(-11.0, 50.0), &b);
        assert_eq!(out.x, 210.0);
    }

    #[test]
    fn clamp_handles_degenerate_bounds_without_nan() {
        let b = SurfaceBounds::new(8.0, 300.0, 1.0);
        let p = BoundaryPolicy::Clamp { margin: 60.0 };
        let out = p.confine(Vec2::new(f32::NAN, -500.0), &b);
        assert!(out.x.is_finite() && out.y.is_finite());
        assert!(out.x >= 0.0 && out.x <= 8.0);
        assert!(out.y >= 0.0 && out.y <= 300.0);
    }

    #[test]
    fn bounds_sanitize_bad_measurements() {
        let b = SurfaceBounds::new(f32::NAN, -5.0, f32::INFINITY);
        assert_eq!(b.width, 0.0);
        assert_eq!(b.height, 0.0);
        assert_eq!(b.dpr, 1.0);
    }
}
