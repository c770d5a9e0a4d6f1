use crate::constants::{
    RIPPLE_BAND_WIDTH, RIPPLE_LIMIT_FACTOR, RIPPLE_MIN_RADIUS, RIPPLE_PEAK_OPACITY,
    RIPPLE_RESET_RADIUS, RIPPLE_STEP,
};

/// Outward-pulsing halo around a ring.
///
/// Advances a fixed step per rendered frame and is independent of the spring
/// system. The owner only calls [`Ripple::advance`] while the ring glows, so a
/// dark ring keeps whatever radius it had.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    radius: f32,
    size: f32,
}

/// Rendered ripple band for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleVisual {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub opacity: f32,
}

impl Ripple {
    pub fn new(size: f32) -> Self {
        let mut ripple = Self { radius: 0.0, size };
        ripple.radius = ripple.reset_radius();
        ripple
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn limit(&self) -> f32 {
        RIPPLE_LIMIT_FACTOR * self.size
    }

    /// Restart radius. Rings too small for the usual reset restart halfway
    /// between the minimum radius and the limit.
    #[inline]
    pub fn reset_radius(&self) -> f32 {
        RIPPLE_RESET_RADIUS.min(0.5 * (RIPPLE_MIN_RADIUS + self.limit()))
    }

    /// One frame of sweep; wraps back to the reset radius at the limit.
    pub fn advance(&mut self) {
        self.radius += RIPPLE_STEP;
        if self.radius >= self.limit() {
            self.radius = self.reset_radius();
        }
    }

    pub fn visual(&self) -> RippleVisual {
        let limit = self.limit();
        let fade = if limit > 0.0 {
            (1.0 - self.radius / limit).max(0.0)
        } else {
            0.0
        };
        RippleVisual {
            inner_radius: (self.radius - RIPPLE_BAND_WIDTH).max(RIPPLE_MIN_RADIUS),
            outer_radius: self.radius,
            opacity: RIPPLE_PEAK_OPACITY * fade,
        }
    }
}
