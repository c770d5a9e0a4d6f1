//! Damped-spring interpolation for continuously animated properties.

use crate::constants::{SPRING_MAX_SUBSTEP_SEC, SPRING_MAX_TICK_SEC};
use glam::{Vec2, Vec3};
use std::ops::{Add, Mul, Sub};
use std::time::Duration;

/// A value type a spring can drive.
pub trait Animatable:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;

    /// Euclidean magnitude, used for rest detection.
    fn magnitude(self) -> f32;
}

impl Animatable for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn magnitude(self) -> f32 {
        self.abs()
    }
}

impl Animatable for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }
}

impl Animatable for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }
}

/// Physical parameters of a mass-spring-damper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub mass: f32,
    pub tension: f32,
    pub friction: f32,
    /// Displacement and speed below which the spring counts as settled.
    pub precision: f32,
}

impl SpringConfig {
    pub const DEFAULT: Self = Self::new(1.0, 170.0, 26.0);
    pub const GENTLE: Self = Self::new(1.0, 120.0, 14.0);
    pub const STIFF: Self = Self::new(1.0, 210.0, 20.0);
    /// Quick, lively response used for the entrance vibration.
    pub const ENTRANCE: Self = Self::new(1.0, 400.0, 20.0);
    /// Over-damped fade used for opacity and emissive intensity.
    pub const GLOW: Self = Self::new(1.0, 120.0, 30.0);

    pub const fn new(mass: f32, tension: f32, friction: f32) -> Self {
        Self {
            mass,
            tension,
            friction,
            precision: 0.001,
        }
    }

    pub const fn with_precision(mut self, precision: f32) -> Self {
        self.precision = precision;
        self
    }

    /// Friction at which this spring is critically damped.
    pub fn critical_friction(&self) -> f32 {
        2.0 * (self.tension * self.mass).sqrt()
    }

    /// True when the configuration cannot overshoot its target.
    pub fn is_overdamped(&self) -> bool {
        self.friction >= self.critical_friction()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring<T> {
    pub value: T,
    pub velocity: T,
    pub target: T,
    pub config: SpringConfig,
}

impl<T: Animatable> Spring<T> {
    /// A spring resting at `initial`.
    pub fn new(initial: T, config: SpringConfig) -> Self {
        Self {
            value: initial,
            velocity: T::ZERO,
            target: initial,
            config,
        }
    }

    /// Change the attractor, preserving value and velocity.
    #[inline]
    pub fn retarget(&mut self, target: T) {
        self.target = target;
    }

    /// Jump straight to `value` and stop.
    pub fn snap(&mut self, value: T) {
        self.value = value;
        self.target = value;
        self.velocity = T::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        let p = self.config.precision;
        (self.target - self.value).magnitude() <= p && self.velocity.magnitude() <= p
    }

    /// Advance in place and return the new value.
    pub fn advance(&mut self, dt: Duration) -> T {
        *self = tick(*self, dt);
        self.value
    }
}

/// Integrate `spring` forward by `dt`.
///
/// Uses semi-implicit Euler in equal sub-steps no longer than
/// `SPRING_MAX_SUBSTEP_SEC`. A spring that comes to rest snaps onto its target.
pub fn tick<T: Animatable>(mut spring: Spring<T>, dt: Duration) -> Spring<T> {
    let total = dt.as_secs_f32().min(SPRING_MAX_TICK_SEC);
    if total <= 0.0 || spring.is_at_rest() {
        if spring.is_at_rest() {
            spring.value = spring.target;
            spring.velocity = T::ZERO;
        }
        return spring;
    }

    let steps = (total / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
    let h = total / steps as f32;
    let inv_mass = 1.0 / spring.config.mass.max(f32::EPSILON);
    let SpringConfig {
        tension, friction, ..
    } = spring.config;

    for _ in 0..steps {
        let force = (spring.target - spring.value) * tension - spring.velocity * friction;
        spring.velocity = spring.velocity + force * (inv_mass * h);
        spring.value = spring.value + spring.velocity * h;
    }

    if spring.is_at_rest() {
        spring.value = spring.target;
        spring.velocity = T::ZERO;
    }
    spring
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dt_is_identity_while_moving() {
        let mut s = Spring::new(0.0_f32, SpringConfig::DEFAULT);
        s.retarget(1.0);
        let before = s;
        assert_eq!(tick(s, Duration::ZERO), before);
    }

    #[test]
    fn critical_friction_matches_formula() {
        let c = SpringConfig::new(4.0, 100.0, 0.0);
        assert!((c.critical_friction() - 40.0).abs() < 1e-5);
        assert!(SpringConfig::GLOW.is_overdamped());
        assert!(!SpringConfig::ENTRANCE.is_overdamped());
    }
}
