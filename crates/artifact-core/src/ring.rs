//! Per-ring lifecycle: dormant, pending delay, entrance, steady glow.

use crate::choreography::TimerToken;
use crate::constants::{
    ENTRANCE_STEPS, GLOW_COLOR, GLOW_INTENSITY, HOVER_INTENSITY, INNER_BAND, INNER_GLOW_OPACITY,
    OUTER_BAND, OUTER_GLOW_OPACITY, VISIBLE_OPACITY_EPSILON,
};
use crate::ripple::{Ripple, RippleVisual};
use crate::spring::{Spring, SpringConfig};
use crate::geometry::euler_xyz;
use glam::{Quat, Vec2, Vec3};
use std::time::Duration;

pub type RingId = usize;

/// Title and body shown in the info panel of a ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoPayload {
    pub title: String,
    pub content: String,
}

impl InfoPayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Static identity of a ring ornament.
#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    pub position: Vec3,
    /// XYZ euler angles, radians.
    pub rotation: Vec3,
    pub size: f32,
    pub delay: Duration,
    pub info: Option<InfoPayload>,
}

impl RingConfig {
    pub fn new(position: Vec3, size: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            size,
            delay: Duration::ZERO,
            info: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_info(mut self, info: InfoPayload) -> Self {
        self.info = Some(info);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingPhase {
    Dormant,
    Pending { timer: TimerToken },
    /// Playing entrance step `step` of `ENTRANCE_STEPS`.
    Entering { step: usize },
    Steady,
}

impl RingPhase {
    #[inline]
    pub fn is_glowing(self) -> bool {
        matches!(self, RingPhase::Entering { .. } | RingPhase::Steady)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingEvent {
    Activate(TimerToken),
    DelayElapsed(TimerToken),
    Deactivate,
    PointerEnter,
    PointerLeave,
    Click,
    PointerMissed,
}

/// One concentric band of a ring as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandVisual {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub emissive: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingVisual {
    pub id: RingId,
    /// World position including the vibration offset.
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub outer: BandVisual,
    pub inner: BandVisual,
    pub ripple: Option<RippleVisual>,
}

/// Pickable disc of a glowing ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickDisc {
    pub id: RingId,
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug)]
struct RingSprings {
    vibration: Spring<Vec2>,
    scale: Spring<f32>,
    outer_opacity: Spring<f32>,
    inner_opacity: Spring<f32>,
    emissive: Spring<f32>,
}

impl RingSprings {
    fn dormant() -> Self {
        Self {
            vibration: Spring::new(Vec2::ZERO, SpringConfig::ENTRANCE),
            scale: Spring::new(1.0, SpringConfig::ENTRANCE),
            outer_opacity: Spring::new(0.0, SpringConfig::GLOW),
            inner_opacity: Spring::new(0.0, SpringConfig::GLOW),
            emissive: Spring::new(0.0, SpringConfig::GLOW),
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.vibration.advance(dt);
        self.scale.advance(dt);
        self.outer_opacity.advance(dt);
        self.inner_opacity.advance(dt);
        self.emissive.advance(dt);
    }
}

#[derive(Clone, Debug)]
pub struct Ring {
    id: RingId,
    config: RingConfig,
    phase: RingPhase,
    has_played_entrance: bool,
    hovered: bool,
    panel_open: bool,
    ripple: Ripple,
    springs: RingSprings,
}

impl Ring {
    pub fn new(id: RingId, config: RingConfig) -> Self {
        let ripple = Ripple::new(config.size);
        Self {
            id,
            config,
            phase: RingPhase::Dormant,
            has_played_entrance: false,
            hovered: false,
            panel_open: false,
            ripple,
            springs: RingSprings::dormant(),
        }
    }

    pub fn id(&self) -> RingId {
        self.id
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn phase(&self) -> RingPhase {
        self.phase
    }

    pub fn info(&self) -> Option<&InfoPayload> {
        self.config.info.as_ref()
    }

    pub fn has_played_entrance(&self) -> bool {
        self.has_played_entrance
    }

    /// Glowing is the one condition both the glow springs and the ripple key off.
    #[inline]
    pub fn is_glowing(&self) -> bool {
        self.phase.is_glowing()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered && self.is_glowing()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// The entrance sequence has fully settled and the ring is steady.
    pub fn entrance_complete(&self) -> bool {
        self.has_played_entrance && self.phase == RingPhase::Steady
    }

    pub fn ripple(&self) -> &Ripple {
        &self.ripple
    }

    pub fn emissive_target(&self) -> f32 {
        self.springs.emissive.target
    }

    pub fn outer_opacity_target(&self) -> f32 {
        self.springs.outer_opacity.target
    }

    pub fn inner_opacity_target(&self) -> f32 {
        self.springs.inner_opacity.target
    }

    pub fn emissive(&self) -> f32 {
        self.springs.emissive.value
    }

    pub fn vibration_offset(&self) -> Vec2 {
        self.springs.vibration.value
    }

    pub fn scale(&self) -> f32 {
        self.springs.scale.value
    }

    pub fn world_rotation(&self) -> Quat {
        euler_xyz(self.config.rotation)
    }

    /// Apply one event. Returns true when phase or an overlay flag changed.
    pub fn handle(&mut self, event: RingEvent) -> bool {
        let before = (self.phase, self.hovered, self.panel_open);
        match (self.phase, event) {
            (RingPhase::Dormant | RingPhase::Pending { .. }, RingEvent::Activate(timer)) => {
                self.phase = RingPhase::Pending { timer };
            }
            (RingPhase::Entering { .. } | RingPhase::Steady, RingEvent::Activate(_)) => {}
            (RingPhase::Pending { timer }, RingEvent::DelayElapsed(fired)) if timer == fired => {
                self.begin_glow();
            }
            (_, RingEvent::DelayElapsed(_)) => {}
            (RingPhase::Dormant, RingEvent::Deactivate) => {}
            (_, RingEvent::Deactivate) => self.go_dormant(),
            (RingPhase::Entering { .. } | RingPhase::Steady, RingEvent::PointerEnter) => {
                self.hovered = true;
            }
            (_, RingEvent::PointerEnter) => {}
            (_, RingEvent::PointerLeave) => self.hovered = false,
            (RingPhase::Entering { .. } | RingPhase::Steady, RingEvent::Click)
                if self.config.info.is_some() =>
            {
                self.panel_open = !self.panel_open;
            }
            (_, RingEvent::Click) => {}
            (_, RingEvent::PointerMissed) => self.panel_open = false,
        }

        let changed = before != (self.phase, self.hovered, self.panel_open);
        if changed {
            log::debug!(
                "[ring {}] {:?} -> {:?} on {:?} (hovered={}, panel={})",
                self.id,
                before.0,
                self.phase,
                event,
                self.hovered,
                self.panel_open
            );
            self.retarget_glow();
        }
        changed
    }

    /// Per-frame update: ripple sweep, spring integration, entrance chaining.
    pub fn update(&mut self, dt: Duration) {
        if self.is_glowing() {
            self.ripple.advance();
        }
        self.springs.advance(dt);

        if let RingPhase::Entering { step } = self.phase {
            if self.springs.vibration.is_at_rest() && self.springs.scale.is_at_rest() {
                let next = step + 1;
                if next < ENTRANCE_STEPS.len() {
                    self.phase = RingPhase::Entering { step: next };
                    self.retarget_entrance(next);
                } else {
                    self.phase = RingPhase::Steady;
                    log::debug!("[ring {}] entrance settled", self.id);
                }
            }
        }
    }

    /// Visual state for the renderer, `None` once the ring has faded out.
    pub fn visual(&self) -> Option<RingVisual> {
        let s = &self.springs;
        if s.outer_opacity.value <= VISIBLE_OPACITY_EPSILON && !self.is_glowing() {
            return None;
        }
        let rotation = self.world_rotation();
        let offset = s.vibration.value;
        let scale = s.scale.value;
        let size = self.config.size * scale;
        let band = |fractions: [f32; 2], opacity: f32| BandVisual {
            inner_radius: fractions[0] * size,
            outer_radius: fractions[1] * size,
            color: GLOW_COLOR,
            opacity,
            emissive: s.emissive.value,
        };
        Some(RingVisual {
            id: self.id,
            position: self.config.position + rotation * offset.extend(0.0),
            rotation,
            scale,
            outer: band(OUTER_BAND, s.outer_opacity.value),
            inner: band(INNER_BAND, s.inner_opacity.value),
            ripple: self.is_glowing().then(|| self.ripple.visual()),
        })
    }

    pub fn pick_disc(&self) -> Option<PickDisc> {
        if !self.is_glowing() {
            return None;
        }
        let rotation = self.world_rotation();
        Some(PickDisc {
            id: self.id,
            center: self.config.position + rotation * self.springs.vibration.value.extend(0.0),
            normal: rotation * Vec3::Z,
            radius: OUTER_BAND[1] * self.config.size * self.springs.scale.value,
        })
    }

    fn begin_glow(&mut self) {
        if self.has_played_entrance {
            self.phase = RingPhase::Steady;
            return;
        }
        self.has_played_entrance = true;
        self.phase = RingPhase::Entering { step: 0 };
        self.retarget_entrance(0);
    }

    fn go_dormant(&mut self) {
        self.phase = RingPhase::Dormant;
        self.has_played_entrance = false;
        self.hovered = false;
        self.panel_open = false;
        self.springs.vibration.retarget(Vec2::ZERO);
        self.springs.scale.retarget(1.0);
    }

    fn retarget_entrance(&mut self, step: usize) {
        let [x, y, scale] = ENTRANCE_STEPS[step];
        self.springs.vibration.retarget(Vec2::new(x, y));
        self.springs.scale.retarget(scale);
    }

    fn retarget_glow(&mut self) {
        let (outer, inner, emissive) = if self.is_glowing() {
            let intensity = if self.is_hovered() && self.config.info.is_some() {
                HOVER_INTENSITY
            } else {
                GLOW_INTENSITY
            };
            (OUTER_GLOW_OPACITY, INNER_GLOW_OPACITY, intensity)
        } else {
            (0.0, 0.0, 0.0)
        };
        self.springs.outer_opacity.retarget(outer);
        self.springs.inner_opacity.retarget(inner);
        self.springs.emissive.retarget(emissive);
    }
}
