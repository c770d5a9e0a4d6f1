use crate::choreography::Choreographer;
use crate::constants::{front_cluster_delays, TARGET_SIZE};
use crate::mesh::{fit_scale, MeshAsset};
use crate::ring::{InfoPayload, PickDisc, Ring, RingConfig, RingEvent, RingId, RingVisual};
use glam::Vec3;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub rings: Vec<RingConfig>,
    pub target_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rings: front_cluster(),
            target_size: TARGET_SIZE,
        }
    }
}

/// Five rings in front of the model, staggered 0/300/300/600/600 ms.
pub fn front_cluster() -> Vec<RingConfig> {
    let [d0, d1, d2, d3, d4] = front_cluster_delays();
    vec![
        RingConfig::new(Vec3::new(0.0, 0.2, 1.6), 0.6)
            .with_delay(d0)
            .with_info(InfoPayload::new(
                "Core Chamber",
                "Primary energy reservoir. Output stabilises once the outer lattice is charged.",
            )),
        RingConfig::new(Vec3::new(-1.7, 1.0, 1.1), 0.45)
            .with_rotation(Vec3::new(0.0, 0.35, 0.0))
            .with_delay(d1)
            .with_info(InfoPayload::new(
                "Left Conduit",
                "Routes charge from the core into the upper shell.",
            )),
        RingConfig::new(Vec3::new(1.7, 1.0, 1.1), 0.45)
            .with_rotation(Vec3::new(0.0, -0.35, 0.0))
            .with_delay(d2),
        RingConfig::new(Vec3::new(-1.9, -1.1, 0.9), 0.35)
            .with_rotation(Vec3::new(0.2, 0.45, 0.0))
            .with_delay(d3)
            .with_info(InfoPayload::new(
                "Resonance Node",
                "Dampens oscillation in the lower shell during power-up.",
            )),
        RingConfig::new(Vec3::new(1.9, -1.1, 0.9), 0.35)
            .with_rotation(Vec3::new(0.2, -0.45, 0.0))
            .with_delay(d4),
    ]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// An open info panel and where to anchor it.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoPanel {
    pub ring: RingId,
    pub title: String,
    pub content: String,
    /// World position of the ring the panel belongs to.
    pub anchor: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub rings: Vec<RingVisual>,
    pub panels: Vec<InfoPanel>,
    pub cursor: Cursor,
    /// Rings whose delay elapsed this frame.
    pub fired: SmallVec<[RingId; 8]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
    One(RingId),
    All,
}

#[derive(Debug)]
pub struct ArtifactScene {
    rings: Vec<Ring>,
    choreographer: Choreographer,
    hover_target: Option<RingId>,
    queue: VecDeque<(Delivery, RingEvent)>,
    last_frame: Option<Duration>,
    target_size: f32,
    model_scale: f32,
}

impl ArtifactScene {
    pub fn new(config: SceneConfig) -> Self {
        let rings = config
            .rings
            .into_iter()
            .enumerate()
            .map(|(id, cfg)| Ring::new(id, cfg))
            .collect();
        Self {
            rings,
            choreographer: Choreographer::new(),
            hover_target: None,
            queue: VecDeque::new(),
            last_frame: None,
            target_size: config.target_size,
            model_scale: 1.0,
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn ring(&self, id: RingId) -> Option<&Ring> {
        self.rings.get(id)
    }

    pub fn choreographer(&self) -> &Choreographer {
        &self.choreographer
    }

    pub fn is_active(&self) -> bool {
        self.choreographer.is_active()
    }

    pub fn model_scale(&self) -> f32 {
        self.model_scale
    }

    /// Fit the loaded mesh (or its absence) to the target size.
    pub fn fit_model(&mut self, mesh: Option<&MeshAsset>) -> f32 {
        let bounds = mesh.map(|m| m.bounds());
        self.model_scale = fit_scale(bounds.as_ref(), self.target_size);
        log::info!("[scene] model scale {:.4}", self.model_scale);
        self.model_scale
    }

    /// Global activation signal. Deactivation takes effect immediately, before
    /// the next frame can poll any timer.
    pub fn set_active(&mut self, active: bool, now: Duration) -> bool {
        let changed = self
            .choreographer
            .on_global_toggle(active, now, &mut self.rings);
        if changed && !active {
            self.hover_target = None;
        }
        changed
    }

    pub fn toggle(&mut self, now: Duration) -> bool {
        let next = !self.is_active();
        self.set_active(next, now);
        next
    }

    /// Current pointer target. Only differences from the previous target
    /// produce events.
    pub fn hover(&mut self, target: Option<RingId>) {
        let target = target.filter(|id| self.known(*id));
        if target == self.hover_target {
            return;
        }
        if let Some(prev) = self.hover_target {
            self.queue.push_back((Delivery::One(prev), RingEvent::PointerLeave));
        }
        if let Some(next) = target {
            self.queue.push_back((Delivery::One(next), RingEvent::PointerEnter));
        }
        self.hover_target = target;
    }

    pub fn hover_target(&self) -> Option<RingId> {
        self.hover_target
    }

    /// Click on `target`, or on empty space when `None`.
    pub fn click(&mut self, target: Option<RingId>) {
        match target {
            Some(id) if self.known(id) => {
                log::info!("[click] ring {id}");
                for ring in &self.rings {
                    let ev = if ring.id() == id {
                        RingEvent::Click
                    } else {
                        RingEvent::PointerMissed
                    };
                    self.queue.push_back((Delivery::One(ring.id()), ev));
                }
            }
            Some(id) => log::warn!("[click] unknown ring {id}"),
            None => self.pointer_missed(),
        }
    }

    pub fn pointer_missed(&mut self) {
        self.queue.push_back((Delivery::All, RingEvent::PointerMissed));
    }

    /// Hit regions of every pickable ring.
    pub fn pick_discs(&self) -> impl Iterator<Item = PickDisc> + '_ {
        self.rings.iter().filter_map(Ring::pick_disc)
    }

    pub fn cursor(&self) -> Cursor {
        if self.rings.iter().any(Ring::is_hovered) {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Advance to `now` and report what to draw.
    ///
    /// Due delay timers fire first, then queued pointer events are delivered,
    /// then springs and ripples integrate.
    pub fn frame(&mut self, now: Duration) -> FrameOutput {
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_frame = Some(now);

        let fired = self.choreographer.poll(now, &mut self.rings);

        // A pointer resting on a ring that was dark when it arrived.
        if let Some(id) = self.hover_target {
            if self.rings.get(id).is_some_and(|r| r.is_glowing() && !r.is_hovered()) {
                self.queue.push_back((Delivery::One(id), RingEvent::PointerEnter));
            }
        }

        while let Some((delivery, ev)) = self.queue.pop_front() {
            match delivery {
                Delivery::One(id) => {
                    if let Some(ring) = self.rings.get_mut(id) {
                        ring.handle(ev);
                    }
                }
                Delivery::All => {
                    for ring in &mut self.rings {
                        ring.handle(ev);
                    }
                }
            }
        }

        for ring in &mut self.rings {
            ring.update(dt);
        }

        FrameOutput {
            rings: self.rings.iter().filter_map(Ring::visual).collect(),
            panels: self.panels(),
            cursor: self.cursor(),
            fired,
        }
    }

    fn panels(&self) -> Vec<InfoPanel> {
        self.rings
            .iter()
            .filter(|r| r.is_panel_open())
            .filter_map(|r| {
                let info = r.info()?;
                Some(InfoPanel {
                    ring: r.id(),
                    title: info.title.clone(),
                    content: info.content.clone(),
                    anchor: r.config().position,
                })
            })
            .collect()
    }

    fn known(&self, id: RingId) -> bool {
        id < self.rings.len()
    }
}
