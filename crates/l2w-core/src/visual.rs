//! Fading shapes and the registry that owns them.
//!
//! Each element moves one way through Created -> Fading -> Expired. Opacity
//! decays linearly from `START_OPACITY` to zero over `FADEOUT_SECONDS`; the
//! first [`VisualElementRegistry::tick`] that sees a non-positive opacity
//! drops the element for good.

use glam::IVec2;
use log::trace;

use crate::constants::{FADEOUT_SECONDS, START_OPACITY};

/// A shape drawn for one event. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualElement {
    position: IVec2,
    radius: f32,
    color: [f32; 3],
    created_at: f64,
}

impl VisualElement {
    pub fn new(position: IVec2, radius: f32, color: [f32; 3], created_at: f64) -> Self {
        Self {
            position,
            radius,
            color,
            created_at,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// `1.0 - age / FADEOUT_SECONDS`; zero or below means expired.
    pub fn opacity(&self, now_sec: f64) -> f32 {
        let fade = (now_sec - self.created_at) / FADEOUT_SECONDS;
        (START_OPACITY as f64 - fade) as f32
    }

    /// Instant at which opacity reaches zero.
    pub fn expires_at(&self) -> f64 {
        self.created_at + FADEOUT_SECONDS
    }

    pub fn is_visible(&self, now_sec: f64) -> bool {
        now_sec < self.expires_at()
    }

    /// Render record for this element at the given opacity.
    pub fn sprite(&self, opacity: f32) -> Sprite {
        Sprite {
            position: self.position.as_vec2().to_array(),
            radius: self.radius,
            color: [self.color[0], self.color[1], self.color[2], opacity],
        }
    }
}

/// Per-frame draw record handed to the renderer.
///
/// Laid out for direct upload into a GPU instance buffer; the alpha channel
/// of `color` carries the current opacity.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sprite {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl Sprite {
    pub fn opacity(&self) -> f32 {
        self.color[3]
    }
}

/// Owns every visible element in insertion order.
#[derive(Clone, Debug, Default)]
pub struct VisualElementRegistry {
    elements: Vec<VisualElement>,
}

impl VisualElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. Repeated keys produce independent, overlapping shapes.
    pub fn insert(&mut self, element: VisualElement) {
        self.elements.push(element);
    }

    /// Evict expired elements, then push a sprite for every survivor into `out`.
    ///
    /// Survivors keep their insertion order. Calling again with the same `now_sec`
    /// and no insert in between yields the same sprites.
    pub fn tick(&mut self, now_sec: f64, out: &mut Vec<Sprite>) {
        let before = self.elements.len();
        self.elements.retain(|e| e.is_visible(now_sec));
        let evicted = before - self.elements.len();
        if evicted > 0 {
            trace!("evicted {evicted} faded elements, {} remain", self.elements.len());
        }
        out.reserve(self.elements.len());
        for e in &self.elements {
            out.push(e.sprite(e.opacity(now_sec).clamp(0.0, START_OPACITY)));
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VisualElement> {
        self.elements.iter()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}
