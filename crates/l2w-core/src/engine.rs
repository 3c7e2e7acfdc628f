use log::debug;
use rand::prelude::*;
use std::collections::VecDeque;

use crate::constants::{AMBIENT_TARGET_MAX, MELODIC_PROBE_LIMIT, TICKER_CAPACITY};
use crate::error::EngineError;
use crate::event::{Category, Event, Instrument};
use crate::magnitude::{pitch_index, radius};
use crate::placement::{place_on, Canvas};
use crate::probe::Direction;
use crate::visual::{Sprite, VisualElement, VisualElementRegistry};
use crate::voice::{InstrumentBanks, VoiceActivity};

/// Tuning knobs for voice selection and the console ticker.
///
/// - `melodic_probe_limit`: neighbours tried around the ideal pitch before retriggering
/// - `ambient_target_max`: highest ambient index a special notice may aim at
/// - `ticker_capacity`: how many recent keys are remembered
#[derive(Clone, Debug)]
pub struct EngineParams {
    pub melodic_probe_limit: usize,
    pub ambient_target_max: usize,
    pub ticker_capacity: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            melodic_probe_limit: MELODIC_PROBE_LIMIT,
            ambient_target_max: AMBIENT_TARGET_MAX,
            ticker_capacity: TICKER_CAPACITY,
        }
    }
}

/// Audio directive for the playback collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundCue {
    pub instrument: Instrument,
    pub voice_index: usize,
    pub retrigger: bool,
    pub volume: f32,
}

/// Everything the engine decided for one event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub element: Option<VisualElement>,
    pub sound: Option<SoundCue>,
}

/// Event-to-audiovisual mapping engine.
///
/// Owns the visible shapes and a seeded RNG; voice banks stay with the caller
/// and are only read. Typical usage:
/// - Construct with `Engine::new(params, seed)`
/// - Call `handle(&event, canvas, now_sec, &banks)` for every arriving event
/// - Call `tick(now_sec, &mut sprites)` once per frame and draw the sprites
pub struct Engine {
    pub params: EngineParams,
    registry: VisualElementRegistry,
    recent: VecDeque<String>,
    rng: StdRng,
}

impl Engine {
    pub fn new(params: EngineParams, seed: u64) -> Self {
        let recent = VecDeque::with_capacity(params.ticker_capacity);
        Self {
            params,
            registry: VisualElementRegistry::new(),
            recent,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Map one event to a shape and a sound.
    ///
    /// Nothing is recorded when an error is returned.
    pub fn handle<V: VoiceActivity>(
        &mut self,
        event: &Event,
        canvas: Canvas,
        now_sec: f64,
        banks: &InstrumentBanks<V>,
    ) -> Result<Response, EngineError> {
        let element = match event.category.color() {
            Some(color) => {
                let position = place_on(&event.key, canvas)?;
                Some(VisualElement::new(
                    position,
                    radius(event.magnitude),
                    color,
                    now_sec,
                ))
            }
            None => None,
        };

        let sound = match (event.category, event.magnitude) {
            (Category::Special, _) => Some(self.ambient_cue(banks)?),
            (_, Some(magnitude)) => Some(self.melodic_cue(magnitude, banks)?),
            (_, None) => {
                debug!("no magnitude for {:?}; staying silent", event.key);
                None
            }
        };

        if let Some(e) = &element {
            self.registry.insert(e.clone());
        }
        self.push_recent(&event.key);
        Ok(Response { element, sound })
    }

    /// Evict faded shapes and emit sprites for the survivors.
    pub fn tick(&mut self, now_sec: f64, out: &mut Vec<Sprite>) {
        self.registry.tick(now_sec, out);
    }

    pub fn registry(&self) -> &VisualElementRegistry {
        &self.registry
    }

    /// Most recent event keys, oldest first.
    pub fn recent_keys(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Drop all shapes and ticker entries.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.recent.clear();
    }

    fn melodic_cue<V: VoiceActivity>(
        &self,
        magnitude: i64,
        banks: &InstrumentBanks<V>,
    ) -> Result<SoundCue, EngineError> {
        let instrument = Instrument::for_magnitude(magnitude);
        let bank = banks.bank(instrument);
        let target = pitch_index(magnitude, bank.len())?;
        let alloc = bank.allocate(
            target,
            Direction::Down,
            Some(self.params.melodic_probe_limit),
        )?;
        debug!(
            "{instrument:?} size={magnitude} target={target} -> voice {} (retrigger={})",
            alloc.index, alloc.retrigger
        );
        Ok(SoundCue {
            instrument,
            voice_index: alloc.index,
            retrigger: alloc.retrigger,
            volume: instrument.volume(),
        })
    }

    fn ambient_cue<V: VoiceActivity>(
        &mut self,
        banks: &InstrumentBanks<V>,
    ) -> Result<SoundCue, EngineError> {
        let instrument = Instrument::Ambient;
        let bank = banks.bank(instrument);
        if bank.is_empty() {
            return Err(EngineError::EmptyVoiceBank);
        }
        let top = self.params.ambient_target_max.min(bank.len() - 1);
        let target = self.rng.gen_range(0..=top);
        let alloc = bank.allocate(target, Direction::Up, None)?;
        debug!(
            "ambient target={target} -> voice {} (retrigger={})",
            alloc.index, alloc.retrigger
        );
        Ok(SoundCue {
            instrument,
            voice_index: alloc.index,
            retrigger: alloc.retrigger,
            volume: instrument.volume(),
        })
    }

    fn push_recent(&mut self, key: &str) {
        if self.params.ticker_capacity == 0 {
            return;
        }
        while self.recent.len() >= self.params.ticker_capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(key.to_owned());
    }
}
