//! Voice banks and collision-avoiding voice selection.
//!
//! The engine never owns playback. Banks hold whatever the audio collaborator
//! hands over (playback handles, plain flags, ...) as long as it can report
//! whether a voice is currently sounding through [`VoiceActivity`].

use log::debug;
use smallvec::SmallVec;

use crate::error::EngineError;
use crate::event::Instrument;
use crate::probe::{probe, Direction};

/// Read-only view of a voice's playback state.
pub trait VoiceActivity {
    fn is_busy(&self) -> bool;
}

impl VoiceActivity for bool {
    #[inline]
    fn is_busy(&self) -> bool {
        *self
    }
}

impl<T: VoiceActivity + ?Sized> VoiceActivity for &T {
    #[inline]
    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
}

/// Which voice to play, and whether it must be restarted from the beginning.
///
/// `retrigger == false`: the voice is idle, just start it.
/// `retrigger == true`: every probed voice was busy; seek `index` to zero and
/// play it again rather than dropping the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub index: usize,
    pub retrigger: bool,
}

/// Pick a voice near `target` that is not currently playing.
///
/// Candidates come from [`probe`] with the given `direction` and `limit`. When
/// none of them is idle the target itself is retriggered.
pub fn allocate<V: VoiceActivity>(
    voices: &[V],
    target: usize,
    direction: Direction,
    limit: Option<usize>,
) -> Result<Allocation, EngineError> {
    if voices.is_empty() {
        return Err(EngineError::EmptyVoiceBank);
    }
    if target >= voices.len() {
        return Err(EngineError::InvalidVoiceIndex {
            index: target,
            len: voices.len(),
        });
    }
    let idle = probe(voices.len(), target, direction, limit).find(|&i| !voices[i].is_busy());
    Ok(match idle {
        Some(index) => Allocation {
            index,
            retrigger: false,
        },
        None => {
            debug!("voice contention at {target}/{}; retriggering", voices.len());
            Allocation {
                index: target,
                retrigger: true,
            }
        }
    })
}

/// Ordered voices of one instrument; index 0 is the lowest pitch.
///
/// The voice count is fixed at construction: there is no way to add or remove
/// voices afterwards, only to mutate the voices in place.
#[derive(Clone, Debug, Default)]
pub struct VoiceBank<V> {
    voices: SmallVec<[V; 32]>,
}

impl<V> VoiceBank<V> {
    pub fn new(voices: impl IntoIterator<Item = V>) -> Self {
        Self {
            voices: voices.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.voices.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.voices.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.voices.iter()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.voices
    }
}

impl<V: VoiceActivity> VoiceBank<V> {
    pub fn busy_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_busy()).count()
    }

    /// [`allocate`] over this bank.
    pub fn allocate(
        &self,
        target: usize,
        direction: Direction,
        limit: Option<usize>,
    ) -> Result<Allocation, EngineError> {
        allocate(&self.voices, target, direction, limit)
    }
}

/// The three banks the engine draws from, addressed by [`Instrument`].
#[derive(Clone, Debug, Default)]
pub struct InstrumentBanks<V> {
    pub ambient: VoiceBank<V>,
    pub negative: VoiceBank<V>,
    pub positive: VoiceBank<V>,
}

impl<V> InstrumentBanks<V> {
    pub fn new(ambient: VoiceBank<V>, negative: VoiceBank<V>, positive: VoiceBank<V>) -> Self {
        Self {
            ambient,
            negative,
            positive,
        }
    }

    pub fn bank(&self, instrument: Instrument) -> &VoiceBank<V> {
        match instrument {
            Instrument::Ambient => &self.ambient,
            Instrument::Negative => &self.negative,
            Instrument::Positive => &self.positive,
        }
    }

    pub fn bank_mut(&mut self, instrument: Instrument) -> &mut VoiceBank<V> {
        match instrument {
            Instrument::Ambient => &mut self.ambient,
            Instrument::Negative => &mut self.negative,
            Instrument::Positive => &mut self.positive,
        }
    }
}
