//! Simulated audio collaborator.
//!
//! Stands in for loaded sound files: every voice is "playing" for a fixed
//! duration after it is started or retriggered.

use l2w_core::{Instrument, InstrumentBanks, SoundCue, VoiceActivity, VoiceBank};

#[derive(Clone, Debug, Default)]
pub struct SimVoice {
    busy_until: f64,
    playing: bool,
}

impl VoiceActivity for SimVoice {
    fn is_busy(&self) -> bool {
        self.playing
    }
}

/// Durations and bank sizes for the simulated instruments.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    pub ambient_voices: usize,
    pub melodic_voices: usize,
    pub note_secs: f64,
    pub swell_secs: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PlaybackStats {
    pub started: usize,
    pub retriggered: usize,
}

pub struct Playback {
    pub banks: InstrumentBanks<SimVoice>,
    pub stats: PlaybackStats,
    note_secs: f64,
    swell_secs: f64,
}

impl Playback {
    pub fn new(config: &PlaybackConfig) -> Self {
        let bank = |n: usize| VoiceBank::new((0..n).map(|_| SimVoice::default()));
        Self {
            banks: InstrumentBanks::new(
                bank(config.ambient_voices),
                bank(config.melodic_voices),
                bank(config.melodic_voices),
            ),
            stats: PlaybackStats::default(),
            note_secs: config.note_secs,
            swell_secs: config.swell_secs,
        }
    }

    /// Refresh every voice's playing flag for `now_sec`.
    pub fn refresh(&mut self, now_sec: f64) {
        for instrument in Instrument::ALL {
            let bank = self.banks.bank_mut(instrument);
            for i in 0..bank.len() {
                if let Some(v) = bank.get_mut(i) {
                    v.playing = now_sec < v.busy_until;
                }
            }
        }
    }

    /// Start (or restart from zero) the voice named by `cue`.
    pub fn play(&mut self, cue: &SoundCue, now_sec: f64) {
        let length = match cue.instrument {
            Instrument::Ambient => self.swell_secs,
            Instrument::Negative | Instrument::Positive => self.note_secs,
        };
        if let Some(v) = self.banks.bank_mut(cue.instrument).get_mut(cue.voice_index) {
            v.busy_until = now_sec + length;
            v.playing = true;
        }
        if cue.retrigger {
            self.stats.retriggered += 1;
        } else {
            self.stats.started += 1;
        }
    }

    pub fn busy_voices(&self) -> usize {
        Instrument::ALL
            .iter()
            .map(|&i| self.banks.bank(i).busy_count())
            .sum()
    }
}
