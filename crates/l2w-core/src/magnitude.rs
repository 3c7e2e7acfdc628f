use crate::constants::{MAX_PITCH_PERCENT, MIN_RADIUS, PITCH_CURVE_BASE, RADIUS_SCALE};
use crate::error::EngineError;

/// Visual radius for an edit of the given size.
///
/// Square-root scaling keeps large edits from dominating; an absent size is
/// treated as zero and lands on `MIN_RADIUS`.
pub fn radius(magnitude: Option<i64>) -> f32 {
    let size = magnitude.unwrap_or(0).unsigned_abs() as f32;
    (RADIUS_SCALE * size.sqrt()).max(MIN_RADIUS)
}

/// Pitch rank within a bank of `voice_count` voices.
///
/// Small edits map to the top of the bank and large edits fall logarithmically
/// toward index 0 without overshooting it. Only `|magnitude|` matters here;
/// the sign picks the instrument (see [`crate::Instrument::for_magnitude`]).
pub fn pitch_index(magnitude: i64, voice_count: usize) -> Result<usize, EngineError> {
    if voice_count == 0 {
        return Err(EngineError::EmptyVoiceBank);
    }
    let size = magnitude.unsigned_abs() as f64;
    let pitch_adjust = (size + PITCH_CURVE_BASE).ln() / PITCH_CURVE_BASE.ln();
    let pitch_percent = MAX_PITCH_PERCENT - pitch_adjust.min(MAX_PITCH_PERCENT);
    let raw = (pitch_percent / 100.0 * voice_count as f64).floor();
    let top = (voice_count - 1) as f64;
    Ok(raw.clamp(0.0, top).round() as usize)
}
