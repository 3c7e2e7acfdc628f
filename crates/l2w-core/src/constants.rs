// Shared visual/audio tuning constants for the mapping engine.

// Visual sizing
pub const MIN_RADIUS: f32 = 3.0; // floor so zero-size edits stay visible
pub const RADIUS_SCALE: f32 = 5.0; // multiplier applied to sqrt(|magnitude|)

// Fade lifecycle
pub const START_OPACITY: f32 = 1.0;
pub const FADEOUT_SECONDS: f64 = 15.0; // time from insertion to eviction

// Pitch curve
pub const PITCH_CURVE_BASE: f64 = 1.071_530_780_811_148_687_197_809_9;
pub const MAX_PITCH_PERCENT: f64 = 100.0;

// Default palette for the three visible categories
pub const NORMAL_COLOR: [f32; 3] = [1.0, 1.0, 1.0]; // white
pub const ANONYMOUS_COLOR: [f32; 3] = [46.0 / 255.0, 204.0 / 255.0, 113.0 / 255.0]; // green
pub const BOT_COLOR: [f32; 3] = [155.0 / 255.0, 89.0 / 255.0, 182.0 / 255.0]; // purple

// Playback levels
pub const START_VOLUME: f32 = 0.2;
pub const AMBIENT_VOLUME_BOOST: f32 = 0.2; // swells are quieter and overlap less

// Voice selection
pub const MELODIC_PROBE_LIMIT: usize = 5; // neighbours tried before retriggering
pub const AMBIENT_TARGET_MAX: usize = 2; // new-user swells aim at one of the lowest three

// Frame cadence
pub const TICK_HZ: f64 = 60.0;

// Console feed
pub const TICKER_CAPACITY: usize = 16;

// Feed key that marks a new-user notice rather than an edit
pub const NEW_USER_KEY: &str = "Special:Log/newusers";
