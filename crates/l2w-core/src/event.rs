use crate::constants::{
    AMBIENT_VOLUME_BOOST, ANONYMOUS_COLOR, BOT_COLOR, NORMAL_COLOR, START_VOLUME,
};

/// Kind of edit, as classified by the feed.
///
/// `Special` covers non-visual notices such as new user registrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Normal,
    Anonymous,
    Bot,
    Special,
}

impl Category {
    /// Palette entry for visible categories; `None` for `Special`.
    pub fn color(self) -> Option<[f32; 3]> {
        match self {
            Category::Normal => Some(NORMAL_COLOR),
            Category::Anonymous => Some(ANONYMOUS_COLOR),
            Category::Bot => Some(BOT_COLOR),
            Category::Special => None,
        }
    }

    pub fn is_visual(self) -> bool {
        self.color().is_some()
    }
}

/// A parsed feed record handed to the engine.
///
/// Fields:
/// - `key`: stable identifier of the edited target (e.g. a page title)
/// - `magnitude`: signed size of the change, absent when the feed omits it
/// - `category`: who made the edit, or whether it is a special notice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub key: String,
    pub magnitude: Option<i64>,
    pub category: Category,
}

impl Event {
    pub fn new(key: impl Into<String>, magnitude: Option<i64>, category: Category) -> Self {
        Self {
            key: key.into(),
            magnitude,
            category,
        }
    }
}

/// Timbre families, each backed by its own voice bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Long swells played for special notices.
    Ambient,
    /// Melodic voice for edits that removed content.
    Negative,
    /// Melodic voice for edits that added content (or changed nothing).
    Positive,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Ambient, Instrument::Negative, Instrument::Positive];

    /// Melodic instrument selected by the sign of an edit's magnitude.
    pub fn for_magnitude(magnitude: i64) -> Self {
        if magnitude < 0 {
            Instrument::Negative
        } else {
            Instrument::Positive
        }
    }

    /// Playback gain the audio collaborator should apply to this bank.
    pub fn volume(self) -> f32 {
        match self {
            Instrument::Ambient => (START_VOLUME + AMBIENT_VOLUME_BOOST).min(1.0),
            Instrument::Negative | Instrument::Positive => START_VOLUME,
        }
    }
}
