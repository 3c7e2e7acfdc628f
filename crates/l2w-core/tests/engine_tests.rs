// Host-side integration tests for the mapping engine.

use glam::IVec2;
use l2w_core::*;
use std::time::Duration;

fn make_banks(ambient: usize, negative: usize, positive: usize) -> InstrumentBanks<bool> {
    InstrumentBanks::new(
        VoiceBank::new(vec![false; ambient]),
        VoiceBank::new(vec![false; negative]),
        VoiceBank::new(vec![false; positive]),
    )
}

fn make_engine() -> Engine {
    Engine::new(EngineParams::default(), 42)
}

#[test]
fn anonymous_removal_end_to_end() {
    let mut engine = make_engine();
    let mut banks = make_banks(3, 27, 27);
    // Make the ideal voice busy so the probe has to move.
    let target = pitch_index(-500, 27).unwrap();
    *banks.bank_mut(Instrument::Negative).get_mut(target).unwrap() = true;

    let t0 = 50.0;
    let event = Event::new("Foo", Some(-500), Category::Anonymous);
    let response = engine
        .handle(&event, Canvas::new(400, 300), t0, &banks)
        .unwrap();

    let element = response.element.expect("anonymous edits are visible");
    assert_eq!(element.position(), IVec2::new(13, 137));
    assert_eq!(element.position(), place("Foo", 400, 300).unwrap());
    assert_eq!(element.color(), ANONYMOUS_COLOR);
    assert_eq!(element.radius(), (RADIUS_SCALE * 500f32.sqrt()).max(MIN_RADIUS));
    assert_eq!(element.created_at(), t0);

    let sound = response.sound.expect("sized edits are audible");
    assert_eq!(sound.instrument, Instrument::Negative);
    assert!(!sound.retrigger);
    assert_ne!(sound.voice_index, target);
    assert!(sound.voice_index.abs_diff(target) <= 2);
    assert!(!banks.bank(Instrument::Negative).as_slice()[sound.voice_index]);
    assert_eq!(sound.volume, START_VOLUME);

    let mut sprites = Vec::new();
    engine.tick(t0, &mut sprites);
    assert_eq!(sprites.len(), 1);
    assert_eq!(sprites[0].opacity(), 1.0);
}

#[test]
fn positive_and_zero_sizes_use_positive_bank() {
    let mut engine = make_engine();
    let banks = make_banks(3, 10, 10);
    for size in [0, 1, 250] {
        let ev = Event::new("Bar", Some(size), Category::Normal);
        let sound = engine
            .handle(&ev, Canvas::new(100, 100), 0.0, &banks)
            .unwrap()
            .sound
            .unwrap();
        assert_eq!(sound.instrument, Instrument::Positive);
        assert_eq!(sound.voice_index, pitch_index(size, 10).unwrap());
    }
}

#[test]
fn contention_retriggers_ideal_voice() {
    let mut engine = make_engine();
    let mut banks = make_banks(3, 8, 8);
    for i in 0..8 {
        *banks.bank_mut(Instrument::Positive).get_mut(i).unwrap() = true;
    }
    let ev = Event::new("Busy", Some(12), Category::Bot);
    let sound = engine
        .handle(&ev, Canvas::new(10, 10), 0.0, &banks)
        .unwrap()
        .sound
        .unwrap();
    assert!(sound.retrigger);
    assert_eq!(sound.voice_index, pitch_index(12, 8).unwrap());
}

#[test]
fn special_events_play_ambient_and_draw_nothing() {
    let mut engine = make_engine();
    let banks = make_banks(3, 8, 8);
    for _ in 0..50 {
        let ev = Event::new(NEW_USER_KEY, None, Category::Special);
        let response = engine
            .handle(&ev, Canvas::new(10, 10), 0.0, &banks)
            .unwrap();
        assert!(response.element.is_none());
        let sound = response.sound.unwrap();
        assert_eq!(sound.instrument, Instrument::Ambient);
        assert!(sound.voice_index <= AMBIENT_TARGET_MAX);
        assert!(!sound.retrigger);
        assert_eq!(sound.volume, Instrument::Ambient.volume());
    }
    assert!(engine.registry().is_empty());
}

#[test]
fn busy_low_swells_push_ambient_choice_upward() {
    let mut engine = make_engine();
    let mut banks = make_banks(6, 8, 8);
    for i in 0..=AMBIENT_TARGET_MAX {
        *banks.bank_mut(Instrument::Ambient).get_mut(i).unwrap() = true;
    }
    for _ in 0..50 {
        let ev = Event::new(NEW_USER_KEY, None, Category::Special);
        let sound = engine
            .handle(&ev, Canvas::new(10, 10), 0.0, &banks)
            .unwrap()
            .sound
            .unwrap();
        assert_eq!(sound.instrument, Instrument::Ambient);
        assert!(
            sound.voice_index > AMBIENT_TARGET_MAX,
            "picked busy swell {}",
            sound.voice_index
        );
        assert!(!sound.retrigger, "an idle swell was available");
    }
}

#[test]
fn ambient_choice_is_reproducible_for_a_seed() {
    let banks = make_banks(6, 4, 4);
    let run = |seed| {
        let mut engine = Engine::new(EngineParams::default(), seed);
        (0..20)
            .map(|_| {
                let ev = Event::new(NEW_USER_KEY, None, Category::Special);
                engine
                    .handle(&ev, Canvas::new(1, 1), 0.0, &banks)
                    .unwrap()
                    .sound
                    .unwrap()
                    .voice_index
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn single_voice_ambient_bank_always_uses_it() {
    let mut engine = make_engine();
    let banks = make_banks(1, 4, 4);
    let ev = Event::new(NEW_USER_KEY, None, Category::Special);
    let sound = engine
        .handle(&ev, Canvas::new(1, 1), 0.0, &banks)
        .unwrap()
        .sound
        .unwrap();
    assert_eq!(sound.voice_index, 0);
}

#[test]
fn missing_magnitude_is_drawn_small_and_silent() {
    let mut engine = make_engine();
    let banks = make_banks(3, 8, 8);
    let ev = Event::new("Quiet", None, Category::Normal);
    let response = engine
        .handle(&ev, Canvas::new(50, 50), 0.0, &banks)
        .unwrap();
    assert_eq!(response.element.unwrap().radius(), MIN_RADIUS);
    assert!(response.sound.is_none());
}

#[test]
fn errors_leave_engine_untouched() {
    let mut engine = make_engine();
    let banks = make_banks(3, 0, 8);

    let ev = Event::new("Gone", Some(-5), Category::Normal);
    assert_eq!(
        engine.handle(&ev, Canvas::new(10, 10), 0.0, &banks),
        Err(EngineError::EmptyVoiceBank)
    );
    let ev = Event::new("Flat", Some(5), Category::Normal);
    assert_eq!(
        engine.handle(&ev, Canvas::new(0, 10), 0.0, &banks),
        Err(EngineError::InvalidBounds {
            width: 0,
            height: 10
        })
    );
    let empty_ambient = make_banks(0, 8, 8);
    let ev = Event::new(NEW_USER_KEY, None, Category::Special);
    assert_eq!(
        engine.handle(&ev, Canvas::new(10, 10), 0.0, &empty_ambient),
        Err(EngineError::EmptyVoiceBank)
    );

    assert!(engine.registry().is_empty());
    assert_eq!(engine.recent_keys().count(), 0);
}

#[test]
fn bounds_may_change_between_events() {
    let mut engine = make_engine();
    let banks = make_banks(3, 8, 8);
    let ev = Event::new("Resize", Some(3), Category::Normal);
    let small = engine
        .handle(&ev, Canvas::new(3, 3), 0.0, &banks)
        .unwrap()
        .element
        .unwrap();
    let large = engine
        .handle(&ev, Canvas::new(4000, 3000), 0.0, &banks)
        .unwrap()
        .element
        .unwrap();
    assert_eq!(small.position(), place("Resize", 3, 3).unwrap());
    assert_eq!(large.position(), place("Resize", 4000, 3000).unwrap());
    assert_eq!(engine.registry().len(), 2);
}

#[test]
fn frames_fade_out_every_event() {
    let mut engine = make_engine();
    let banks = make_banks(3, 8, 8);
    let mut clock = ManualClock::starting_at(0.0);
    let frame = Duration::from_secs_f64(1.0 / TICK_HZ);
    let mut sprites = Vec::new();

    for (i, size) in [10, -20, 30].into_iter().enumerate() {
        let ev = Event::new(format!("Page {i}"), Some(size), Category::Normal);
        engine
            .handle(&ev, Canvas::new(200, 100), clock.now_sec(), &banks)
            .unwrap();
        clock.advance(Duration::from_secs(1));
    }

    let mut prev_len = usize::MAX;
    while clock.now_sec() < 20.0 {
        sprites.clear();
        engine.tick(clock.now_sec(), &mut sprites);
        assert!(sprites.len() <= prev_len, "registry grew without inserts");
        assert!(sprites.iter().all(|s| s.opacity() > 0.0 && s.opacity() <= 1.0));
        prev_len = sprites.len();
        clock.advance(frame);
    }
    assert!(sprites.is_empty());
    assert!(engine.registry().is_empty());
}

#[test]
fn ticker_keeps_most_recent_keys() {
    let params = EngineParams {
        ticker_capacity: 3,
        ..EngineParams::default()
    };
    let mut engine = Engine::new(params, 1);
    let banks = make_banks(3, 8, 8);
    for i in 0..5 {
        let ev = Event::new(format!("k{i}"), Some(1), Category::Normal);
        engine.handle(&ev, Canvas::new(5, 5), 0.0, &banks).unwrap();
    }
    assert_eq!(engine.recent_keys().collect::<Vec<_>>(), vec!["k2", "k3", "k4"]);

    engine.clear();
    assert_eq!(engine.recent_keys().count(), 0);
    assert!(engine.registry().is_empty());
}

#[test]
fn category_palette_is_exhaustive() {
    assert_eq!(Category::Normal.color(), Some(NORMAL_COLOR));
    assert_eq!(Category::Anonymous.color(), Some(ANONYMOUS_COLOR));
    assert_eq!(Category::Bot.color(), Some(BOT_COLOR));
    assert_eq!(Category::Special.color(), None);
    assert!(!Category::Special.is_visual());
}
