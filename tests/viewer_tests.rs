// Host-side tests for the viewer session, sound coordination and controls.

use book_core::constants::*;
use book_core::*;
use glam::Vec3;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct RecordingBank {
    played: Vec<SoundCue>,
    volumes: Vec<f32>,
    releases: Rc<Cell<usize>>,
    fail: bool,
}

impl SoundBank for RecordingBank {
    fn play(&mut self, cue: SoundCue) -> Result<(), SoundError> {
        if self.fail {
            return Err(SoundError::Rejected("autoplay blocked".into()));
        }
        self.played.push(cue);
        Ok(())
    }

    fn apply_volume(&mut self, volume: f32) {
        self.volumes.push(volume);
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

impl RecordingBank {
    fn flips(&self) -> usize {
        self.played
            .iter()
            .filter(|c| matches!(c, SoundCue::PageFlip(_)))
            .count()
    }
}

fn pages(n: u32) -> Vec<PageId> {
    (1..=n).map(PageId::page).collect()
}

fn ready_session(n: u32) -> ViewerSession<RecordingBank> {
    let mut s = ViewerSession::mount(ViewerConfig::default(), RecordingBank::default(), 1);
    assert!(s.finish_loading(pages(n)));
    s
}

// Drive the frame clock until the pending turn completes.
fn run_turn(s: &mut ViewerSession<RecordingBank>, clock: &mut f64) {
    while s.is_turning() {
        s.tick(*clock, 1280.0, 1.6).unwrap();
        *clock += 16.0;
        assert!(*clock < 100_000.0, "turn never finished");
    }
}

#[test]
fn mount_starts_loading_with_fresh_preferences() {
    let mut s = ViewerSession::mount(ViewerConfig::default(), RecordingBank::default(), 1);
    assert_eq!(s.phase(), SessionPhase::Loading);
    assert_eq!(s.position(), 0);
    assert_eq!(s.preferences(), AudioPreference::default());
    assert!(s.tick(0.0, 1280.0, 1.6).is_none());
    assert_eq!(s.next(), None);
    assert!(s.drain_events().is_empty());
}

#[test]
fn finish_loading_emits_ready_and_plays_book_open() {
    let mut s = ready_session(17);
    assert_eq!(s.phase(), SessionPhase::Ready);
    assert_eq!(s.spreads().len(), 10);
    assert_eq!(s.drain_events().to_vec(), vec![ViewerEvent::Ready { spread_count: 10 }]);
    assert_eq!(s.sound().bank().played, vec![SoundCue::BookOpen]);
    assert!(!s.finish_loading(pages(3)));
    assert_eq!(s.pages().len(), 17);
}

#[test]
fn next_three_times_then_back_to_cover() {
    let mut s = ready_session(17);
    let mut clock = 0.0;
    for expected in 1..=3 {
        assert!(s.next().is_some());
        run_turn(&mut s, &mut clock);
        assert_eq!(s.position(), expected);
    }
    let turn = s.on_navigate(0).unwrap();
    assert_eq!(turn.leaves(), 3);
    assert_eq!(turn.direction, TurnDirection::Backward);
    run_turn(&mut s, &mut clock);
    assert_eq!(s.position(), 0);
}

#[test]
fn position_changed_follows_turn_started() {
    let mut s = ready_session(5);
    s.drain_events();
    let mut clock = 0.0;
    s.next().unwrap();
    run_turn(&mut s, &mut clock);
    let events = s.drain_events().to_vec();
    assert_eq!(
        events,
        vec![
            ViewerEvent::TurnStarted(TurnStarted {
                from: 0,
                target: 1,
                direction: TurnDirection::Forward
            }),
            ViewerEvent::PositionChanged { position: 1 },
        ]
    );
}

#[test]
fn navigation_while_turning_is_ignored() {
    let mut s = ready_session(9);
    s.next().unwrap();
    assert_eq!(s.next(), None);
    assert_eq!(s.last(), None);
    assert_eq!(s.sound().bank().flips(), 1);
}

#[test]
fn first_frame_of_a_turn_is_the_resting_pose() {
    let mut s = ready_session(9);
    let before = s.tick(0.0, 1280.0, 1.6).unwrap().scene;
    s.next().unwrap();
    let first = s.tick(500.0, 1280.0, 1.6).unwrap();
    assert_eq!(first.scene, before);
    assert_eq!(first.animation.progress, 0.0);
}

#[test]
fn unmount_mid_turn_never_updates_position() {
    let mut s = ready_session(9);
    s.next().unwrap();
    s.tick(0.0, 1280.0, 1.6);
    s.unmount();
    assert_eq!(s.phase(), SessionPhase::Unmounted);
    assert!(s.tick(10_000.0, 1280.0, 1.6).is_none());
    assert_eq!(s.position(), 0);
    assert!(!s.is_turning());
    let events = s.drain_events().to_vec();
    assert!(!events
        .iter()
        .any(|e| matches!(e, ViewerEvent::PositionChanged { .. })));
    assert_eq!(events.last(), Some(&ViewerEvent::Unmounted));
    assert_eq!(s.sound().bank().releases.get(), 1);

    s.unmount();
    assert_eq!(s.sound().bank().releases.get(), 1);
    assert!(s.drain_events().is_empty());
    assert!(!s.finish_loading(pages(3)));
    assert_eq!(s.next(), None);
}

#[test]
fn one_flip_sound_per_started_turn() {
    let mut s = ready_session(17);
    let mut clock = 0.0;
    let mut started = 0;
    for action in [
        NavAction::Next,
        NavAction::Next,
        NavAction::Last,
        NavAction::Previous,
        NavAction::First,
        NavAction::First,
        NavAction::GoTo(4),
    ] {
        if s.apply(action).is_some() {
            started += 1;
        }
        run_turn(&mut s, &mut clock);
    }
    assert_eq!(started, 6);
    assert_eq!(s.sound().bank().flips(), started);
    for cue in &s.sound().bank().played {
        if let SoundCue::PageFlip(i) = cue {
            assert!(*i < PAGE_FLIP_SOUNDS.len());
        }
    }
}

#[test]
fn muted_session_plays_nothing() {
    let mut s = ViewerSession::mount(ViewerConfig::default(), RecordingBank::default(), 3);
    s.set_muted(true);
    s.finish_loading(pages(5));
    s.next().unwrap();
    assert!(s.sound().bank().played.is_empty());
    assert_eq!(s.sound().bank().volumes.last(), Some(&0.0));
    assert!(!s.toggle_mute());
    assert_eq!(s.sound().bank().volumes.last(), Some(&DEFAULT_VOLUME));
}

#[test]
fn playback_failures_do_not_surface() {
    let bank = RecordingBank {
        fail: true,
        ..Default::default()
    };
    let mut s = ViewerSession::mount(ViewerConfig::default(), bank, 5);
    assert!(s.finish_loading(pages(5)));
    assert!(s.next().is_some());
    assert!(s.is_turning());
}

#[test]
fn volume_is_clamped_and_applied() {
    let mut s = ready_session(3);
    s.set_volume(1.7);
    assert_eq!(s.preferences().volume, 1.0);
    s.set_volume(-0.2);
    assert_eq!(s.preferences().volume, 0.0);
    s.set_volume(f32::NAN);
    assert_eq!(s.preferences().volume, DEFAULT_VOLUME);
    assert_eq!(s.sound().bank().volumes.last(), Some(&DEFAULT_VOLUME));
}

#[test]
fn empty_catalog_shows_a_closed_cover() {
    let mut s = ViewerSession::mount(ViewerConfig::default(), RecordingBank::default(), 1);
    assert!(s.finish_loading(Vec::new()));
    assert!(s.spreads().is_empty());
    assert_eq!(s.render_spreads(), &[Spread::covers_only()]);
    assert_eq!(s.next(), None);
    assert_eq!(s.last(), None);
    let frame = s.tick(0.0, 500.0, 0.6).unwrap();
    assert_eq!(frame.scene.leaves.len(), 1);
    assert_eq!(frame.scene.leaves[0].rotation, 0.0);
    assert_eq!(frame.camera.eye, Vec3::new(-0.5, 1.0, 9.0));
    assert_eq!(s.strip().len(), 1);
}

#[test]
fn strip_labels_cover_every_position() {
    let labels: Vec<String> = strip_entries(3).into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Cover", "Page 1", "Page 2", "Back Cover"]);
    let targets: Vec<usize> = strip_entries(3).into_iter().map(|e| e.target).collect();
    assert_eq!(targets, vec![0, 1, 2, 3]);
    assert_eq!(strip_entries(0).len(), 1);
}

#[test]
fn keys_map_to_navigation() {
    let plain = KeyModifiers::default();
    assert_eq!(nav_action_for_key("ArrowRight", plain), Some(NavAction::Next));
    assert_eq!(nav_action_for_key("PageDown", plain), Some(NavAction::Next));
    assert_eq!(nav_action_for_key("ArrowLeft", plain), Some(NavAction::Previous));
    assert_eq!(nav_action_for_key("PageUp", plain), Some(NavAction::Previous));
    assert_eq!(nav_action_for_key("Home", plain), Some(NavAction::First));
    assert_eq!(nav_action_for_key("End", plain), Some(NavAction::Last));
    assert_eq!(nav_action_for_key("Escape", plain), Some(NavAction::Close));
    assert_eq!(nav_action_for_key("m", plain), Some(NavAction::ToggleMute));
    assert_eq!(nav_action_for_key("x", plain), None);
}

#[test]
fn browser_chords_are_left_alone() {
    let alt = KeyModifiers {
        alt: true,
        ..Default::default()
    };
    let ctrl = KeyModifiers {
        ctrl: true,
        ..Default::default()
    };
    let meta = KeyModifiers {
        meta: true,
        ..Default::default()
    };
    assert_eq!(nav_action_for_key("ArrowLeft", alt), None);
    assert_eq!(nav_action_for_key("Home", ctrl), None);
    assert_eq!(nav_action_for_key("End", meta), None);
    assert_eq!(nav_action_for_key("m", ctrl), None);
    assert!(!KeyModifiers::default().any());
}

#[test]
fn clicks_pick_the_side_of_the_spine() {
    let cam = Camera::framed(1280.0, 1.6);
    let aim = |p: Vec3| (cam.eye, (p - cam.eye).normalize());
    let (o, d) = aim(Vec3::new(0.6, 0.0, 0.0));
    assert_eq!(nav_action_for_ray(o, d), Some(NavAction::Next));
    let (o, d) = aim(Vec3::new(-0.6, 0.3, 0.0));
    assert_eq!(nav_action_for_ray(o, d), Some(NavAction::Previous));
    let (o, d) = aim(Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(nav_action_for_ray(o, d), None);
    assert_eq!(nav_action_for_ray(cam.eye, Vec3::Z), None);
}

#[test]
fn close_and_mute_do_not_turn() {
    let mut s = ready_session(5);
    assert_eq!(s.apply(NavAction::Close), None);
    assert_eq!(s.apply(NavAction::ToggleMute), None);
    assert!(s.preferences().muted);
    assert!(!s.is_turning());
}

#[test]
fn dropping_a_session_releases_audio_once() {
    let releases = Rc::new(Cell::new(0));
    let bank = RecordingBank {
        releases: releases.clone(),
        ..Default::default()
    };
    let mut s = ViewerSession::mount(ViewerConfig::default(), bank, 2);
    s.finish_loading(pages(5));
    s.next().unwrap();
    drop(s);
    assert_eq!(releases.get(), 1);

    let bank = RecordingBank {
        releases: releases.clone(),
        ..Default::default()
    };
    let mut s = ViewerSession::mount(ViewerConfig::default(), bank, 2);
    s.unmount();
    drop(s);
    assert_eq!(releases.get(), 2);
}
