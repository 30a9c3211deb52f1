//! Tests for the simulation engine, motion, and interaction pipeline.

use dogbird_core::commands::{FieldCommand, Gesture};
use dogbird_core::components::DogBirdId;
use dogbird_core::constants::*;
use dogbird_core::enums::*;
use dogbird_core::events::FieldEvent;
use dogbird_core::record::DogBirdRecord;
use dogbird_core::types::{FieldBounds, Point};

use crate::engine::{SimConfig, SimulationEngine};
use crate::random::{RandomSource, ScriptedRandom, SeededRandom};
use crate::store::{EntityStore, WorldStore};

fn scripted_engine() -> SimulationEngine<WorldStore, ScriptedRandom> {
    SimulationEngine::with_parts(
        SimConfig::default(),
        WorldStore::new(),
        ScriptedRandom::constant(0.5),
    )
}

fn bird(id: u64, x: f64, y: f64, heading: f64, speed: f64) -> DogBirdRecord {
    DogBirdRecord {
        id: DogBirdId(id),
        name: DEFAULT_NAME.into(),
        position: Point::new(x, y),
        heading,
        speed,
        size: 120.0,
        mode: Mode::Wandering,
        note: "spilled coffee on the keyboard".into(),
    }
}

fn gesture(g: Gesture) -> FieldCommand {
    FieldCommand::Gesture { gesture: g }
}

fn position_of<R: RandomSource>(engine: &SimulationEngine<WorldStore, R>, id: u64) -> Point {
    engine.store().get(DogBirdId(id)).unwrap().position
}

// ---- Determinism ----

fn scripted_session(seed: u64) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    for i in 0..8 {
        engine.queue_command(FieldCommand::SubmitNote {
            text: format!("failure #{i}"),
        });
    }

    let mut out = Vec::new();
    for tick in 0..400 {
        let level = if (200..230).contains(&tick) { 0.2 } else { 0.0 };
        engine.queue_command(FieldCommand::SetLoudness { level });
        let snap = engine.tick();
        out.push(serde_json::to_string(&snap).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_session(12345), scripted_session(12345));
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(scripted_session(111), scripted_session(222));
}

// ---- Wandering ----

#[test]
fn test_wander_open_field_exact_step() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 200.0, 400.0, 63.0, 2.7)]);

    engine.tick();

    let radians = 63.0_f64.to_radians();
    let pos = position_of(&engine, 1);
    assert_eq!(pos.x, 200.0 + radians.cos() * 2.7);
    assert_eq!(pos.y, 400.0 + radians.sin() * 2.7);
}

#[test]
fn test_wall_bounce_scenario() {
    let mut engine = scripted_engine();
    engine.queue_command(FieldCommand::SetBounds {
        bounds: FieldBounds::new(400.0, 800.0),
    });
    engine.restore(None, vec![bird(1, 390.0, 400.0, 10.0, 2.0)]);

    engine.tick();

    let record = engine.store().get(DogBirdId(1)).unwrap();
    assert_eq!(record.heading, 170.0);
    assert!(record.position.x <= 380.0);
    assert_eq!(record.position.x, 380.0);
}

#[test]
fn test_wanderers_stay_inside_walls() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });
    for i in 0..20 {
        engine.queue_command(FieldCommand::SubmitNote {
            text: format!("note {i}"),
        });
    }

    for _ in 0..2_000 {
        let snap = engine.tick();
        for bird in &snap.dog_birds {
            assert!(snap.bounds.contains_inset(bird.position, WALL_MARGIN));
            assert!((0.0..360.0).contains(&bird.heading));
        }
    }
    assert_eq!(engine.records().len(), 20);
}

#[test]
fn test_resize_reclamps_next_tick() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 350.0, 700.0, 0.0, 1.0)]);
    engine.tick();

    engine.queue_command(FieldCommand::SetBounds {
        bounds: FieldBounds::new(200.0, 300.0),
    });
    let snap = engine.tick();

    let pos = snap.dog_birds[0].position;
    assert!(pos.x <= 180.0);
    assert!(pos.y <= 280.0);
}

#[test]
fn test_zero_size_field_is_harmless() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 10.0, 10.0, 45.0, 3.0)]);
    engine.queue_command(FieldCommand::SetBounds {
        bounds: FieldBounds::new(0.0, 0.0),
    });

    for _ in 0..5 {
        engine.tick();
    }
    assert_eq!(position_of(&engine, 1), Point::ZERO);

    // Hatching into an empty field also lands on the collapsed point.
    engine.queue_command(FieldCommand::SubmitNote { text: "x".into() });
    let snap = engine.tick();
    assert_eq!(snap.dog_birds.len(), 2);
    assert!(snap.dog_birds.iter().all(|b| b.position == Point::ZERO));
}

// ---- Fleeing ----

#[test]
fn test_loudness_jump_starts_fleeing() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 200.0, 400.0, 0.0, 2.0)]);
    let snap = engine.tick();
    assert_eq!(snap.mode, Mode::Wandering);
    let before = position_of(&engine, 1);

    engine.queue_command(FieldCommand::SetLoudness { level: 0.5 });
    let snap = engine.tick();

    assert_eq!(snap.mode, Mode::Fleeing);
    assert_eq!(snap.dog_birds[0].mode, Mode::Fleeing);
    assert!(snap
        .events
        .contains(&FieldEvent::ModeChanged { mode: Mode::Fleeing }));
    let after = position_of(&engine, 1);
    assert!(before.y - after.y >= FLEE_BASE_SPEED + 0.5 * FLEE_LOUDNESS_GAIN - 1e-9);
}

#[test]
fn test_fleeing_always_climbs() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        ..Default::default()
    });
    for i in 0..10 {
        engine.queue_command(FieldCommand::SubmitNote {
            text: format!("note {i}"),
        });
    }
    engine.tick();
    engine.queue_command(FieldCommand::SetLoudness { level: 0.05 });

    for _ in 0..30 {
        let before = engine.records();
        engine.tick();
        for prev in before {
            if let Some(now) = engine.store().get(prev.id) {
                assert!(now.position.y < prev.position.y);
            }
        }
    }
}

#[test]
fn test_mode_is_not_sticky() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 200.0, 400.0, 0.0, 2.0)]);

    engine.queue_command(FieldCommand::SetLoudness { level: 0.3 });
    assert_eq!(engine.tick().mode, Mode::Fleeing);

    engine.queue_command(FieldCommand::SetLoudness { level: 0.0 });
    let snap = engine.tick();
    assert_eq!(snap.mode, Mode::Wandering);
    assert_eq!(snap.dog_birds[0].mode, Mode::Wandering);
}

#[test]
fn test_flown_away_bird_is_removed_once() {
    let mut engine = scripted_engine();
    engine.restore(
        None,
        vec![bird(1, 200.0, -95.0, 0.0, 2.0), bird(2, 200.0, 400.0, 0.0, 2.0)],
    );
    engine.queue_command(FieldCommand::SetLoudness { level: 0.5 });

    let snap = engine.tick();
    assert!(snap.events.contains(&FieldEvent::FlewAway { id: DogBirdId(1) }));
    assert!(!engine.store().contains(DogBirdId(1)));
    assert_eq!(snap.dog_birds.len(), 1);

    let snap = engine.tick();
    assert_eq!(snap.dog_birds.len(), 1);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, FieldEvent::FlewAway { .. })));
}

#[test]
fn test_loud_room_eventually_empties_the_field() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for i in 0..5 {
        engine.queue_command(FieldCommand::SubmitNote {
            text: format!("note {i}"),
        });
    }
    engine.tick();
    engine.queue_command(FieldCommand::SetLoudness { level: 0.5 });

    // At least 10 points per tick from at most 750: gone within 90 ticks.
    for _ in 0..90 {
        engine.tick();
    }
    assert!(engine.store().is_empty());
}

#[test]
fn test_shout_lasts_its_ticks() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 200.0, 700.0, 0.0, 2.0)]);
    engine.queue_command(FieldCommand::Shout { ticks: 3 });

    let modes: Vec<Mode> = (0..5).map(|_| engine.tick().mode).collect();
    assert_eq!(
        modes,
        vec![
            Mode::Fleeing,
            Mode::Fleeing,
            Mode::Fleeing,
            Mode::Wandering,
            Mode::Wandering,
        ]
    );
}

// ---- Interaction ----

#[test]
fn test_rapid_double_start_keeps_first_owner() {
    let mut engine = scripted_engine();
    engine.restore(
        None,
        vec![bird(1, 100.0, 100.0, 0.0, 2.0), bird(2, 300.0, 300.0, 0.0, 2.0)],
    );
    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::Start {
            id: DogBirdId(2),
            point: Point::new(300.0, 300.0),
        }),
    ]);

    let snap = engine.tick();
    assert_eq!(snap.dragging, Some(DogBirdId(1)));
    assert_eq!(snap.dog_birds.iter().filter(|b| b.dragged).count(), 1);
}

#[test]
fn test_drag_exclusivity_under_random_interleavings() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for i in 0..6 {
        engine.queue_command(FieldCommand::SubmitNote {
            text: format!("note {i}"),
        });
    }
    engine.tick();

    let mut picker = SeededRandom::new(2024);
    for _ in 0..500 {
        let roll = picker.unit();
        let id = DogBirdId((picker.unit() * 6.0) as u64);
        let point = Point::new(picker.range(0.0, 400.0), picker.range(0.0, 600.0));
        let g = if roll < 0.5 {
            Gesture::Start { id, point }
        } else if roll < 0.8 {
            Gesture::Move { point }
        } else {
            Gesture::End { point }
        };
        engine.queue_command(gesture(g));

        let snap = engine.tick();
        assert!(snap.dog_birds.iter().filter(|b| b.dragged).count() <= 1);
        if let Some(owner) = snap.dragging {
            assert!(snap.dog_birds.iter().any(|b| b.id == owner && b.dragged));
        }
    }
}

#[test]
fn test_dragged_bird_ignores_motion_and_noise() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    engine.queue_commands([
        FieldCommand::SetLoudness { level: 0.8 },
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::Move {
            point: Point::new(150.0, 250.0),
        }),
    ]);

    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.mode, Mode::Fleeing);
        assert_eq!(snap.dog_birds[0].mode, Mode::Wandering);
        assert_eq!(snap.dog_birds[0].position, Point::new(150.0, 250.0));
    }
}

#[test]
fn test_drop_on_target_deletes() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    let target = Point::new(DROP_TARGET_X, DROP_TARGET_Y);
    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::Move { point: target }),
    ]);
    let snap = engine.tick();
    assert!(snap.drop_target.highlighted);

    engine.queue_command(gesture(Gesture::End {
        point: target + Point::new(DROP_TARGET_RADIUS - 1.0, 0.0),
    }));
    let snap = engine.tick();

    assert!(snap.dog_birds.is_empty());
    assert_eq!(snap.dragging, None);
    assert!(!snap.drop_target.highlighted);
    assert!(snap.events.contains(&FieldEvent::Trashed { id: DogBirdId(1) }));
}

#[test]
fn test_release_off_target_resumes_from_release_point() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    let release = Point::new(DROP_TARGET_X + DROP_TARGET_RADIUS, DROP_TARGET_Y);
    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::End { point: release }),
    ]);

    // Release is processed before motion in the same tick.
    let snap = engine.tick();
    assert_eq!(snap.dragging, None);
    assert!(snap
        .events
        .contains(&FieldEvent::DragReleased { id: DogBirdId(1) }));
    assert_eq!(snap.dog_birds[0].position, release + Point::new(2.0, 0.0));
}

#[test]
fn test_moved_drop_target_is_used_for_drops() {
    let mut engine = scripted_engine();
    engine.restore(
        None,
        vec![
            bird(1, 100.0, 100.0, 0.0, 2.0),
            bird(2, 300.0, 100.0, 0.0, 2.0),
        ],
    );
    let moved = Point::new(100.0, 300.0);
    engine.queue_command(FieldCommand::SetDropTarget {
        center: moved,
        radius: 30.0,
    });
    let snap = engine.tick();
    assert_eq!(snap.drop_target.center, moved);
    assert_eq!(snap.drop_target.radius, 30.0);

    // The old default spot no longer trashes
    let old = Point::new(DROP_TARGET_X, DROP_TARGET_Y);
    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(102.0, 100.0),
        }),
        gesture(Gesture::End { point: old }),
        gesture(Gesture::Start {
            id: DogBirdId(2),
            point: Point::new(302.0, 100.0),
        }),
        gesture(Gesture::End {
            point: moved + Point::new(0.0, 29.0),
        }),
    ]);
    let snap = engine.tick();

    let ids: Vec<_> = snap.dog_birds.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![DogBirdId(1)]);
    assert!(snap.events.contains(&FieldEvent::Trashed { id: DogBirdId(2) }));
}

#[test]
fn test_tap_selects_without_moving() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    engine.queue_command(FieldCommand::Pause);
    engine.tick();

    engine.queue_command(gesture(Gesture::Tap { id: DogBirdId(1) }));
    let snap = engine.tick();

    assert_eq!(snap.events, vec![FieldEvent::Selected { id: DogBirdId(1) }]);
    assert_eq!(snap.dog_birds[0].position, Point::new(100.0, 100.0));
    assert_eq!(snap.dragging, None);
}

#[test]
fn test_second_drop_is_noop() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    let target = Point::new(DROP_TARGET_X, DROP_TARGET_Y);
    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::End { point: target }),
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: target,
        }),
        gesture(Gesture::End { point: target }),
    ]);

    let snap = engine.tick();
    let trashed = snap
        .events
        .iter()
        .filter(|e| matches!(e, FieldEvent::Trashed { .. }))
        .count();
    assert_eq!(trashed, 1);
    assert_eq!(snap.dragging, None);
}

// ---- Journal commands ----

#[test]
fn test_submit_edit_rename() {
    let mut engine = scripted_engine();
    engine.queue_commands([
        FieldCommand::SubmitNote {
            text: "   ".into(),
        },
        FieldCommand::SubmitNote {
            text: "fell asleep in class".into(),
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.events, vec![FieldEvent::Hatched { id: DogBirdId(0) }]);
    assert_eq!(snap.dog_birds.len(), 1);

    engine.queue_commands([
        FieldCommand::EditNote {
            id: DogBirdId(0),
            text: "fell asleep in the exam".into(),
        },
        FieldCommand::Rename {
            id: DogBirdId(0),
            name: "Snoozy".into(),
        },
        FieldCommand::EditNote {
            id: DogBirdId(9),
            text: "ghost".into(),
        },
    ]);
    let snap = engine.tick();
    assert_eq!(
        snap.events,
        vec![
            FieldEvent::NoteEdited { id: DogBirdId(0) },
            FieldEvent::Renamed { id: DogBirdId(0) },
        ]
    );
    assert_eq!(snap.dog_birds[0].note, "fell asleep in the exam");
    assert_eq!(snap.dog_birds[0].name, "Snoozy");
}

#[test]
fn test_goal_ignores_blank_text() {
    let mut engine = scripted_engine();
    engine.queue_command(FieldCommand::SetGoal {
        text: "Ship the app".into(),
    });
    engine.tick();
    engine.queue_command(FieldCommand::SetGoal { text: "".into() });
    let snap = engine.tick();
    assert_eq!(snap.goal.as_deref(), Some("Ship the app"));
}

#[test]
fn test_ids_are_unique_after_restore() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(7, 100.0, 100.0, 0.0, 2.0)]);
    engine.queue_command(FieldCommand::SubmitNote { text: "new".into() });
    let snap = engine.tick();
    assert_eq!(snap.events, vec![FieldEvent::Hatched { id: DogBirdId(8) }]);
}

// ---- Pause ----

#[test]
fn test_pause_freezes_motion_but_not_gestures() {
    let mut engine = scripted_engine();
    engine.restore(None, vec![bird(1, 100.0, 100.0, 0.0, 2.0)]);
    engine.queue_command(FieldCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, SimPhase::Paused);
    let paused_tick = snap.time.tick;

    engine.queue_command(FieldCommand::SetLoudness { level: 1.0 });
    let snap = engine.tick();
    assert_eq!(snap.time.tick, paused_tick);
    assert_eq!(snap.dog_birds[0].position, Point::new(100.0, 100.0));

    engine.queue_commands([
        gesture(Gesture::Start {
            id: DogBirdId(1),
            point: Point::new(100.0, 100.0),
        }),
        gesture(Gesture::Move {
            point: Point::new(120.0, 140.0),
        }),
    ]);
    let snap = engine.tick();
    assert_eq!(snap.dog_birds[0].position, Point::new(120.0, 140.0));

    engine.queue_command(FieldCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, SimPhase::Active);
    assert!(snap.time.tick > paused_tick);
}

#[test]
fn test_elapsed_time_follows_tick_rate() {
    let mut engine = SimulationEngine::new(SimConfig {
        tick_rate: 60,
        ..Default::default()
    });
    let mut snap = engine.tick();
    for _ in 1..60 {
        snap = engine.tick();
    }
    assert_eq!(snap.time.tick, 60);
    assert!((snap.time.elapsed_secs - 1.0).abs() < 1e-9);
}
