//! Hatching: turning a failure note into a dog-bird.

use log::warn;
use serde::{Deserialize, Serialize};

use dogbird_core::components::DogBirdId;
use dogbird_core::constants::*;
use dogbird_core::enums::Mode;
use dogbird_core::record::DogBirdRecord;
use dogbird_core::types::{normalize_degrees, FieldBounds, Point};

use crate::random::RandomSource;
use crate::store::EntityStore;

/// Ranges the per-bird traits are drawn from at hatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HatchTuning {
    /// Inset from each edge for the hatch point.
    pub spawn_margin: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub size_min: f64,
    pub size_max: f64,
}

impl Default for HatchTuning {
    fn default() -> Self {
        Self {
            spawn_margin: SPAWN_MARGIN,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            size_min: SIZE_MIN,
            size_max: SIZE_MAX,
        }
    }
}

/// Hatch a dog-bird from `note` at a random point inside the spawn margin.
/// Returns `None` for a blank note or when no id is left.
pub fn hatch<S: EntityStore, R: RandomSource>(
    store: &mut S,
    rng: &mut R,
    next_id: &mut u64,
    bounds: FieldBounds,
    tuning: &HatchTuning,
    note: &str,
) -> Option<DogBirdId> {
    if note.trim().is_empty() {
        return None;
    }
    let Some(id) = allocate_id(store, next_id) else {
        warn!("id space exhausted, note not hatched");
        return None;
    };

    let (x_lo, x_hi) = bounds.x_span(tuning.spawn_margin);
    let (y_lo, y_hi) = bounds.y_span(tuning.spawn_margin);
    let position = Point::new(rng.range(x_lo, x_hi), rng.range(y_lo, y_hi));

    let record = DogBirdRecord {
        id,
        name: DEFAULT_NAME.to_string(),
        position,
        heading: normalize_degrees(rng.range(0.0, 360.0)),
        speed: rng.range(tuning.speed_min, tuning.speed_max),
        size: rng.range(tuning.size_min, tuning.size_max),
        mode: Mode::Wandering,
        note: note.to_string(),
    };
    store.insert(record).then_some(id)
}

/// Put previously saved dog-birds back and move the id counter past them.
/// Records whose id is already live, or is the last id in the space, are
/// skipped. Returns how many were restored.
pub fn restore<S: EntityStore>(
    store: &mut S,
    next_id: &mut u64,
    records: impl IntoIterator<Item = DogBirdRecord>,
) -> usize {
    let mut restored = 0;
    for mut record in records {
        let id = record.id;
        let Some(after) = id.0.checked_add(1) else {
            warn!("{id} is outside the id space, skipping");
            continue;
        };
        record.heading = normalize_degrees(record.heading);
        if store.insert(record) {
            restored += 1;
            *next_id = (*next_id).max(after);
        }
    }
    restored
}

/// Next unused id, or `None` once the counter reaches `u64::MAX`.
/// Skips ids that are somehow already live.
fn allocate_id<S: EntityStore>(store: &S, next_id: &mut u64) -> Option<DogBirdId> {
    loop {
        let id = DogBirdId(*next_id);
        *next_id = next_id.checked_add(1)?;
        if !store.contains(id) {
            return Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::store::WorldStore;

    #[test]
    fn blank_notes_do_not_hatch() {
        let mut store = WorldStore::new();
        let mut rng = ScriptedRandom::constant(0.5);
        let mut next_id = 0;
        let bounds = FieldBounds::default();
        let tuning = HatchTuning::default();

        assert!(hatch(&mut store, &mut rng, &mut next_id, bounds, &tuning, "").is_none());
        assert!(hatch(&mut store, &mut rng, &mut next_id, bounds, &tuning, "  \n").is_none());
        assert!(store.is_empty());
        assert_eq!(next_id, 0);
    }

    #[test]
    fn hatch_draws_traits_from_ranges() {
        let mut store = WorldStore::new();
        let mut rng = SeededRandom::new(3);
        let mut next_id = 0;
        let bounds = FieldBounds::new(400.0, 800.0);
        let tuning = HatchTuning::default();

        for i in 0..50 {
            let id = hatch(&mut store, &mut rng, &mut next_id, bounds, &tuning, "late again")
                .unwrap();
            assert_eq!(id, DogBirdId(i));
            let r = store.get(id).unwrap();
            assert!((50.0..=350.0).contains(&r.position.x));
            assert!((50.0..=750.0).contains(&r.position.y));
            assert!((0.0..360.0).contains(&r.heading));
            assert!((SPEED_MIN..=SPEED_MAX).contains(&r.speed));
            assert!((SIZE_MIN..=SIZE_MAX).contains(&r.size));
            assert_eq!(r.mode, Mode::Wandering);
            assert_eq!(r.name, DEFAULT_NAME);
            assert_eq!(r.note, "late again");
        }
    }

    #[test]
    fn hatch_on_tiny_field_uses_centre() {
        let mut store = WorldStore::new();
        let mut rng = SeededRandom::new(3);
        let mut next_id = 0;
        let bounds = FieldBounds::new(60.0, 60.0);

        let id = hatch(&mut store, &mut rng, &mut next_id, bounds, &HatchTuning::default(), "x")
            .unwrap();
        assert_eq!(store.get(id).unwrap().position, Point::new(30.0, 30.0));
    }

    #[test]
    fn restore_advances_id_counter() {
        let mut store = WorldStore::new();
        let mut next_id = 0;
        let record = DogBirdRecord {
            id: DogBirdId(41),
            name: "old".into(),
            position: Point::new(100.0, 100.0),
            heading: 400.0,
            speed: 2.0,
            size: 120.0,
            mode: Mode::Wandering,
            note: "n".into(),
        };

        assert_eq!(restore(&mut store, &mut next_id, vec![record.clone(), record]), 1);
        assert_eq!(next_id, 42);
        assert_eq!(store.get(DogBirdId(41)).unwrap().heading, 40.0);
    }

    #[test]
    fn ids_at_the_end_of_the_space_do_not_panic() {
        let mut store = WorldStore::new();
        let mut rng = ScriptedRandom::constant(0.5);
        let mut next_id = 0;
        let record = |id| DogBirdRecord {
            id: DogBirdId(id),
            name: "edited by hand".into(),
            position: Point::new(100.0, 100.0),
            heading: 0.0,
            speed: 2.0,
            size: 120.0,
            mode: Mode::Wandering,
            note: "n".into(),
        };

        let restored = restore(
            &mut store,
            &mut next_id,
            vec![record(u64::MAX), record(u64::MAX - 1)],
        );
        assert_eq!(restored, 1);
        assert!(!store.contains(DogBirdId(u64::MAX)));
        assert_eq!(next_id, u64::MAX);

        let bounds = FieldBounds::default();
        let tuning = HatchTuning::default();
        assert!(hatch(&mut store, &mut rng, &mut next_id, bounds, &tuning, "one more").is_none());
        assert_eq!(store.len(), 1);
    }
}
