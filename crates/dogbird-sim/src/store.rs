//! Entity store: the single owner of every live dog-bird.
//!
//! Systems talk to the store through [`EntityStore`] so the engine can run
//! against any backing collection. Operations on an id that is no longer
//! present report `false`/`None` and change nothing.

use std::collections::HashMap;

use hecs::{Entity, World};
use log::debug;

use dogbird_core::components::{DogBirdId, FailureNote, Heading, Name, Size, Speed};
use dogbird_core::enums::Mode;
use dogbird_core::record::DogBirdRecord;
use dogbird_core::types::Point;

pub trait EntityStore {
    /// Insert a new record. Returns `false` (and stores nothing) if the id is
    /// already live.
    fn insert(&mut self, record: DogBirdRecord) -> bool;

    /// Remove a record, returning it if it was present.
    fn remove(&mut self, id: DogBirdId) -> Option<DogBirdRecord>;

    /// Every live record, ordered by id.
    fn all(&self) -> Vec<DogBirdRecord>;

    fn get(&self, id: DogBirdId) -> Option<DogBirdRecord>;

    fn contains(&self, id: DogBirdId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write back the motion state of one dog-bird.
    fn update(&mut self, id: DogBirdId, position: Point, heading: f64, mode: Mode) -> bool;

    fn set_position(&mut self, id: DogBirdId, position: Point) -> bool;

    fn set_mode(&mut self, id: DogBirdId, mode: Mode) -> bool;

    fn set_note(&mut self, id: DogBirdId, text: String) -> bool;

    fn set_name(&mut self, id: DogBirdId, name: String) -> bool;
}

/// hecs-backed store. Each dog-bird is one entity carrying its id, name,
/// position, heading, speed, size, mode, and note as components.
#[derive(Default)]
pub struct WorldStore {
    world: World,
    index: HashMap<DogBirdId, Entity>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the underlying ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn entity(&self, id: DogBirdId) -> Option<Entity> {
        self.index.get(&id).copied()
    }

    fn read(&self, entity: Entity) -> Option<DogBirdRecord> {
        let mut query = self
            .world
            .query_one::<(
                &DogBirdId,
                &Name,
                &Point,
                &Heading,
                &Speed,
                &Size,
                &Mode,
                &FailureNote,
            )>(entity)
            .ok()?;
        let (id, name, position, heading, speed, size, mode, note) = query.get()?;
        Some(DogBirdRecord {
            id: *id,
            name: name.0.clone(),
            position: *position,
            heading: heading.0,
            speed: speed.0,
            size: size.0,
            mode: *mode,
            note: note.text.clone(),
        })
    }
}

impl EntityStore for WorldStore {
    fn insert(&mut self, record: DogBirdRecord) -> bool {
        if self.index.contains_key(&record.id) {
            return false;
        }
        let entity = self.world.spawn((
            record.id,
            Name(record.name),
            record.position,
            Heading(record.heading),
            Speed(record.speed),
            Size(record.size),
            record.mode,
            FailureNote { text: record.note },
        ));
        self.index.insert(record.id, entity);
        true
    }

    fn remove(&mut self, id: DogBirdId) -> Option<DogBirdRecord> {
        let entity = self.index.remove(&id)?;
        let record = self.read(entity);
        if let Err(e) = self.world.despawn(entity) {
            debug!("{id} indexed but not in the world: {e}");
        }
        record
    }

    fn all(&self) -> Vec<DogBirdRecord> {
        let mut records: Vec<DogBirdRecord> = self
            .index
            .values()
            .filter_map(|&entity| self.read(entity))
            .collect();
        records.sort_by_key(|record| record.id);
        records
    }

    fn get(&self, id: DogBirdId) -> Option<DogBirdRecord> {
        self.entity(id).and_then(|entity| self.read(entity))
    }

    fn contains(&self, id: DogBirdId) -> bool {
        self.index.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn update(&mut self, id: DogBirdId, position: Point, heading: f64, mode: Mode) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match self
            .world
            .query_one_mut::<(&mut Point, &mut Heading, &mut Mode)>(entity)
        {
            Ok((pos, head, current_mode)) => {
                *pos = position;
                head.0 = heading;
                *current_mode = mode;
                true
            }
            Err(_) => false,
        }
    }

    fn set_position(&mut self, id: DogBirdId, position: Point) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match self.world.query_one_mut::<&mut Point>(entity) {
            Ok(pos) => {
                *pos = position;
                true
            }
            Err(_) => false,
        }
    }

    fn set_mode(&mut self, id: DogBirdId, mode: Mode) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match self.world.query_one_mut::<&mut Mode>(entity) {
            Ok(current) => {
                *current = mode;
                true
            }
            Err(_) => false,
        }
    }

    fn set_note(&mut self, id: DogBirdId, text: String) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match self.world.query_one_mut::<&mut FailureNote>(entity) {
            Ok(note) => {
                note.text = text;
                true
            }
            Err(_) => false,
        }
    }

    fn set_name(&mut self, id: DogBirdId, name: String) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        match self.world.query_one_mut::<&mut Name>(entity) {
            Ok(current) => {
                current.0 = name;
                true
            }
            Err(_) => false,
        }
    }
}
