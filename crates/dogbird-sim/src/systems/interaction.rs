//! Interaction controller: pointer gestures against the dog-birds.
//!
//! Drag ownership is a single slot. A gesture start claims it only when it is
//! empty, and only the current owner can clear it, so at most one dog-bird
//! follows the pointer at any instant. While held, a dog-bird is skipped by
//! the motion engine entirely.

use log::debug;

use dogbird_core::commands::Gesture;
use dogbird_core::components::DogBirdId;
use dogbird_core::enums::{DragPhase, Mode};
use dogbird_core::events::FieldEvent;
use dogbird_core::types::{DropTarget, Point};

use crate::store::EntityStore;

/// Exclusive drag ownership token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSlot {
    owner: Option<DogBirdId>,
}

impl DragSlot {
    pub fn owner(&self) -> Option<DogBirdId> {
        self.owner
    }

    pub fn is_held(&self) -> bool {
        self.owner.is_some()
    }

    /// Claim the slot for `id`. Fails if anyone (including `id`) holds it.
    pub fn try_acquire(&mut self, id: DogBirdId) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(id);
        true
    }

    /// Clear the slot only if `id` is the current owner.
    pub fn release_if(&mut self, id: DogBirdId) -> bool {
        if self.owner == Some(id) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    pub fn phase_of(&self, id: DogBirdId) -> DragPhase {
        if self.owner == Some(id) {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }
}

/// Routes gestures into position overrides, deletes and selections.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    slot: DragSlot,
    drop_target: DropTarget,
    highlighted: bool,
}

impl InteractionController {
    pub fn new(drop_target: DropTarget) -> Self {
        Self {
            slot: DragSlot::default(),
            drop_target,
            highlighted: false,
        }
    }

    pub fn owner(&self) -> Option<DogBirdId> {
        self.slot.owner()
    }

    pub fn slot(&self) -> &DragSlot {
        &self.slot
    }

    pub fn drop_target(&self) -> DropTarget {
        self.drop_target
    }

    pub fn set_drop_target(&mut self, drop_target: DropTarget) {
        self.drop_target = drop_target;
    }

    /// The dragged dog-bird is currently over the drop target.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Apply one gesture event.
    pub fn handle<S: EntityStore>(
        &mut self,
        gesture: Gesture,
        store: &mut S,
        events: &mut Vec<FieldEvent>,
    ) {
        match gesture {
            Gesture::Start { id, point } => self.start(id, point, store, events),
            Gesture::Move { point } => self.drag_to(point, store),
            Gesture::End { point } => self.end(point, store, events),
            Gesture::Tap { id } => self.tap(id, store, events),
        }
    }

    /// Drop ownership if `id` held it (the dog-bird was removed elsewhere).
    pub fn forget(&mut self, id: DogBirdId) {
        if self.slot.release_if(id) {
            self.highlighted = false;
        }
    }

    fn start<S: EntityStore>(
        &mut self,
        id: DogBirdId,
        point: Point,
        store: &mut S,
        events: &mut Vec<FieldEvent>,
    ) {
        if !store.contains(id) {
            debug!("drag start on missing {id}, ignoring");
            return;
        }
        if !self.slot.try_acquire(id) {
            debug!("drag start on {id} ignored, {:?} already held", self.slot.owner());
            return;
        }
        // A grabbed dog-bird stops fleeing.
        store.set_mode(id, Mode::Wandering);
        self.highlighted = self.drop_target.contains(point);
        debug!("drag started on {id}");
        events.push(FieldEvent::DragStarted { id });
    }

    fn drag_to<S: EntityStore>(&mut self, point: Point, store: &mut S) {
        let Some(id) = self.slot.owner() else {
            return;
        };
        if !store.set_position(id, point) {
            self.forget(id);
            return;
        }
        self.highlighted = self.drop_target.contains(point);
    }

    fn end<S: EntityStore>(&mut self, point: Point, store: &mut S, events: &mut Vec<FieldEvent>) {
        let Some(id) = self.slot.owner() else {
            return;
        };
        self.slot.release_if(id);
        self.highlighted = false;

        if self.drop_target.contains(point) {
            if store.remove(id).is_some() {
                debug!("{id} dropped on the drop target, trashed");
                events.push(FieldEvent::Trashed { id });
            }
        } else if store.set_position(id, point) {
            debug!("{id} released at ({:.1}, {:.1})", point.x, point.y);
            events.push(FieldEvent::DragReleased { id });
        }
    }

    fn tap<S: EntityStore>(&mut self, id: DogBirdId, store: &S, events: &mut Vec<FieldEvent>) {
        if self.slot.is_held() {
            debug!("tap on {id} ignored while dragging");
            return;
        }
        if store.contains(id) {
            events.push(FieldEvent::Selected { id });
        }
    }
}
