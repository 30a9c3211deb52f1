//! Snapshot system: reads the store and builds a complete FieldSnapshot.
//!
//! This system is read-only; it never modifies the store.

use dogbird_core::enums::SimPhase;
use dogbird_core::events::FieldEvent;
use dogbird_core::state::{DogBirdView, DropTargetView, FieldSnapshot};
use dogbird_core::types::SimTime;

use crate::context::TickContext;
use crate::store::EntityStore;
use crate::systems::interaction::InteractionController;

/// Build a complete FieldSnapshot from the current store state.
pub fn build_snapshot<S: EntityStore>(
    store: &S,
    time: &SimTime,
    phase: SimPhase,
    ctx: &TickContext,
    goal: Option<&str>,
    interaction: &InteractionController,
    events: Vec<FieldEvent>,
) -> FieldSnapshot {
    let dragging = interaction.owner();
    let drop_target = interaction.drop_target();

    FieldSnapshot {
        time: *time,
        phase,
        mode: ctx.mode,
        loudness: ctx.loudness,
        bounds: ctx.bounds,
        goal: goal.map(str::to_owned),
        dog_birds: store
            .all()
            .into_iter()
            .map(|record| DogBirdView {
                dragged: dragging == Some(record.id),
                id: record.id,
                name: record.name,
                position: record.position,
                heading: record.heading,
                speed: record.speed,
                size: record.size,
                mode: record.mode,
                note: record.note,
            })
            .collect(),
        drop_target: DropTargetView {
            center: drop_target.center,
            radius: drop_target.radius,
            highlighted: interaction.is_highlighted(),
        },
        dragging,
        events,
    }
}
