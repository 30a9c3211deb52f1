//! Cleanup system: removes dog-birds that flew off the field.

use log::debug;

use dogbird_core::components::DogBirdId;
use dogbird_core::events::FieldEvent;

use crate::store::EntityStore;

/// Remove every id in `expired` from the store, draining the buffer.
/// Ids already gone are skipped, so running twice is harmless.
pub fn run<S: EntityStore>(
    store: &mut S,
    expired: &mut Vec<DogBirdId>,
    events: &mut Vec<FieldEvent>,
) {
    for id in expired.drain(..) {
        if store.remove(id).is_some() {
            debug!("{id} flew away");
            events.push(FieldEvent::FlewAway { id });
        }
    }
}
