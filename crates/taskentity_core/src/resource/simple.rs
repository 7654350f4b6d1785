//! Entities whose operation set is exactly `update` + `delete`.

use crate::dispatch::{CommandDispatch, ResourceCommands};
use crate::model::entity::{Entity, EntityKind};
use crate::resource::router::{Editable, EntityHandle};

macro_rules! editable_resource {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $group:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            entity: Entity,
        }

        impl $name {
            pub fn new(entity: Entity) -> Self {
                Self { entity }
            }

            pub fn into_entity(self) -> Entity {
                self.entity
            }
        }

        impl EntityHandle for $name {
            fn kind(&self) -> EntityKind {
                $kind
            }

            fn entity(&self) -> &Entity {
                &self.entity
            }

            fn entity_mut(&mut self) -> &mut Entity {
                &mut self.entity
            }
        }

        impl Editable for $name {
            fn route<'a>(&self, dispatch: &'a dyn CommandDispatch) -> &'a dyn ResourceCommands {
                dispatch.$group()
            }
        }
    };
}

editable_resource!(
    /// Personal label attachable to items.
    Label,
    EntityKind::Label,
    labels
);
editable_resource!(
    /// Saved item query.
    Filter,
    EntityKind::Filter,
    filters
);
editable_resource!(
    /// Time- or location-based item reminder.
    Reminder,
    EntityKind::Reminder,
    reminders
);
