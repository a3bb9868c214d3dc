use hecs::{Entity, World};

use crate::components::*;

/// How a drop left play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retirement {
    /// Clicked by the player
    Caught(WaterDrop),
    /// Finished its fall untouched
    Missed(WaterDrop),
    /// Already gone: caught, missed, or cleared at round end
    AlreadyRetired,
}

impl Retirement {
    pub fn water_drop(&self) -> Option<&WaterDrop> {
        match self {
            Retirement::Caught(drop) | Retirement::Missed(drop) => Some(drop),
            Retirement::AlreadyRetired => None,
        }
    }
}

/// Remove a drop from play, exactly once.
///
/// Returns the drop the first time and None for any later attempt, so the
/// click and fall-completion paths can race without double counting.
pub fn retire(world: &mut World, entity: Entity) -> Option<WaterDrop> {
    let drop = *world.get::<&WaterDrop>(entity).ok()?;
    world.despawn(entity).ok()?;
    Some(drop)
}

pub fn is_live(world: &World, entity: Entity) -> bool {
    world.contains(entity)
}

/// Despawn every live drop, returning the removed entities
pub fn clear_drops(world: &mut World) -> Vec<Entity> {
    let mut entities: Vec<Entity> = world
        .query::<&WaterDrop>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    entities.retain(|&entity| world.despawn(entity).is_ok());
    entities
}
