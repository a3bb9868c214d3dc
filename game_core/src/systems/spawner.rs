use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use crate::components::*;
use crate::resources::*;
use crate::Config;

/// Roll the attributes of a new drop for a container of the given width
pub fn roll_drop(rng: &mut GameRng, config: &Config, container_width: f32) -> WaterDrop {
    let kind = if rng.0.gen_bool(config.bad_drop_chance.clamp(0.0, 1.0)) {
        DropKind::Bad
    } else {
        DropKind::Good
    };

    let size_mult = lerp(
        config.drop_size_min_mult,
        config.drop_size_max_mult,
        rng.0.gen::<f32>(),
    );
    let size = config.drop_base_size * size_mult;

    let x = rng.0.gen::<f32>() * config.max_drop_x(container_width, size);
    let x = config.clamp_drop_x(x, container_width, size);

    let fall_seconds = lerp(
        config.fall_seconds_min,
        config.fall_seconds_max,
        rng.0.gen::<f32>(),
    );

    WaterDrop::new(kind, config.drop_value(kind), size, x, fall_seconds)
}

/// Spawn one drop if the round is running
pub fn spawn_drop(
    world: &mut World,
    state: &mut RoundState,
    rng: &mut GameRng,
    config: &Config,
    container_width: f32,
) -> Option<(Entity, WaterDrop)> {
    // A spawn tick can still be queued behind the one that ended the round
    if !state.running {
        debug!("spawn tick ignored: round not running");
        return None;
    }

    state.drops_created += 1;
    let drop = roll_drop(rng, config, container_width);
    let entity = world.spawn((drop,));
    debug!(
        "spawned {:?} drop {:?} (size {:.1}, x {:.1}, fall {:.2}s)",
        drop.kind, entity, drop.size, drop.x, drop.fall_seconds
    );
    Some((entity, drop))
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}
