use glam::Vec2;
use hecs::{Entity, World};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::*;
use crate::resources::*;
use crate::scheduler::Scheduler;
use crate::surface::Surface;
use crate::Config;

pub const CONFETTI_COLORS: [&str; 6] = [
    "#FFC907", "#2E9DF7", "#4FCB53", "#FF902A", "#F16061", "#8BD1CB",
];

/// Deferred feedback work
#[derive(Debug, Clone)]
pub enum FeedbackTask {
    Launch(ConfettiParticle),
    Expire(Entity),
}

/// Transient popups, banners and confetti.
///
/// Owns its own world and task queue: nothing here is cancelled by a round
/// ending or resetting, every popup runs out its lifetime.
pub struct FeedbackLayer {
    world: World,
    tasks: Scheduler<FeedbackTask>,
}

impl FeedbackLayer {
    pub fn new(now_ms: u64) -> Self {
        Self {
            world: World::new(),
            tasks: Scheduler::new(now_ms),
        }
    }

    /// Popups currently on screen
    pub fn live_popups(&self) -> usize {
        self.world.len() as usize
    }

    /// Tasks waiting to run (launches and expiries)
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }

    pub fn popups(&self) -> Vec<(Entity, Popup)> {
        self.world
            .query::<&Popup>()
            .iter()
            .map(|(entity, popup)| (entity, popup.clone()))
            .collect()
    }

    /// `+10` / `-15` at the caught drop's centre
    pub fn show_catch(
        &mut self,
        surface: &mut dyn Surface,
        config: &Config,
        value: i32,
        pos: Vec2,
    ) -> Entity {
        self.show(surface, Popup::catch(value, pos, config.catch_popup_ms))
    }

    pub fn show_milestone(
        &mut self,
        surface: &mut dyn Surface,
        config: &Config,
        text: &str,
    ) -> Entity {
        self.show(surface, Popup::milestone(text, config.milestone_banner_ms))
    }

    /// Queue a staggered confetti burst across the viewport
    pub fn burst_confetti(&mut self, rng: &mut GameRng, config: &Config, viewport_width: f32) {
        for index in 0..config.confetti_particles {
            let particle = roll_confetti(rng, config, index, viewport_width);
            self.tasks
                .schedule_once(particle.launch_delay_ms, FeedbackTask::Launch(particle));
        }
        debug!("queued {} confetti particles", config.confetti_particles);
    }

    /// Run launches and expiries due by `until_ms`
    pub fn advance(&mut self, surface: &mut dyn Surface, config: &Config, until_ms: u64) {
        while let Some((_, task)) = self.tasks.pop_due(until_ms) {
            match task {
                FeedbackTask::Launch(particle) => {
                    let popup = Popup::confetti(
                        &particle,
                        config.confetti_start_y,
                        config.confetti_lifetime_ms,
                    );
                    self.show(surface, popup);
                }
                FeedbackTask::Expire(entity) => {
                    if self.world.despawn(entity).is_ok() {
                        surface.remove_popup(entity);
                    }
                }
            }
        }
        self.tasks.settle(until_ms);
    }

    fn show(&mut self, surface: &mut dyn Surface, popup: Popup) -> Entity {
        let lifetime_ms = popup.lifetime_ms;
        let entity = self.world.spawn((popup,));
        if let Ok(popup) = self.world.get::<&Popup>(entity) {
            surface.add_popup(entity, &popup);
        }
        self.tasks.schedule_once(lifetime_ms, FeedbackTask::Expire(entity));
        entity
    }
}

/// Roll the look of confetti particle `index`
pub fn roll_confetti(
    rng: &mut GameRng,
    config: &Config,
    index: u32,
    viewport_width: f32,
) -> ConfettiParticle {
    let x = rng.0.gen::<f32>() * viewport_width.max(0.0);
    let size = config.confetti_size_min
        + rng.0.gen::<f32>() * (config.confetti_size_max - config.confetti_size_min);
    let color = CONFETTI_COLORS
        .choose(&mut rng.0)
        .copied()
        .unwrap_or(CONFETTI_COLORS[0]);
    let shape = if rng.0.gen_bool(0.5) {
        ConfettiShape::Circle
    } else {
        ConfettiShape::Square
    };

    ConfettiParticle {
        launch_delay_ms: index as u64 * config.confetti_stagger_ms,
        x,
        size,
        color,
        shape,
    }
}
