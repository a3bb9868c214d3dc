//! Round controller
//!
//! Owns the round counters, the live drops and the two round tickers. All
//! game input funnels through here: button presses (`start` / `reset`), drop
//! clicks (`catch_drop`) and elapsed time (`advance`).

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info, warn};

use crate::components::*;
use crate::messages::{IDLE_MESSAGE, LOW_TIME_MESSAGE, START_MESSAGE};
use crate::resources::*;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::surface::Surface;
use crate::systems::*;
use crate::Config;

/// Work owned by a round; cancelled together when the round stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTask {
    Countdown,
    Spawn,
    FallComplete(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Tickers {
    countdown: TaskHandle,
    spawn: TaskHandle,
}

pub struct RoundController<S: Surface> {
    surface: S,
    config: Config,
    state: RoundState,
    drops: World,
    tasks: Scheduler<RoundTask>,
    tickers: Option<Tickers>,
    feedback: FeedbackLayer,
    rng: GameRng,
    time: Time,
    last_summary: Option<RoundSummary>,
    rounds_finished: u32,
}

impl<S: Surface> RoundController<S> {
    pub fn new(surface: S, config: Config, rng: GameRng) -> Self {
        let time = Time::new();
        let mut controller = Self {
            surface,
            state: RoundState::new(config.round_seconds),
            config,
            drops: World::new(),
            tasks: Scheduler::new(time.now_ms),
            tickers: None,
            feedback: FeedbackLayer::new(time.now_ms),
            rng,
            time,
            last_summary: None,
            rounds_finished: 0,
        };
        controller.show_idle();
        controller
    }

    /// Read-only copy of the round counters
    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn now_ms(&self) -> u64 {
        self.time.now_ms
    }

    pub fn is_ticking(&self) -> bool {
        self.tickers.is_some()
    }

    pub fn last_summary(&self) -> Option<RoundSummary> {
        self.last_summary
    }

    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    pub fn feedback(&self) -> &FeedbackLayer {
        &self.feedback
    }

    /// Drops currently falling
    pub fn drops(&self) -> Vec<(Entity, WaterDrop)> {
        self.drops
            .query::<&WaterDrop>()
            .iter()
            .map(|(entity, drop)| (entity, *drop))
            .collect()
    }

    pub fn live_drops(&self) -> usize {
        self.drops.len() as usize
    }

    pub fn is_drop_live(&self, entity: Entity) -> bool {
        is_live(&self.drops, entity)
    }

    /// Begin a round. Returns false if nothing changed.
    ///
    /// Counters carry over from wherever the last round left them; only
    /// `reset` zeroes them. A round whose clock already ran out cannot be
    /// restarted until it is reset.
    pub fn start(&mut self) -> bool {
        if self.state.phase().next(RoundAction::Start).is_none() {
            debug!("start ignored: round already running");
            return false;
        }
        if self.state.time_left <= 0 {
            warn!("start ignored: no time left, reset first");
            return false;
        }

        self.state.running = true;
        self.surface.set_start_enabled(false);
        self.surface.set_reset_enabled(true);
        self.surface.set_message(START_MESSAGE);

        let countdown = self
            .tasks
            .schedule_repeating(self.config.countdown_interval_ms, RoundTask::Countdown);
        let spawn = self
            .tasks
            .schedule_repeating(self.config.spawn_interval_ms, RoundTask::Spawn);
        self.tickers = Some(Tickers { countdown, spawn });

        info!(
            "round started: score {}, {}s left",
            self.state.score, self.state.time_left
        );
        true
    }

    /// Finish a running round and post its summary
    pub fn end(&mut self) -> Option<RoundSummary> {
        if self.state.phase().next(RoundAction::TimeUp).is_none() {
            debug!("end ignored: round not running");
            return None;
        }

        self.state.running = false;
        self.stop_tickers();
        self.surface.set_start_enabled(true);
        self.clear_drops();

        let summary = RoundSummary::from_state(&self.state, &self.config);
        self.surface.set_message(&summary.message());
        if summary.tier.celebrates() {
            let width = self.surface.viewport_width();
            self.feedback.burst_confetti(&mut self.rng, &self.config, width);
        }
        self.surface.round_finished(&summary);

        self.last_summary = Some(summary);
        self.rounds_finished += 1;
        info!(
            "round finished: score {}, accuracy {}%, {:?} ({} created, {} caught, {} missed)",
            summary.score,
            summary.accuracy,
            summary.tier,
            summary.drops_created,
            summary.drops_caught,
            summary.drops_missed
        );
        Some(summary)
    }

    /// Stop everything and return to a fresh idle round
    pub fn reset(&mut self) {
        self.stop_tickers();
        self.clear_drops();
        self.state = RoundState::new(self.config.round_seconds);
        self.last_summary = None;
        self.show_idle();

        info!("round reset");
    }

    /// Player clicked a drop whose on-screen centre is `center`
    pub fn catch_drop(&mut self, entity: Entity, center: Vec2) -> Retirement {
        if !self.state.running {
            debug!("catch ignored: round not running");
            return Retirement::AlreadyRetired;
        }
        let Some(drop) = retire(&mut self.drops, entity) else {
            debug!("catch ignored: drop {:?} already retired", entity);
            return Retirement::AlreadyRetired;
        };

        apply_catch(&mut self.state, &drop);
        self.surface.set_score(self.state.score);
        self.surface.remove_drop(entity);

        self.feedback.show_catch(&mut self.surface, &self.config, drop.value, center);
        let message = catch_message(&mut self.rng, drop.value);
        self.surface.set_message(message);

        if let Some(text) = milestone_message(self.state.score) {
            info!("milestone reached: {}", self.state.score);
            self.feedback.show_milestone(&mut self.surface, &self.config, text);
        }

        debug!("caught {:?} drop {:?}, score {}", drop.kind, entity, self.state.score);
        Retirement::Caught(drop)
    }

    /// Move time forward by a frame delta, running every task that falls due
    pub fn advance(&mut self, dt_ms: f64) {
        let until = self.time.accumulate(dt_ms);

        while let Some((_, task)) = self.tasks.pop_due(until) {
            // Feedback scheduled by this task starts from its due time
            let due = self.tasks.now_ms();
            self.feedback.advance(&mut self.surface, &self.config, due);

            match task {
                RoundTask::Countdown => self.tick_countdown(),
                RoundTask::Spawn => self.spawn(),
                RoundTask::FallComplete(entity) => {
                    self.fall_complete(entity);
                }
            }
        }
        self.tasks.settle(until);

        self.feedback.advance(&mut self.surface, &self.config, until);
    }

    fn tick_countdown(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.time_left -= 1;
        self.surface.set_time_left(self.state.time_left);

        if self.state.time_left == self.config.low_time_warning_seconds {
            self.surface.set_message(LOW_TIME_MESSAGE);
        }
        if self.state.time_left <= 0 {
            self.end();
        }
    }

    fn spawn(&mut self) {
        let width = self.surface.container_width();
        if let Some((entity, drop)) = spawn_drop(
            &mut self.drops,
            &mut self.state,
            &mut self.rng,
            &self.config,
            width,
        ) {
            self.surface.add_drop(entity, &drop);
            self.tasks.schedule_once(drop.fall_ms(), RoundTask::FallComplete(entity));
        }
    }

    fn fall_complete(&mut self, entity: Entity) -> Retirement {
        let Some(drop) = retire(&mut self.drops, entity) else {
            // Caught before it landed
            return Retirement::AlreadyRetired;
        };

        apply_miss(&mut self.state);
        self.surface.remove_drop(entity);
        debug!("missed {:?} drop {:?}", drop.kind, entity);
        Retirement::Missed(drop)
    }

    fn stop_tickers(&mut self) {
        if let Some(tickers) = self.tickers.take() {
            self.tasks.cancel(tickers.countdown);
            self.tasks.cancel(tickers.spawn);
        }
        // Pending fall completions belong to drops that are about to be cleared
        self.tasks.cancel_all();
    }

    fn clear_drops(&mut self) {
        for entity in clear_drops(&mut self.drops) {
            self.surface.remove_drop(entity);
        }
    }

    fn show_idle(&mut self) {
        self.surface.set_score(self.state.score);
        self.surface.set_time_left(self.state.time_left);
        self.surface.set_message(IDLE_MESSAGE);
        self.surface.set_start_enabled(true);
        self.surface.set_reset_enabled(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MILESTONES;
    use crate::test_support::{Call, RecordingSurface};

    fn controller() -> RoundController<RecordingSurface> {
        RoundController::new(RecordingSurface::new(), Config::new(), GameRng::new(2024))
    }

    fn good_only() -> RoundController<RecordingSurface> {
        let config = Config {
            bad_drop_chance: 0.0,
            ..Config::new()
        };
        RoundController::new(RecordingSurface::new(), config, GameRng::new(2024))
    }

    /// One good drop every 10s, so each fall plays out alone
    fn sparse() -> RoundController<RecordingSurface> {
        let config = Config {
            bad_drop_chance: 0.0,
            spawn_interval_ms: 10_000,
            ..Config::new()
        };
        RoundController::new(RecordingSurface::new(), config, GameRng::new(2024))
    }

    #[test]
    fn test_new_controller_shows_idle() {
        let game = controller();
        let state = game.state();
        assert!(!state.running);
        assert_eq!(state.time_left, 30);
        assert_eq!(game.surface().message(), Some(IDLE_MESSAGE));
        assert_eq!(game.surface().start_enabled(), Some(true));
        assert_eq!(game.surface().reset_enabled(), Some(false));
    }

    #[test]
    fn test_start_toggles_controls_and_tickers() {
        let mut game = controller();
        assert!(game.start());

        assert!(game.state().running);
        assert!(game.is_ticking());
        assert_eq!(game.surface().start_enabled(), Some(false));
        assert_eq!(game.surface().reset_enabled(), Some(true));
        assert_eq!(game.surface().message(), Some(START_MESSAGE));
    }

    #[test]
    fn test_start_while_running_changes_nothing() {
        let mut game = controller();
        game.start();
        game.advance(2500.0);
        let before = game.state();

        assert!(!game.start());
        assert_eq!(game.state(), before);
    }

    #[test]
    fn test_spawn_every_800ms() {
        let mut game = controller();
        game.start();
        game.advance(799.0);
        assert_eq!(game.state().drops_created, 0);
        game.advance(1.0);
        assert_eq!(game.state().drops_created, 1);
        game.advance(1600.0);
        assert_eq!(game.state().drops_created, 3);
        assert_eq!(game.live_drops(), 3);
    }

    #[test]
    fn test_no_spawns_while_idle() {
        let mut game = controller();
        game.advance(10_000.0);
        assert_eq!(game.state().drops_created, 0);
        assert_eq!(game.state().time_left, 30);
    }

    #[test]
    fn test_catch_scores_and_shows_feedback() {
        let mut game = good_only();
        game.start();
        game.advance(800.0);
        let (entity, _) = game.drops()[0];

        let result = game.catch_drop(entity, Vec2::new(100.0, 200.0));
        assert!(matches!(result, Retirement::Caught(drop) if drop.value == 10));
        assert_eq!(game.state().score, 10);
        assert_eq!(game.state().drops_caught, 1);
        assert!(!game.is_drop_live(entity));
        assert!(game.surface().calls.contains(&Call::RemoveDrop(entity)));
        assert_eq!(game.surface().score(), Some(10));

        let popups = game.feedback().popups();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].1.text, "+10");
        assert_eq!(popups[0].1.pos, Some(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_caught_drop_is_not_also_missed() {
        let mut game = sparse();
        game.start();
        game.advance(10_000.0);
        let (entity, _) = game.drops()[0];
        game.catch_drop(entity, Vec2::ZERO);

        // Well past the longest fall
        game.advance(5_100.0);
        assert_eq!(game.state().drops_missed, 0);
        assert_eq!(
            game.catch_drop(entity, Vec2::ZERO),
            Retirement::AlreadyRetired
        );
        assert_eq!(game.state().drops_caught, 1);
    }

    #[test]
    fn test_late_fall_completion_after_catch_is_skipped() {
        let mut game = good_only();
        game.start();
        game.advance(800.0);
        let (entity, _) = game.drops()[0];
        game.catch_drop(entity, Vec2::ZERO);

        assert_eq!(game.fall_complete(entity), Retirement::AlreadyRetired);
        assert_eq!(game.state().drops_missed, 0);
        assert_eq!(game.state().drops_caught, 1);
    }

    #[test]
    fn test_uncaught_drop_is_missed_after_its_fall() {
        let mut game = sparse();
        game.start();
        game.advance(10_000.0);
        let (entity, drop) = game.drops()[0];

        game.advance(drop.fall_ms() as f64 - 1.0);
        assert!(game.is_drop_live(entity));
        game.advance(1.0);
        assert!(!game.is_drop_live(entity));
        assert_eq!(game.state().drops_missed, 1);

        // A late click finds nothing to catch
        assert_eq!(
            game.catch_drop(entity, Vec2::ZERO),
            Retirement::AlreadyRetired
        );
    }

    #[test]
    fn test_catch_ignored_when_idle() {
        let mut game = controller();
        let mut world = World::new();
        let stray = world.spawn((WaterDrop::new(DropKind::Good, 10, 50.0, 0.0, 4.0),));

        assert_eq!(game.catch_drop(stray, Vec2::ZERO), Retirement::AlreadyRetired);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_low_time_warning_at_ten_seconds() {
        let mut game = controller();
        game.start();
        game.advance(19_000.0);
        assert_eq!(game.state().time_left, 11);
        game.advance(1_000.0);
        assert_eq!(game.state().time_left, 10);
        assert!(game
            .surface()
            .calls
            .contains(&Call::Message(LOW_TIME_MESSAGE.to_string())));
    }

    #[test]
    fn test_round_ends_once_after_thirty_ticks() {
        let mut game = controller();
        game.start();
        game.advance(30_000.0);

        let state = game.state();
        assert!(!state.running);
        assert_eq!(state.time_left, 0);
        assert!(!game.is_ticking());
        assert_eq!(game.live_drops(), 0);
        assert_eq!(game.rounds_finished(), 1);
        assert_eq!(game.surface().start_enabled(), Some(true));

        game.advance(10_000.0);
        assert_eq!(game.state(), state, "no tick after the round ended");
        assert_eq!(game.rounds_finished(), 1);
    }

    #[test]
    fn test_end_summary_matches_state() {
        let mut game = controller();
        game.start();
        game.advance(30_000.0);

        let state = game.state();
        let summary = game.last_summary().expect("round finished");
        assert_eq!(summary.score, state.score);
        assert_eq!(summary.accuracy, state.accuracy());
        assert_eq!(game.surface().message(), Some(summary.message().as_str()));
        assert!(state.drops_caught + state.drops_missed <= state.drops_created);
    }

    #[test]
    fn test_end_is_refused_when_idle() {
        let mut game = controller();
        assert_eq!(game.end(), None);
        assert_eq!(game.rounds_finished(), 0);
    }

    #[test]
    fn test_in_flight_drops_are_discarded_not_missed() {
        let mut game = controller();
        game.start();
        game.advance(29_999.0);
        let missed = game.state().drops_missed;
        assert!(game.live_drops() > 0);

        game.advance(1.0);
        assert_eq!(game.live_drops(), 0);
        assert_eq!(game.state().drops_missed, missed);
    }

    #[test]
    fn test_start_refused_after_time_runs_out() {
        let mut game = controller();
        game.start();
        game.advance(30_000.0);

        assert!(!game.start());
        assert!(!game.state().running);

        game.reset();
        assert!(game.start());
    }

    #[test]
    fn test_reset_mid_round_restores_fresh_state() {
        let mut game = controller();
        game.start();
        game.advance(5_000.0);
        let (entity, _) = game.drops()[0];
        game.catch_drop(entity, Vec2::ZERO);

        game.reset();
        assert_eq!(game.state(), RoundState::new(30));
        assert_eq!(game.live_drops(), 0);
        assert!(!game.is_ticking());
        assert_eq!(game.surface().message(), Some(IDLE_MESSAGE));
        assert_eq!(game.surface().start_enabled(), Some(true));
        assert_eq!(game.surface().reset_enabled(), Some(false));
        assert_eq!(game.surface().score(), Some(0));
        assert_eq!(game.surface().time_left(), Some(30));

        game.advance(5_000.0);
        assert_eq!(game.state(), RoundState::new(30));
    }

    #[test]
    fn test_bad_catch_landing_on_milestone_shows_banner() {
        let config = Config {
            bad_drop_chance: 1.0,
            ..Config::new()
        };
        let mut game = RoundController::new(RecordingSurface::new(), config, GameRng::new(2024));
        game.start();
        game.state.score = 65;
        game.advance(800.0);
        let (entity, _) = game.drops()[0];

        game.catch_drop(entity, Vec2::ZERO);
        assert_eq!(game.state().score, 50);

        let banners: Vec<&Popup> = game
            .surface()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::AddPopup(_, popup) if popup.style == PopupStyle::Milestone => Some(popup),
                _ => None,
            })
            .collect();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].text, MILESTONES[0].1);
    }

    #[test]
    fn test_confetti_starts_when_round_ends_mid_frame() {
        let mut game = good_only();
        game.start();
        for _ in 0..10 {
            game.advance(800.0);
            let (entity, _) = game.drops()[0];
            game.catch_drop(entity, Vec2::ZERO);
        }
        assert_eq!(game.state().score, 100);

        // One long frame that runs out the clock exactly at its end
        game.advance(22_000.0);
        assert_eq!(game.last_summary().map(|s| s.tier), Some(Tier::High));

        let confetti = |game: &RoundController<RecordingSurface>| {
            game.feedback()
                .popups()
                .iter()
                .filter(|(_, p)| matches!(p.style, PopupStyle::Confetti { .. }))
                .count()
        };
        assert_eq!(confetti(&game), 1, "only the first particle has launched");
        assert!(game.feedback().pending_tasks() >= 99);

        game.advance(1_980.0);
        assert_eq!(confetti(&game), 100);
        game.advance(3_000.0);
        assert_eq!(confetti(&game), 0);
    }

    #[test]
    fn test_popups_outlive_reset() {
        let mut game = good_only();
        game.start();
        game.advance(800.0);
        let (entity, _) = game.drops()[0];
        game.catch_drop(entity, Vec2::ZERO);

        game.reset();
        assert_eq!(game.feedback().live_popups(), 1);
        game.advance(1_000.0);
        assert_eq!(game.feedback().live_popups(), 0);
    }
}
