use crate::{Popup, RoundSummary, WaterDrop};
use hecs::Entity;

/// Display capability the game renders through.
///
/// Drop and popup entities come from separate worlds, so implementations must
/// key them separately.
pub trait Surface {
    /// Width of the drop container, px
    fn container_width(&self) -> f32;

    /// Width of the whole viewport (confetti spread), px
    fn viewport_width(&self) -> f32;

    fn set_score(&mut self, score: i32);
    fn set_time_left(&mut self, seconds: i32);
    fn set_message(&mut self, text: &str);
    fn set_start_enabled(&mut self, enabled: bool);
    fn set_reset_enabled(&mut self, enabled: bool);

    fn add_drop(&mut self, entity: Entity, drop: &WaterDrop);
    fn remove_drop(&mut self, entity: Entity);

    fn add_popup(&mut self, entity: Entity, popup: &Popup);
    fn remove_popup(&mut self, entity: Entity);

    /// Called once per finished round, after the final message is shown
    fn round_finished(&mut self, _summary: &RoundSummary) {}
}
