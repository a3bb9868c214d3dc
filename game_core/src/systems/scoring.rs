use rand::seq::SliceRandom;

use crate::components::*;
use crate::messages::{BAD_CATCH_MESSAGES, GOOD_CATCH_MESSAGES, MILESTONES};
use crate::resources::*;

/// Apply a caught drop to the round counters.
///
/// Bad catches move the score but count neither as caught nor as missed.
pub fn apply_catch(state: &mut RoundState, drop: &WaterDrop) {
    state.score += drop.value;
    if drop.value > 0 {
        state.drops_caught += 1;
    }
}

/// Apply a drop that fell out of the container untouched
pub fn apply_miss(state: &mut RoundState) {
    state.drops_missed += 1;
}

/// Banner text when `score` lands exactly on a milestone
pub fn milestone_message(score: i32) -> Option<&'static str> {
    MILESTONES
        .iter()
        .find(|(value, _)| *value == score)
        .map(|(_, text)| *text)
}

/// Random flavour text for a catch of the given value
pub fn catch_message(rng: &mut GameRng, value: i32) -> &'static str {
    let pool: &[&'static str] = if value > 0 {
        &GOOD_CATCH_MESSAGES
    } else {
        &BAD_CATCH_MESSAGES
    };
    pool.choose(&mut rng.0).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_worth(value: i32) -> WaterDrop {
        let kind = if value > 0 { DropKind::Good } else { DropKind::Bad };
        WaterDrop::new(kind, value, 50.0, 0.0, 4.0)
    }

    #[test]
    fn test_good_catch_scores_and_counts() {
        let mut state = RoundState::new(30);
        apply_catch(&mut state, &drop_worth(10));
        assert_eq!(state.score, 10);
        assert_eq!(state.drops_caught, 1);
        assert_eq!(state.drops_missed, 0);
    }

    #[test]
    fn test_bad_catch_only_moves_score() {
        let mut state = RoundState::new(30);
        apply_catch(&mut state, &drop_worth(-15));
        assert_eq!(state.score, -15);
        assert_eq!(state.drops_caught, 0);
        assert_eq!(state.drops_missed, 0);
    }

    #[test]
    fn test_miss_counts() {
        let mut state = RoundState::new(30);
        apply_miss(&mut state);
        apply_miss(&mut state);
        assert_eq!(state.drops_missed, 2);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_milestones_require_exact_score() {
        assert!(milestone_message(50).unwrap().contains("50 Points"));
        assert!(milestone_message(100).unwrap().contains("100 Points"));
        assert!(milestone_message(200).unwrap().contains("water hero"));
        assert_eq!(milestone_message(55), None);
        assert_eq!(milestone_message(150), None);
        assert_eq!(milestone_message(0), None);
    }

    #[test]
    fn test_milestone_skipped_when_jumped_over() {
        let mut state = RoundState::new(30);
        state.score = 45;
        apply_catch(&mut state, &drop_worth(10));
        assert_eq!(state.score, 55);
        assert_eq!(milestone_message(state.score), None);

        state.score = 40;
        apply_catch(&mut state, &drop_worth(10));
        assert!(milestone_message(state.score).is_some());
    }

    #[test]
    fn test_catch_message_pool_follows_sign() {
        let mut rng = GameRng::new(5);
        for _ in 0..20 {
            assert!(GOOD_CATCH_MESSAGES.contains(&catch_message(&mut rng, 10)));
            assert!(BAD_CATCH_MESSAGES.contains(&catch_message(&mut rng, -15)));
        }
    }
}
