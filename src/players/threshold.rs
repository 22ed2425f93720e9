use super::BotStrategy;
use crate::config::{HOLD_CAP, TARGET_SCORE};
use crate::console::TurnAction;
use crate::player::Player;

/// Holds once the turn score reaches `min(cap, target - score)`.
///
/// Near the end of the game the threshold shrinks to exactly what is needed
/// to win, so the player never keeps rolling once a hold would finish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldAtThreshold {
    cap: u32,
    target: u32,
}

impl HoldAtThreshold {
    pub fn new(cap: u32, target: u32) -> Self {
        HoldAtThreshold { cap, target }
    }

    pub fn threshold(&self, score: u32) -> u32 {
        self.cap.min(self.target.saturating_sub(score))
    }
}

impl Default for HoldAtThreshold {
    fn default() -> Self {
        Self::new(HOLD_CAP, TARGET_SCORE)
    }
}

impl BotStrategy for HoldAtThreshold {
    fn decide(&self, player: &Player) -> TurnAction {
        if player.turn_score() >= self.threshold(player.score()) {
            TurnAction::Hold
        } else {
            TurnAction::Roll
        }
    }
}
