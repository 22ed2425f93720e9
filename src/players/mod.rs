// Players module - automated turn-taking
//
// A `BotStrategy` only answers "roll or hold?"; `take_turn` runs the dice and
// reports progress to the console.

use crate::console::{Console, GameEvent, TurnAction};
use crate::die::Roller;
use crate::player::{Player, RollOutcome};

pub mod threshold;

pub use self::threshold::HoldAtThreshold;

/// Decision policy for a computer-controlled seat
pub trait BotStrategy: Send + Sync {
    /// Decide the next action given the player's current counters
    fn decide(&self, player: &Player) -> TurnAction;
}

/// Play one full automated turn: roll until the strategy holds or a one busts.
pub fn take_turn(
    strategy: &dyn BotStrategy,
    player: &mut Player,
    die: &mut dyn Roller,
    console: &mut dyn Console,
) {
    console.display(&GameEvent::TurnStarted {
        name: player.name().to_string(),
        turn_score: player.turn_score(),
        score: player.score(),
        automated: true,
    });

    loop {
        match strategy.decide(player) {
            TurnAction::Hold => {
                player.hold();
                log::info!("{} holds at {}", player.name(), player.score());
                console.display(&GameEvent::Held {
                    name: player.name().to_string(),
                    score: player.score(),
                });
                return;
            }
            TurnAction::Roll => {
                let face = die.roll();
                log::debug!("{} rolled {}", player.name(), face);
                console.display(&GameEvent::Rolled {
                    name: player.name().to_string(),
                    face,
                });

                match player.record_roll(face) {
                    RollOutcome::Bust => {
                        console.display(&GameEvent::Busted {
                            name: player.name().to_string(),
                        });
                        return;
                    }
                    RollOutcome::Scored(turn_score) => {
                        console.display(&GameEvent::TurnScore {
                            name: player.name().to_string(),
                            turn_score,
                        });
                    }
                }
            }
        }
    }
}
