// Game configuration
//
// Fixed rule constants plus the per-run settings collected from the command line.

use std::time::Duration;

use crate::console::Console;
use crate::errors::PigResult;
use crate::player::{Player, PlayerFactory, PlayerKind};

/// Committed score that wins the game
pub const TARGET_SCORE: u32 = 100;

/// Faces on the shared die
pub const DIE_SIDES: u8 = 6;

/// Turn score at which the automated player always holds
pub const HOLD_CAP: u32 = 25;

/// Wall-clock budget for a timed game
pub const TIME_LIMIT: Duration = Duration::from_secs(60);

pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seats: Vec<PlayerKind>,
    pub timed: bool,
    pub seed: Option<u64>,
    pub time_limit: Duration,
}

impl GameConfig {
    /// Build a configuration from raw player-type tags, rejecting unknown tags
    /// before any player is named.
    pub fn from_tags<S: AsRef<str>>(tags: &[S], timed: bool, seed: Option<u64>) -> PigResult<Self> {
        let seats = tags
            .iter()
            .map(|tag| tag.as_ref().parse::<PlayerKind>())
            .collect::<PigResult<Vec<_>>>()?;

        Ok(GameConfig {
            seats,
            timed,
            seed,
            time_limit: TIME_LIMIT,
        })
    }

    /// Create the players in seat order. Only human seats are asked for a
    /// name; computer seats get a generated one.
    pub async fn seat_players(&self, console: &mut dyn Console) -> PigResult<Vec<Player>> {
        let mut players = Vec::with_capacity(self.seats.len());
        for (i, kind) in self.seats.iter().enumerate() {
            let seat = i + 1;
            let name = match kind {
                PlayerKind::Human => console.prompt_name(seat).await?,
                PlayerKind::Computer => PlayerFactory::computer_name(seat),
            };
            players.push(PlayerFactory::create_player(kind.as_str(), name)?);
        }
        Ok(players)
    }
}
