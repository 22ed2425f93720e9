// Player module - seat identity, score counters and the player factory
//
// Turn-taking behaviour lives elsewhere: humans are driven through the console,
// computers through a `BotStrategy` (see `crate::players`).

use std::fmt;
use std::str::FromStr;

use crate::errors::{PigError, PigResult};

/// Who decides between rolling and holding for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Computer => "computer",
        }
    }
}

impl FromStr for PlayerKind {
    type Err = PigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(PlayerKind::Human),
            "computer" => Ok(PlayerKind::Computer),
            other => Err(PigError::invalid_argument(other)),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying one die face to a player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// A one was rolled and the turn score was forfeited
    Bust,
    /// The face was added; carries the new turn score
    Scored(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    score: u32,
    turn_score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            name: name.into(),
            kind,
            score: 0,
            turn_score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Computer
    }

    /// Committed total
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Points accumulated this turn but not yet banked
    pub fn turn_score(&self) -> u32 {
        self.turn_score
    }

    /// Bank the turn score into the committed total.
    pub fn hold(&mut self) {
        self.score += self.turn_score;
        self.turn_score = 0;
    }

    pub fn reset_turn_score(&mut self) {
        self.turn_score = 0;
    }

    pub fn add_to_turn(&mut self, points: u32) {
        self.turn_score += points;
    }

    /// Apply a rolled face: a one busts the turn, anything else accumulates.
    pub fn record_roll(&mut self, face: u8) -> RollOutcome {
        if face == 1 {
            self.reset_turn_score();
            RollOutcome::Bust
        } else {
            self.add_to_turn(face as u32);
            RollOutcome::Scored(self.turn_score)
        }
    }
}

/// Factory for creating players from a type tag
pub struct PlayerFactory;

impl PlayerFactory {
    pub fn create_player(kind: &str, name: impl Into<String>) -> PigResult<Player> {
        let kind = kind.parse::<PlayerKind>()?;
        Ok(Player::new(name, kind))
    }

    /// Default seat name for an automated player (seats count from 1)
    pub fn computer_name(seat: usize) -> String {
        format!("Computer Player {}", seat)
    }
}
