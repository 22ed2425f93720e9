// Console collaborator
//
// The engine never touches stdin/stdout directly. It asks a `Console` for
// names and commands and hands it `GameEvent`s to show.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use async_trait::async_trait;
use itertools::Itertools;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::errors::{PigError, PigResult};

/// What a human chose to do with their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Roll,
    Hold,
}

impl FromStr for TurnAction {
    type Err = PigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "roll" => Ok(TurnAction::Roll),
            "h" | "hold" => Ok(TurnAction::Hold),
            _ => Err(PigError::invalid_input(s.trim())),
        }
    }
}

/// Everything the engine reports to the players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    TurnStarted {
        name: String,
        turn_score: u32,
        score: u32,
        automated: bool,
    },
    Rolled {
        name: String,
        face: u8,
    },
    Busted {
        name: String,
    },
    TurnScore {
        name: String,
        turn_score: u32,
    },
    Held {
        name: String,
        score: u32,
    },
    Scorecard(Vec<(String, u32)>),
    InvalidInput {
        input: String,
    },
    TimeRemaining {
        seconds: u64,
    },
    TimeUp,
    Winner {
        name: String,
        score: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::TurnStarted {
                name,
                turn_score,
                score,
                automated,
            } => {
                let tag = if *automated { " (Computer)" } else { "" };
                write!(
                    f,
                    "{}'s turn{}. Current score: {}, Total score: {}",
                    name, tag, turn_score, score
                )
            }
            GameEvent::Rolled { name, face } => write!(f, "{} rolled a {}", name, face),
            GameEvent::Busted { name } => write!(f, "{} loses this turn's points!", name),
            GameEvent::TurnScore { name, turn_score } => {
                write!(f, "{} turn score: {}", name, turn_score)
            }
            GameEvent::Held { name, score } => {
                write!(f, "{} decides to hold. Total score: {}", name, score)
            }
            GameEvent::Scorecard(rows) => {
                let lines = rows
                    .iter()
                    .map(|(name, score)| format!("{}: {}", name, score))
                    .join("\n");
                write!(f, "\nCurrent Scores:\n{}\n", lines)
            }
            GameEvent::InvalidInput { input } => write!(
                f,
                "Invalid input '{}'. Please choose 'r' to roll or 'h' to hold.",
                input
            ),
            GameEvent::TimeRemaining { seconds } => {
                write!(f, "\nTime remaining: {} seconds", seconds)
            }
            GameEvent::TimeUp => write!(f, "\nTime's up!"),
            GameEvent::Winner { name, score } => {
                write!(f, "{} wins with a score of {}!", name, score)
            }
        }
    }
}

/// Request/response boundary between the engine and whoever is playing
#[async_trait]
pub trait Console: Send {
    /// Ask for the name of the player in `seat` (counting from 1)
    async fn prompt_name(&mut self, seat: usize) -> PigResult<String>;

    /// Read one raw roll/hold command
    async fn read_command(&mut self) -> PigResult<String>;

    fn display(&mut self, event: &GameEvent);

    /// Read commands until one parses as a `TurnAction`.
    async fn prompt_action(&mut self) -> PigResult<TurnAction> {
        loop {
            let line = self.read_command().await?;
            match line.parse::<TurnAction>() {
                Ok(action) => return Ok(action),
                Err(err) => {
                    log::debug!("Rejected command: {}", err);
                    self.display(&GameEvent::InvalidInput {
                        input: line.trim().to_string(),
                    });
                }
            }
        }
    }
}

/// Console backed by the process's stdin and stdout
pub struct TerminalConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    async fn read_line(&mut self, prompt: &str) -> PigResult<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line),
            None => Err(PigError::InputClosed),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for TerminalConsole {
    async fn prompt_name(&mut self, seat: usize) -> PigResult<String> {
        let prompt = format!("Enter the name for Player {}: ", seat);
        let name = self.read_line(&prompt).await?;
        Ok(name.trim().to_string())
    }

    async fn read_command(&mut self) -> PigResult<String> {
        self.read_line("Press 'r' to roll or 'h' to hold: ").await
    }

    fn display(&mut self, event: &GameEvent) {
        println!("{}", event);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::{Console, GameEvent};
    use crate::errors::{PigError, PigResult};

    /// Console that replays canned input and records every event
    #[derive(Default)]
    pub struct ScriptedConsole {
        names: VecDeque<String>,
        commands: VecDeque<String>,
        pub events: Vec<GameEvent>,
    }

    impl ScriptedConsole {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_commands(commands: &[&str]) -> Self {
            ScriptedConsole {
                commands: commands.iter().map(|c| c.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn with_names(mut self, names: &[&str]) -> Self {
            self.names = names.iter().map(|n| n.to_string()).collect();
            self
        }

        pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
            self.events.iter().filter(|e| pred(e)).count()
        }
    }

    #[async_trait]
    impl Console for ScriptedConsole {
        async fn prompt_name(&mut self, _seat: usize) -> PigResult<String> {
            self.names.pop_front().ok_or(PigError::InputClosed)
        }

        async fn read_command(&mut self) -> PigResult<String> {
            self.commands.pop_front().ok_or(PigError::InputClosed)
        }

        fn display(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }

    /// Console whose commands never arrive, like a player who walked away
    #[derive(Default)]
    pub struct StalledConsole {
        pub events: Vec<GameEvent>,
    }

    #[async_trait]
    impl Console for StalledConsole {
        async fn prompt_name(&mut self, seat: usize) -> PigResult<String> {
            Ok(format!("Player {}", seat))
        }

        async fn read_command(&mut self) -> PigResult<String> {
            std::future::pending::<PigResult<String>>().await
        }

        fn display(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }
}
