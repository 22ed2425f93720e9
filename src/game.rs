// Game - turn resolution for a single Pig session
//
// `Game` owns the players, the die and the rotation index. The turn loop is
// written once (`run_turns`) against the `TurnSource` capability so that the
// plain game and the deadlined game share win detection and winner selection.

use std::fmt;

use async_trait::async_trait;
use itertools::Itertools;

use crate::config::{MIN_PLAYERS, TARGET_SCORE};
use crate::console::{Console, GameEvent, TurnAction};
use crate::die::Roller;
use crate::errors::{PigError, PigResult};
use crate::player::{Player, RollOutcome};
use crate::players::{self, BotStrategy, HoldAtThreshold};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    ReachedTarget,
    TimeExpired,
}

/// Final result handed back to the top-level driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub seat: usize,
    pub name: String,
    pub score: u32,
    pub reason: WinReason,
}

impl GameResult {
    fn for_seat(seat: usize, player: &Player, reason: WinReason) -> Self {
        GameResult {
            seat,
            name: player.name().to_string(),
            score: player.score(),
            reason,
        }
    }

    pub fn announcement(&self) -> GameEvent {
        GameEvent::Winner {
            name: self.name.clone(),
            score: self.score,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            WinReason::ReachedTarget => write!(f, "{} reached {}", self.name, self.score),
            WinReason::TimeExpired => {
                write!(f, "{} led with {} when time ran out", self.name, self.score)
            }
        }
    }
}

/// Whether a turn was actually played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Resolved,
    /// The deadline passed before the turn could start
    Expired,
}

/// Something that can play the current seat's turn on a `Game`
#[async_trait]
pub trait TurnSource: Send {
    async fn play_turn(&mut self, console: &mut dyn Console) -> PigResult<TurnStatus>;

    fn game(&self) -> &Game;

    fn game_mut(&mut self) -> &mut Game;
}

/// Drive turns until someone reaches the target or the source reports expiry.
///
/// Does not announce anything; callers display the returned result once.
pub async fn run_turns<S>(source: &mut S, console: &mut dyn Console) -> PigResult<GameResult>
where
    S: TurnSource + ?Sized,
{
    loop {
        if source.play_turn(console).await? == TurnStatus::Expired {
            return Ok(source.game().leader(WinReason::TimeExpired));
        }

        let game = source.game_mut();
        if let Some(seat) = game.winning_seat() {
            return Ok(GameResult::for_seat(
                seat,
                &game.players[seat],
                WinReason::ReachedTarget,
            ));
        }
        game.switch_turn();
    }
}

pub struct Game {
    die: Box<dyn Roller>,
    players: Vec<Player>,
    current_player_index: usize,
    strategy: Box<dyn BotStrategy>,
}

impl Game {
    /// Create a game; seat order is the order of `players`.
    pub fn new(players: Vec<Player>, die: Box<dyn Roller>) -> PigResult<Self> {
        if players.len() < MIN_PLAYERS {
            return Err(PigError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                found: players.len(),
            });
        }

        log::info!(
            "Starting game with {} players: {}",
            players.len(),
            players
                .iter()
                .map(|p| format!("{} ({})", p.name(), p.kind()))
                .join(", ")
        );

        Ok(Game {
            die,
            players,
            current_player_index: 0,
            strategy: Box::new(HoldAtThreshold::default()),
        })
    }

    /// Replace the decision policy used for computer seats
    pub fn with_strategy(mut self, strategy: Box<dyn BotStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn switch_turn(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
    }

    /// First player in seat order at or above the target score
    pub fn check_winner(&self) -> Option<&Player> {
        self.winning_seat().map(|seat| &self.players[seat])
    }

    fn winning_seat(&self) -> Option<usize> {
        self.players.iter().position(|p| p.score() >= TARGET_SCORE)
    }

    /// Player with the highest committed score; ties go to the earlier seat.
    pub fn leader(&self, reason: WinReason) -> GameResult {
        let mut seat = 0;
        for (i, player) in self.players.iter().enumerate().skip(1) {
            if player.score() > self.players[seat].score() {
                seat = i;
            }
        }
        GameResult::for_seat(seat, &self.players[seat], reason)
    }

    pub fn scorecard(&self) -> GameEvent {
        GameEvent::Scorecard(
            self.players
                .iter()
                .map(|p| (p.name().to_string(), p.score()))
                .collect(),
        )
    }

    /// Play until a player reaches the target and announce them.
    pub async fn play_game(&mut self, console: &mut dyn Console) -> PigResult<GameResult> {
        let result = run_turns(&mut *self, &mut *console).await?;
        log::info!("Game over: {}", result);
        console.display(&result.announcement());
        Ok(result)
    }

    async fn play_human_turn(&mut self, console: &mut dyn Console) -> PigResult<()> {
        let seat = self.current_player_index;
        {
            let player = &self.players[seat];
            console.display(&GameEvent::TurnStarted {
                name: player.name().to_string(),
                turn_score: player.turn_score(),
                score: player.score(),
                automated: false,
            });
        }

        loop {
            match console.prompt_action().await? {
                TurnAction::Roll => {
                    let face = self.die.roll();
                    let player = &mut self.players[seat];
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
                            return Ok(());
                        }
                        RollOutcome::Scored(turn_score) => {
                            console.display(&GameEvent::TurnScore {
                                name: player.name().to_string(),
                                turn_score,
                            });
                            console.display(&self.scorecard());
                        }
                    }
                }
                TurnAction::Hold => {
                    let player = &mut self.players[seat];
                    player.hold();
                    log::info!("{} holds at {}", player.name(), player.score());
                    console.display(&GameEvent::Held {
                        name: player.name().to_string(),
                        score: player.score(),
                    });
                    console.display(&self.scorecard());
                    return Ok(());
                }
            }
        }
    }
}

#[async_trait]
impl TurnSource for Game {
    async fn play_turn(&mut self, console: &mut dyn Console) -> PigResult<TurnStatus> {
        let seat = self.current_player_index;
        if self.players[seat].is_bot() {
            players::take_turn(
                &*self.strategy,
                &mut self.players[seat],
                &mut *self.die,
                console,
            );
        } else {
            self.play_human_turn(console).await?;
        }
        Ok(TurnStatus::Resolved)
    }

    fn game(&self) -> &Game {
        self
    }

    fn game_mut(&mut self) -> &mut Game {
        self
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players)
            .field("current_player_index", &self.current_player_index)
            .field("die_sides", &self.die.sides())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{loaded_game, player_with_score};
    use super::*;
    use crate::console::testing::ScriptedConsole;
    use crate::die::Die;
    use crate::player::PlayerKind;

    fn bots() -> Vec<Player> {
        vec![
            Player::new("Computer Player 1", PlayerKind::Computer),
            Player::new("Computer Player 2", PlayerKind::Computer),
        ]
    }

    #[test]
    fn test_new_requires_two_players() {
        let err = Game::new(
            vec![Player::new("Solo", PlayerKind::Human)],
            Box::new(Die::with_seed(1)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PigError::NotEnoughPlayers { min: 2, found: 1 }
        ));
    }

    #[test]
    fn test_switch_turn_cycles() {
        let mut game = loaded_game(bots(), &[]);
        assert_eq!(game.current_player_index(), 0);
        game.switch_turn();
        assert_eq!(game.current_player_index(), 1);
        game.switch_turn();
        assert_eq!(game.current_player_index(), 0);
    }

    #[test]
    fn test_switch_turn_cycles_three_seats() {
        let mut players = bots();
        players.push(Player::new("Ada", PlayerKind::Human));
        let mut game = loaded_game(players, &[]);
        for expected in [1, 2, 0, 1] {
            game.switch_turn();
            assert_eq!(game.current_player_index(), expected);
        }
    }

    #[test]
    fn test_check_winner_seat_order() {
        let game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 99),
                player_with_score("Bob", PlayerKind::Human, 40),
            ],
            &[],
        );
        assert!(game.check_winner().is_none());

        let game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 30),
                player_with_score("Bob", PlayerKind::Human, 100),
                player_with_score("Cy", PlayerKind::Human, 112),
            ],
            &[],
        );
        assert_eq!(game.check_winner().map(|p| p.name()), Some("Bob"));
    }

    #[test]
    fn test_leader_breaks_ties_by_seat() {
        let game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 42),
                player_with_score("Bob", PlayerKind::Human, 42),
            ],
            &[],
        );
        let result = game.leader(WinReason::TimeExpired);
        assert_eq!(result.seat, 0);
        assert_eq!(result.name, "Ada");

        let game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 10),
                player_with_score("Bob", PlayerKind::Human, 42),
            ],
            &[],
        );
        assert_eq!(game.leader(WinReason::TimeExpired).name, "Bob");
    }

    #[tokio::test]
    async fn test_two_bots_both_bust() {
        let mut game = loaded_game(bots(), &[3, 4, 1, 6, 6, 6, 2, 1]);
        let mut console = ScriptedConsole::new();

        game.play_turn(&mut console).await.unwrap();
        game.switch_turn();
        game.play_turn(&mut console).await.unwrap();

        for player in game.players() {
            assert_eq!(player.score(), 0);
            assert_eq!(player.turn_score(), 0);
        }
        assert_eq!(console.count(|e| matches!(e, GameEvent::Busted { .. })), 2);
        assert!(game.check_winner().is_none());
    }

    #[tokio::test]
    async fn test_bot_on_eighty_holds_at_twenty_and_wins() {
        let mut game = loaded_game(
            vec![
                player_with_score("Hal", PlayerKind::Computer, 80),
                Player::new("Ada", PlayerKind::Human),
            ],
            &[6, 6, 6, 2],
        );
        let mut console = ScriptedConsole::new();

        let result = game.play_game(&mut console).await.unwrap();
        assert_eq!(result.name, "Hal");
        assert_eq!(result.score, 100);
        assert_eq!(result.reason, WinReason::ReachedTarget);
        assert_eq!(
            console.count(|e| matches!(e, GameEvent::Winner { .. })),
            1
        );
    }

    #[tokio::test]
    async fn test_human_roll_then_hold() {
        let mut game = loaded_game(
            vec![
                Player::new("Ada", PlayerKind::Human),
                Player::new("Bob", PlayerKind::Human),
            ],
            &[5, 3],
        );
        let mut console = ScriptedConsole::with_commands(&["r", "x", "R", "h"]);

        game.play_turn(&mut console).await.unwrap();

        let ada = &game.players()[0];
        assert_eq!(ada.score(), 8);
        assert_eq!(ada.turn_score(), 0);
        assert_eq!(
            console.count(|e| matches!(e, GameEvent::InvalidInput { .. })),
            1
        );
        assert_eq!(
            console.events.last(),
            Some(&GameEvent::Scorecard(vec![
                ("Ada".to_string(), 8),
                ("Bob".to_string(), 0)
            ]))
        );
    }

    #[tokio::test]
    async fn test_human_bust_ends_turn() {
        let mut game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 20),
                Player::new("Bob", PlayerKind::Human),
            ],
            &[6, 1],
        );
        let mut console = ScriptedConsole::with_commands(&["r", "r", "h"]);

        game.play_turn(&mut console).await.unwrap();

        assert_eq!(game.players()[0].score(), 20);
        assert_eq!(game.players()[0].turn_score(), 0);
        assert_eq!(
            console.events.last(),
            Some(&GameEvent::Busted {
                name: "Ada".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_play_game_human_vs_bot() {
        let mut game = loaded_game(
            vec![
                player_with_score("Ada", PlayerKind::Human, 95),
                Player::new("Hal", PlayerKind::Computer),
            ],
            &[4, 1, 6],
        );
        // Ada rolls 4 and holds at 99, Hal busts, Ada rolls 6 and holds at 105
        let mut console = ScriptedConsole::with_commands(&["r", "h", "r", "h"]);

        let result = game.play_game(&mut console).await.unwrap();
        assert_eq!(result.seat, 0);
        assert_eq!(result.score, 105);
        assert_eq!(result.reason, WinReason::ReachedTarget);
        assert_eq!(game.current_player_index(), 0);
    }

    #[tokio::test]
    async fn test_closed_input_aborts_game() {
        let mut game = loaded_game(
            vec![
                Player::new("Ada", PlayerKind::Human),
                Player::new("Bob", PlayerKind::Human),
            ],
            &[],
        );
        let mut console = ScriptedConsole::new();
        assert!(matches!(
            game.play_game(&mut console).await,
            Err(PigError::InputClosed)
        ));
    }

    struct AlwaysHold;

    impl BotStrategy for AlwaysHold {
        fn decide(&self, _player: &Player) -> TurnAction {
            TurnAction::Hold
        }
    }

    #[tokio::test]
    async fn test_custom_strategy_drives_bots() {
        let mut game = loaded_game(bots(), &[]).with_strategy(Box::new(AlwaysHold));
        let mut console = ScriptedConsole::new();

        game.play_turn(&mut console).await.unwrap();

        assert_eq!(game.current_player().score(), 0);
        assert_eq!(console.count(|e| matches!(e, GameEvent::Rolled { .. })), 0);
        assert_eq!(console.count(|e| matches!(e, GameEvent::Held { .. })), 1);
    }

    #[tokio::test]
    async fn test_seeded_bots_finish() {
        let mut game = Game::new(bots(), Box::new(Die::with_seed(5))).unwrap();
        let mut console = ScriptedConsole::new();
        let result = game.play_game(&mut console).await.unwrap();
        assert!(result.score >= 100);
        assert_eq!(game.check_winner().map(|p| p.name()), Some(result.name.as_str()));
    }
}
