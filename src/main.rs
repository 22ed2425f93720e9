use clap::Parser;

use pig::{Die, Game, GameConfig, GameResult, PigResult, TerminalConsole, TimedGame};

/// Play a game of Pig!
#[derive(Debug, Parser)]
#[command(name = "pig", version = pig::VERSION)]
struct Cli {
    /// Type of Player 1 (human/computer)
    #[arg(long, default_value = "human")]
    player1: String,

    /// Type of Player 2 (human/computer)
    #[arg(long, default_value = "human")]
    player2: String,

    /// Play a timed version of the game (1 minute limit)
    #[arg(long)]
    timed: bool,

    /// Seed the die for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(err) = run_cli(Cli::parse()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> PigResult<()> {
    let tags = [cli.player1.as_str(), cli.player2.as_str()];
    let config = GameConfig::from_tags(&tags, cli.timed, cli.seed)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(run(config));
    // a cut-off human may still have a stdin read in flight
    runtime.shutdown_background();

    let result = outcome?;
    log::info!("Winner: {} (seat {})", result, result.seat + 1);
    Ok(())
}

async fn run(config: GameConfig) -> PigResult<GameResult> {
    let mut console = TerminalConsole::new();
    let players = config.seat_players(&mut console).await?;

    let die = match config.seed {
        Some(seed) => Die::with_seed(seed),
        None => Die::new(),
    };
    let game = Game::new(players, Box::new(die))?;

    if config.timed {
        let mut timed = TimedGame::with_limit(game, config.time_limit);
        timed.play_game(&mut console).await
    } else {
        let mut game = game;
        game.play_game(&mut console).await
    }
}
