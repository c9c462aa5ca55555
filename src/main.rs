use clap::{Args, Parser, Subcommand};
use twenty_fourty_eight_rules::{
    config::{
        DEFAULT_FOUR_PROBABILITY, DEFAULT_HISTORY_CAPACITY, DEFAULT_WIN_TARGET, GameConfig,
    },
    game::GameSession,
    input::Input,
    spawn::RngSource,
    tui,
};

#[derive(Debug, Parser)]
#[command(version, about = "Play 2048 in the terminal or replay scripted inputs")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct GameArgs {
    /// Tile value that wins the round
    #[arg(long, default_value_t = DEFAULT_WIN_TARGET)]
    win_target: u32,

    /// Probability that a spawned tile is a 4
    #[arg(long, default_value_t = DEFAULT_FOUR_PROBABILITY)]
    four_probability: f64,

    /// Number of finished runs to remember
    #[arg(long = "history", default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Seed for tile spawns, random if omitted
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Interactive game (default)
    Play,
    /// Read one input per line from stdin (`left`, `new sensor`, ...)
    Script,
}

impl GameArgs {
    fn config(&self) -> anyhow::Result<GameConfig> {
        let config = GameConfig {
            win_target: self.win_target,
            four_probability: self.four_probability,
            history_capacity: self.history_capacity,
        };

        Ok(config.validated()?)
    }

    fn rng(&self) -> RngSource<rand::rngs::StdRng> {
        self.seed.map_or_else(RngSource::from_entropy, RngSource::seeded)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut session = GameSession::new(cli.game.config()?, cli.game.rng())?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => tui::play(&mut session)?,
        Command::Script => script(&mut session)?,
    }

    Ok(())
}

fn script(session: &mut GameSession<RngSource<rand::rngs::StdRng>>) -> anyhow::Result<()> {
    let inputs: anyhow::Result<Vec<Input>> = std::io::stdin()
        .lines()
        .filter(|line| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
        .map(|line| Ok(line?.parse()?))
        .collect();

    session.run(inputs?, |_, turn| log::debug!("{turn:?}"));

    print!("{}", tui::render_text(session));

    Ok(())
}
