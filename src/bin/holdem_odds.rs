//! Command-line front end.
//!
//! Without `--hand`, deals a random quiz table: 2-9 players, a random hand
//! for player 1 and, two times in three, a random flop or turn.

use clap::Parser;
use holdem_odds::{
    parse_cards, DeckType, Equity, SimulationConfig, Simulator, Table, HERO,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Estimate Texas Hold'em win/tie/lose odds by Monte Carlo simulation",
    long_about = "Estimate win/tie/lose odds for player 1.\n\
                  Give --hand (and optionally --board) for a specific spot, \
                  or run without them for a random quiz table."
)]
struct Args {
    /// Player 1 hole cards (e.g. "As Kd")
    #[arg(long)]
    hand: Option<String>,

    /// Known community cards: 3, 4 or 5 (e.g. "Kh 7c 2d")
    #[arg(long, requires = "hand")]
    board: Option<String>,

    /// Players at the table including player 1 (2-10)
    #[arg(short, long)]
    players: Option<usize>,

    /// Outer samples (board completions); defaults to the config's escalation policy
    #[arg(long)]
    outer: Option<usize>,

    /// Inner trials per outer sample
    #[arg(long)]
    inner: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Your guess of the win probability in [0, 1]; prints the error
    #[arg(long)]
    guess: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    holdem_odds::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SimulationConfig::from_env()?;
    if let Some(n) = args.outer {
        config.n_outer = n;
        config.n_outer_postflop = n;
    }
    if let Some(n) = args.inner {
        config.n_inner = n;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(n) = args.threads {
        config.threads = Some(n);
    }

    let mut rng = quiz_rng(config.seed.unwrap_or_else(rand::random::<u64>));

    let table = match &args.hand {
        Some(hand) => explicit_table(hand, args.board.as_deref(), args.players.unwrap_or(2))?,
        None => quiz_table(args.players, &mut rng)?,
    };

    if !args.json {
        println!("{}", table.view_table());
        println!();
    }

    let sim = Simulator::from_config(&config, table.street())?;
    let report = sim.run(&table)?;

    if args.json {
        println!("{}", serde_json::to_string(&report.equity)?);
        return Ok(());
    }

    print_equity(&report.equity);
    println!(
        "({} board samples x {} hands, seed {})",
        report.samples,
        sim.n_inner(),
        report.seed
    );

    if let Some(guess) = args.guess {
        let error = (guess - report.equity.win).abs();
        println!("Your guess: {:.2}%  error: {:.2} points", guess * 100.0, error * 100.0);
    }

    Ok(())
}

/// Generator for dealing the quiz table. The simulator's sample streams
/// start at `seed` and advance by `jump()`; this one is `long_jump()`ed
/// past all of them.
fn quiz_rng(seed: u64) -> Xoshiro256PlusPlus {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    rng.long_jump();
    rng
}

fn explicit_table(hand: &str, board: Option<&str>, players: usize) -> holdem_odds::Result<Table> {
    let mut table = Table::new(players, DeckType::Full)?;
    table.add_to_hand(HERO, &parse_cards(hand)?)?;
    if let Some(board) = board {
        table.add_to_community(&parse_cards(board)?)?;
    }
    Ok(table)
}

fn quiz_table<R: Rng>(players: Option<usize>, rng: &mut R) -> holdem_odds::Result<Table> {
    let players = players.unwrap_or_else(|| rng.gen_range(2..10));
    let mut table = Table::new(players, DeckType::Full)?;
    let hand = table.random_card(2, rng)?;
    table.add_to_hand(HERO, &hand)?;
    if rng.gen_bool(0.66) {
        let n = rng.gen_range(3..5);
        let board = table.random_card(n, rng)?;
        table.add_to_community(&board)?;
    }
    Ok(table)
}

fn print_equity(equity: &Equity) {
    println!("Results:");
    println!("========");
    println!("Win:  {:>6.2}%", equity.win * 100.0);
    println!("Tie:  {:>6.2}%", equity.tie * 100.0);
    println!("Lose: {:>6.2}%", equity.lose * 100.0);
    println!("Pot share: {:>6.2}%", equity.equity() * 100.0);
}
