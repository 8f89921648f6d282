mod terminal;
mod write;

use blackjack_lib::{BlackjackGame, BlackjackGameError, TableRules, TableRulesBuilder};
use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use terminal::ConsoleInterface;

/// Play blackjack against the dealer from the terminal.
#[derive(Parser, Debug)]
#[command(name = "blackjack", version, about)]
struct Cli {
    /// JSON file with the table rules, missing fields take their defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Starting bankroll
    #[arg(long)]
    bankroll: Option<u32>,

    /// Smallest bet the table accepts
    #[arg(long)]
    min_bet: Option<u32>,

    /// Largest bet the table accepts
    #[arg(long)]
    max_bet: Option<u32>,

    /// Number of decks in the shoe
    #[arg(long)]
    decks: Option<usize>,

    /// Seed for the shuffle, a random seed is used when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON summary of the session to this file when it ends
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    /// Loads the rules file if one was given and applies the command line overrides on top of it.
    fn table_rules(&self) -> Result<TableRules, BlackjackGameError> {
        let base = match &self.rules {
            Some(path) => TableRules::from_json_file(path)?,
            None => TableRules::default(),
        };

        let mut builder = TableRulesBuilder::from_rules(base);
        if let Some(bankroll) = self.bankroll {
            builder.starting_bankroll(bankroll);
        }
        if let Some(min_bet) = self.min_bet {
            builder.min_bet(min_bet);
        }
        if let Some(max_bet) = self.max_bet {
            builder.max_bet(max_bet);
        }
        if let Some(decks) = self.decks {
            builder.num_decks(decks);
        }

        let rules = builder.build();
        rules.validate()?;
        Ok(rules)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let rules = match cli.table_rules() {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    info!("playing with {:?}", rules);

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    println!("Welcome to Blackjack!");
    println!(
        "Bankroll: {}  Bets: {}-{}  Decks: {}",
        rules.starting_bankroll, rules.min_bet, rules.max_bet, rules.num_decks
    );

    let interface = ConsoleInterface::new(io::stdin().lock(), io::stdout());
    let mut game = BlackjackGame::new(rules, rng, interface);
    let summary = match game.run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("\n{}", summary);

    if let Some(path) = &cli.summary {
        if let Err(e) = write::write_summary_file(path, &summary, &rules, cli.seed) {
            eprintln!("error: could not write summary to {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}
