//! Runs one experiment session in this process.
//!
//! Fills the room with bots, optionally seats one terminal participant
//! (`--human`, requires the `cli` feature), and writes the ledger and
//! survey answers under `--out`.

use clap::Parser;
use hawkdove::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Run a Hawk-Dove visiting session", long_about = None)]
struct Args {
    /// Settings JSON (REPEAT, PAYOFFS, BOT_STRATEGY, ...). Defaults otherwise.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of bots in the room.
    #[arg(long, default_value_t = 6)]
    bots: usize,
    /// Seat one terminal participant next to the bots.
    #[arg(long)]
    human: bool,
    /// Seed for every random decision of the session.
    #[arg(long)]
    seed: Option<u64>,
    /// Directory receiving the ledger dump and surveys.
    #[arg(long, default_value = "experiments")]
    out: PathBuf,
    /// Override REPEAT.
    #[arg(long)]
    repeat: Option<usize>,
    /// Override BOT_STRATEGY (NAIVE or REINFORCEMENT).
    #[arg(long)]
    strategy: Option<String>,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match self.settings {
            Some(ref path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(repeat) = self.repeat {
            settings.repeat = repeat;
        }
        if let Some(ref strategy) = self.strategy {
            settings.bot_strategy = BotStrategy::try_from(strategy.as_str())?;
        }
        if self.human {
            settings.simulation = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let args = Args::parse();
    let settings = args.settings()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("[simulate] seed {}", seed);
    let archive = Archive::new(&args.out, &settings);
    let mut session = Session::new(settings.clone(), seed)?.with_archive(archive);
    for i in 0..args.bots {
        let id = format!("bot{}", i + 1);
        let policy = BotPolicy::new(id.clone(), &settings);
        session.sit(&id, Bot::new(policy, seed.wrapping_add(i as u64 + 1)), ClientType::Bot);
    }
    if !settings.simulation {
        seat(&mut session, seed)?;
    }
    let ledger = session.run().await;
    for (id, record) in ledger.records() {
        log::info!(
            "[simulate] {:<8} total {:>6} base {:>4} timeups {:>2}",
            id,
            record.total_earnings,
            record.basepay,
            record.timeups
        );
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn seat(session: &mut Session, seed: u64) -> anyhow::Result<()> {
    session.sit("human", Human::new("human".into(), seed), ClientType::Human);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn seat(_: &mut Session, _: u64) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("--human requires the cli feature"))
}
