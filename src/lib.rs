//! Hawk-Dove visiting experiment.
//!
//! Participants (humans or bots) repeat a two-step round: each one *visits*
//! another participant with a strategy, then *responds* to every visit it
//! received. Both sides of each encounter are scored from a fixed payoff table
//! and a central ledger keeps the auditable earnings history.
//!
//! ## Architecture
//!
//! - [`stage`]: plan of stages and steps, cursor, per-step completion barrier
//! - [`session`]: single-consumer coordinator owning all shared state
//! - [`players`]: participant trait, actor task wrapper, bot and human
//! - [`policy`]: bot decision state machine (NAIVE / REINFORCEMENT)
//! - [`ledger`]: authoritative earnings and visit history
//! - [`save`]: JSON dumps of the ledger and survey answers
pub mod choice;
pub mod event;
pub mod ledger;
pub mod payoff;
pub mod players;
pub mod policy;
pub mod queue;
pub mod save;
pub mod session;
pub mod settings;
pub mod stage;
pub mod strategy;

pub use choice::*;
pub use event::*;
pub use ledger::*;
pub use payoff::*;
pub use players::*;
pub use policy::*;
pub use queue::*;
pub use save::*;
pub use session::*;
pub use settings::*;
pub use stage::*;
pub use strategy::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Signed points earned or lost by a participant.
pub type Earnings = i64;
/// Nonnegative reinforcement weight biasing a random choice.
pub type Weight = f64;
/// One-based index of a repetition of the game block.
pub type Round = usize;
/// Opaque participant identity assigned by the host.
pub type ParticipantId = String;

// ============================================================================
// EXPERIMENT DEFAULTS
// ============================================================================
/// Number of visit/respond rounds.
pub const REPEAT: usize = 25;
/// Fraction of accumulated earnings lost on a timeup.
pub const PERCENT_PENALTY: f64 = 0.1;
/// Flat bonus for participants who rarely timed out.
pub const BASEPAY: Earnings = 100;
/// Initial visit, respond and host weight of a reinforcement bot.
pub const BOT_WEIGHT: Weight = 80.0;
/// Milliseconds allowed for the visit step.
pub const VISIT_TIMEOUT: u64 = 8000;
/// Milliseconds allowed for the respond step.
pub const RESPOND_TIMEOUT: u64 = 10000;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, abandoning session");
            std::process::exit(0);
        }
    });
}
