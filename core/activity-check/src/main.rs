//! activity-check: inspect how a print activity renders on every surface.
//!
//! Reads the fallback store the host app writes, applies an optional pushed
//! snapshot, and prints the resolved surfaces as JSON on stdout.
//!
//! ## Subcommands
//!
//! - `render`: Resolve and render one or all surfaces for an instance
//! - `keys`: Dump the stored values of one instance
//! - `time`: Show the countdown decision for an ETA

mod logging;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use activity_core::{CapabilityTier, HourCycle, LockScreenFamily, Surface};

#[derive(Parser)]
#[command(name = "activity-check")]
#[command(about = "Print job live activity inspector")]
#[command(version)]
struct Cli {
    /// Data directory (default: ~/.print-activity)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render surfaces for one activity instance
    Render {
        /// Activity instance id (store key prefix)
        #[arg(long)]
        instance: String,

        /// Store file to read instead of <root>/store.json
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,

        /// Pushed snapshot as JSON, or @path to read it from a file
        #[arg(long, value_name = "JSON")]
        snapshot: Option<String>,

        /// Surface to render
        #[arg(long, value_enum, default_value_t = SurfaceArg::All)]
        surface: SurfaceArg,

        #[command(flatten)]
        clock: ClockArgs,

        /// Override the configured capability tier
        #[arg(long, value_enum)]
        tier: Option<TierArg>,
    },

    /// Dump stored values for one instance
    Keys {
        #[arg(long)]
        instance: String,

        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,
    },

    /// Countdown decision and text for one ETA
    Time {
        /// ETA in epoch seconds (<= 0 means unknown)
        #[arg(long, allow_hyphen_values = true)]
        eta: i64,

        /// Threshold in hours
        #[arg(long, default_value_t = 3)]
        threshold: i64,

        #[command(flatten)]
        clock: ClockArgs,
    },
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct ClockArgs {
    /// Freeze the clock at this epoch second
    #[arg(long, value_name = "EPOCH")]
    pub now: Option<i64>,

    /// UTC offset in seconds for the frozen clock
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub utc_offset: i32,

    /// Override the hour cycle
    #[arg(long, value_enum)]
    pub hour_cycle: Option<HourCycleArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceArg {
    All,
    LockScreen,
    LockScreenSmall,
    Expanded,
    CompactLeading,
    CompactTrailing,
    Minimal,
}

impl SurfaceArg {
    /// `None` for `all`.
    pub fn surface(self) -> Option<Surface> {
        match self {
            SurfaceArg::All => None,
            SurfaceArg::LockScreen => Some(Surface::LockScreen {
                family: LockScreenFamily::Medium,
            }),
            SurfaceArg::LockScreenSmall => Some(Surface::LockScreen {
                family: LockScreenFamily::Small,
            }),
            SurfaceArg::Expanded => Some(Surface::Expanded),
            SurfaceArg::CompactLeading => Some(Surface::CompactLeading),
            SurfaceArg::CompactTrailing => Some(Surface::CompactTrailing),
            SurfaceArg::Minimal => Some(Surface::Minimal),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierArg {
    Legacy,
    Adaptive,
}

impl From<TierArg> for CapabilityTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Legacy => CapabilityTier::Legacy,
            TierArg::Adaptive => CapabilityTier::AdaptiveLockScreen,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HourCycleArg {
    H11,
    H12,
    H23,
    H24,
}

impl From<HourCycleArg> for HourCycle {
    fn from(cycle: HourCycleArg) -> Self {
        match cycle {
            HourCycleArg::H11 => HourCycle::H11,
            HourCycleArg::H12 => HourCycle::H12,
            HourCycleArg::H23 => HourCycle::H23,
            HourCycleArg::H24 => HourCycle::H24,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let storage = match render::storage(cli.root) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("activity-check: {}", e);
            std::process::exit(1);
        }
    };
    let _logging_guard = logging::init(logging::file_log_dir(&storage).as_deref());

    let result = match cli.command {
        Commands::Render {
            instance,
            store,
            snapshot,
            surface,
            clock,
            tier,
        } => render::run_render(
            &storage,
            render::RenderArgs {
                instance,
                store,
                snapshot,
                surface: surface.surface(),
                clock,
                tier: tier.map(Into::into),
            },
        ),
        Commands::Keys { instance, store } => render::run_keys(&storage, &instance, store),
        Commands::Time {
            eta,
            threshold,
            clock,
        } => render::run_time(&storage, eta, threshold, &clock),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(error = %e, "activity-check failed");
            std::process::exit(1);
        }
    }
}
