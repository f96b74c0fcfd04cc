use simview::*;
use clap::{Parser, ValueEnum};

/// Simulates first/best/worst-fit placement and a Banker's-style
/// safety check on a fixed classroom scenario.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory for rendered charts
    #[arg(short, long, default_value = "sim-out", value_parser = clap::value_parser!(PathBuf))]
    out:        PathBuf,

    /// Print to the console only
    #[arg(long)]
    no_plots:   bool,

    /// Seed for the block each unplaced process is drawn requesting
    #[arg(short, long, default_value_t = 42)]
    seed:       u64,

    /// Also dump every outcome as JSON
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    json:       Option<PathBuf>,

    /// Fitting strategy to run (repeatable, defaults to all three)
    #[arg(long, value_enum)]
    strategy:   Vec<FitArg>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum FitArg {
    /// First fit
    First,
    /// Best fit
    Best,
    /// Worst fit
    Worst,
}

impl From<FitArg> for Strategy {
    fn from(f: FitArg) -> Self {
        match f {
            FitArg::First   => { Strategy::First },
            FitArg::Best    => { Strategy::Best },
            FitArg::Worst   => { Strategy::Worst },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Args::parse();

    let strategies: Vec<Strategy> = if cli.strategy.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        cli.strategy
            .into_iter()
            .map(Strategy::from)
            .unique()
            .collect()
    };
    let cfg = Config {
        out_dir:    cli.out,
        plots:      !cli.no_plots,
        seed:       cli.seed,
        json:       cli.json,
        strategies,
    };

    let scenario = Scenario::classroom().context("Bad classroom scenario")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(scenario, &cfg, &mut out)?;

    Ok(())
}
