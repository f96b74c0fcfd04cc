use crate::*;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

/// Presentation knobs. The scenario's inputs are deliberately not
/// among them: those are fixed by [`Scenario::classroom`].
#[derive(Clone, Debug)]
pub struct Config {
    pub out_dir:    PathBuf,
    pub plots:      bool,
    pub seed:       u64,
    pub json:       Option<PathBuf>,
    pub strategies: Vec<Strategy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir:    PathBuf::from("sim-out"),
            plots:      true,
            seed:       42,
            json:       None,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct StrategyRun {
    pub strategy:       Strategy,
    pub outcome:        AllocOutcome,
    pub elapsed_secs:   f64,
}

/// Everything the adapters get to see, computed up front.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub blocks:     Vec<Units>,
    pub procs:      Vec<Units>,
    pub strategies: Vec<StrategyRun>,
    pub safety:     SafetyOutcome,
}

/// The compute stage. Runs each requested strategy on a fresh copy of
/// the blocks, then the safety search.
pub fn compute(scenario: Scenario, strategies: &[Strategy]) -> RunSummary {
    let Scenario { workload, ledger } = scenario;
    let strategies = strategies.iter()
        .map(|&s| {
            let (outcome, elapsed) = workload.run_timed(s);
            info!(
                "{}: {} of {} processes placed, fragmentation {}",
                s,
                outcome.assignment.iter().filter(|a| a.is_some()).count(),
                workload.procs().len(),
                outcome.fragmentation
            );
            StrategyRun {
                strategy:       s,
                outcome,
                elapsed_secs:   elapsed.as_secs_f64(),
            }
        })
        .collect();

    let safety = ledger.search();
    if safety.is_safe() {
        info!("Safe sequence found for {} processes", safety.sequence.len());
    } else {
        warn!("Safety search stalled with {} processes stuck", safety.deadlocked.len());
    }

    RunSummary {
        blocks:     workload.blocks().to_vec(),
        procs:      workload.procs().to_vec(),
        strategies,
        safety,
    }
}

/// Single entry point: compute, then report to `out`, then render
/// whatever `cfg` asks for.
pub fn run<W: Write>(scenario: Scenario, cfg: &Config, out: &mut W) -> Result<RunSummary> {
    let summary = compute(scenario, &cfg.strategies);

    for r in &summary.strategies {
        report::write_allocation(out, &summary.blocks, r)?;
    }

    if cfg.plots {
        create_dir_all(&cfg.out_dir)
            .with_context(|| format!("Could not create {}", cfg.out_dir.display()))?;
        let cmp_path = cfg.out_dir.join("comparison.png");
        plot::draw_comparison(&cmp_path, &summary.strategies)
            .with_context(|| format!("Could not draw {}", cmp_path.display()))?;
        info!("Wrote {}", cmp_path.display());

        let mut rng = StdRng::seed_from_u64(cfg.seed);
        for r in &summary.strategies {
            let graph = rag::AllocationGraph::build(&r.outcome, summary.blocks.len(), &mut rng);
            let rag_path = cfg.out_dir.join(format!("rag_{}.png", file_stem(r.strategy)));
            rag::draw(&rag_path, r.strategy, &graph)
                .with_context(|| format!("Could not draw {}", rag_path.display()))?;
            info!("Wrote {}", rag_path.display());
        }
    }

    report::write_safety(out, &summary.safety)?;

    if cfg.plots && summary.safety.is_safe() {
        let gantt_path = cfg.out_dir.join("safe_sequence.png");
        gantt::draw(&gantt_path, &summary.safety)
            .with_context(|| format!("Could not draw {}", gantt_path.display()))?;
        info!("Wrote {}", gantt_path.display());
    }

    if let Some(p) = &cfg.json {
        let f = File::create(p)
            .with_context(|| format!("Could not create {}", p.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), &summary)?;
        info!("Wrote {}", p.display());
    }

    Ok(summary)
}

pub fn file_stem(s: Strategy) -> &'static str {
    match s {
        Strategy::First => { "first_fit" },
        Strategy::Best  => { "best_fit" },
        Strategy::Worst => { "worst_fit" },
    }
}
