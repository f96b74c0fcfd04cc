use crate::*;
use std::io;

/// Prints the per-process table of one strategy's pass, followed by its
/// fragmentation total and the leftover block capacities.
pub fn write_allocation<W: Write>(w: &mut W, blocks: &[Units], run: &StrategyRun) -> io::Result<()> {
    let out = &run.outcome;
    writeln!(w, "\n{} Allocation:", run.strategy.name())?;
    for (i, a) in out.assignment.iter().enumerate() {
        match a {
            Some(b) => {
                writeln!(
                    w,
                    "Process {} -> Block {} ({} -> Remaining: {})",
                    i, b, blocks[*b], out.remaining[*b]
                )?;
            },
            None    => {
                writeln!(w, "Process {} -> Not Allocated", i)?;
            }
        }
    }
    writeln!(w, "Total Fragmentation: {}", out.fragmentation)?;
    writeln!(w, "Remaining memory: {:?}", out.remaining)
}

/// Prints the safe sequence, or when and where the search got stuck.
pub fn write_safety<W: Write>(w: &mut W, s: &SafetyOutcome) -> io::Result<()> {
    writeln!(w, "\n\nBanker's Algorithm\n")?;
    writeln!(w, "Available resources: {}", s.initial_available)?;
    match s.deadlock_step() {
        None        => {
            writeln!(w, "\nSafe sequence: {}", s.sequence.iter().join(" -> "))
        },
        Some(step)  => {
            writeln!(w, "\nDeadlock Detected at step: {}", step)?;
            if !s.sequence.is_empty() {
                writeln!(w, "Partial sequence: {}", s.sequence.iter().join(" -> "))?;
            }
            writeln!(w, "Processes in deadlock: {}", s.deadlocked.iter().join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where F: FnOnce(&mut Vec<u8>) -> io::Result<()> {
        let mut buf = vec![];
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn first_fit_table() {
        let blocks = MEMORY_BLOCKS.to_vec();
        let (outcome, _) = Strategy::First.run_timed(&blocks, &PROCESS_REQUESTS);
        let run = StrategyRun {
            strategy:       Strategy::First,
            outcome,
            elapsed_secs:   0.0,
        };
        let text = render(|w| write_allocation(w, &blocks, &run));
        assert!(text.contains("Process 0 -> Block 0 (15 -> Remaining: 5)"));
        assert!(text.contains("Process 2 -> Block 2 (35 -> Remaining: 5)"));
        assert!(text.contains("Process 5 -> Not Allocated"));
        assert!(text.contains("Total Fragmentation: 15"));
        assert!(text.contains("Remaining memory: [5, 5, 5, 20]"));
    }

    #[test]
    fn deadlock_report() {
        let s = ResourceLedger::new(6, &[8, 3, 7], &[2, 1, 1]).unwrap().search();
        let text = render(|w| write_safety(w, &s));
        assert!(text.contains("Available resources: 2"));
        assert!(text.contains("Deadlock Detected at step: 1"));
        assert!(text.contains("Partial sequence: P1"));
        assert!(text.contains("Processes in deadlock: P0, P2"));
        assert!(!text.contains("Safe sequence"));
    }
}
