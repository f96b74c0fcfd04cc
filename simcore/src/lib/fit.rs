use crate::utils::*;

/// What a single pass of a fitting strategy produces.
///
/// - [`assignment`](AllocOutcome::assignment) has one entry per process,
/// in input order: the block it landed in, or `None` if no block could
/// hold it at the time it was tried.
///
/// - [`remaining`](AllocOutcome::remaining) is the block list after the
/// pass. Untouched blocks keep their capacity, chosen ones have shrunk
/// by the sizes placed in them.
///
/// - [`fragmentation`](AllocOutcome::fragmentation) sums, over every
/// successful placement, what was left of the chosen block right after
/// the process went in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocOutcome {
    pub assignment:     Vec<Option<BlockId>>,
    pub remaining:      Vec<Units>,
    pub fragmentation:  Units,
}

impl AllocOutcome {
    /// Returns `true` if process `p` got a block.
    pub fn is_allocated(&self, p: ProcessId) -> bool {
        matches!(self.assignment.get(p.0), Some(Some(_)))
    }

    /// Processes that found no block, in input order.
    pub fn unallocated(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| ProcessId(i))
    }

    /// Total size of the requests that were served. `procs` must be the
    /// same request list the outcome was computed from.
    pub fn allocated_units(&self, procs: &[Units]) -> Units {
        self.assignment
            .iter()
            .zip(procs)
            .filter(|(a, _)| a.is_some())
            .map(|(_, s)| *s)
            .sum()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Strategy {
    /// Lowest-indexed block that fits.
    First,
    /// Block that leaves the least behind.
    Best,
    /// Block that leaves the most behind.
    Worst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::First, Strategy::Best, Strategy::Worst];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::First => { "First Fit" },
            Strategy::Best  => { "Best Fit" },
            Strategy::Worst => { "Worst Fit" },
        }
    }

    pub fn run(&self, blocks: &[Units], procs: &[Units]) -> AllocOutcome {
        match self {
            Strategy::First => { first_fit(blocks, procs) },
            Strategy::Best  => { best_fit(blocks, procs) },
            Strategy::Worst => { worst_fit(blocks, procs) },
        }
    }

    /// Same as [`run`](Strategy::run), but also reports how long the
    /// pass took. Used for comparing strategies side by side.
    pub fn run_timed(&self, blocks: &[Units], procs: &[Units]) -> (AllocOutcome, Duration) {
        let start = Instant::now();
        let res = self.run(blocks, procs);

        (res, start.elapsed())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn first_fit(blocks: &[Units], procs: &[Units]) -> AllocOutcome {
    fit_with(blocks, procs, |mem, size| {
        mem.iter().position(|&b| b >= size)
    })
}

pub fn best_fit(blocks: &[Units], procs: &[Units]) -> AllocOutcome {
    fit_with(blocks, procs, |mem, size| {
        // Strict comparison: on ties the earliest block stays.
        pick_by_leftover(mem, size, |left, min_left| left < min_left)
    })
}

pub fn worst_fit(blocks: &[Units], procs: &[Units]) -> AllocOutcome {
    fit_with(blocks, procs, |mem, size| {
        pick_by_leftover(mem, size, |left, max_left| left > max_left)
    })
}

/// Scans all blocks that can hold `size` and keeps the one whose
/// leftover `beats` the best seen so far.
fn pick_by_leftover<F>(mem: &[Units], size: Units, beats: F) -> Option<BlockId>
where F: Fn(Units, Units) -> bool {
    let mut winner: Option<(BlockId, Units)> = None;
    for (j, &b) in mem.iter().enumerate() {
        if b < size { continue; }
        let left = b - size;
        match winner {
            Some((_, best_left)) if !beats(left, best_left) => {},
            _   => { winner = Some((j, left)); }
        }
    }

    winner.map(|(j, _)| j)
}

/// The loop all three strategies share. Processes are tried exactly
/// once, in input order, against a private copy of `blocks`.
fn fit_with<F>(blocks: &[Units], procs: &[Units], pick: F) -> AllocOutcome
where F: Fn(&[Units], Units) -> Option<BlockId> {
    let mut mem = blocks.to_vec();
    let mut assignment = Vec::with_capacity(procs.len());
    let mut fragmentation = 0;

    for (i, &size) in procs.iter().enumerate() {
        match pick(&mem, size) {
            Some(j) => {
                let left = mem[j] - size;
                trace!("{} ({} units) -> block {} ({} -> {})", ProcessId(i), size, j, mem[j], left);
                fragmentation += left;
                mem[j] = left;
                assignment.push(Some(j));
            },
            None    => {
                trace!("{} ({} units) fits nowhere", ProcessId(i), size);
                assignment.push(None);
            }
        }
    }

    AllocOutcome {
        assignment,
        remaining: mem,
        fragmentation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_fit_keeps_earliest_on_ties() {
        // Blocks 1 and 3 both leave 2 behind.
        let out = best_fit(&[3, 7, 20, 7], &[5]);
        assert_eq!(out.assignment, vec![Some(1)]);
    }

    #[test]
    fn worst_fit_keeps_earliest_on_ties() {
        let out = worst_fit(&[12, 4, 12], &[2]);
        assert_eq!(out.assignment, vec![Some(0)]);
        assert_eq!(out.remaining, vec![10, 4, 12]);
    }

    #[test]
    fn exact_fit_leaves_no_fragmentation() {
        for s in Strategy::ALL {
            let out = s.run(&[8], &[8]);
            assert_eq!(out.assignment, vec![Some(0)]);
            assert_eq!(out.remaining, vec![0]);
            assert_eq!(out.fragmentation, 0);
        }
    }

    #[test]
    fn shrunk_block_is_reused() {
        // The second request fits in what's left of block 0.
        let out = first_fit(&[30, 10], &[10, 15]);
        assert_eq!(out.assignment, vec![Some(0), Some(0)]);
        assert_eq!(out.remaining, vec![5, 10]);
        assert_eq!(out.fragmentation, 20 + 5);
    }

    #[test]
    fn empty_inputs_are_total() {
        let out = worst_fit(&[], &[4, 2]);
        assert_eq!(out.assignment, vec![None, None]);
        assert!(out.remaining.is_empty());
        assert_eq!(out.unallocated().collect::<Vec<_>>(), vec![ProcessId(0), ProcessId(1)]);
    }
}
