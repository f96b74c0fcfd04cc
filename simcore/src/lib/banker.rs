use crate::utils::*;

/// Processes still waiting to be sequenced, in original relative order.
///
/// Removal goes through `shift_remove`, so the ordering of whatever is
/// left never changes. The search relies on that: it always restarts
/// its scan from the front.
pub type LedgerMap = IndexMap<ProcessId, Claim, BuildHasherDefault<AHasher>>;

/// What one process declared up front and what it sits on right now.
/// Keeping both in one record means they can only ever leave the ledger
/// together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Claim {
    pub max_need:   Units,
    pub holding:    Units,
}

impl Claim {
    /// Units still missing before the process can run to completion.
    pub fn need(&self) -> Units {
        self.max_need.saturating_sub(self.holding)
    }

    /// Can the process finish with what is free plus what it holds?
    pub fn admits(&self, available: Units) -> bool {
        self.need() <= available
    }
}

/// The bookkeeping for a single pool of identical resource units.
///
/// A successfully returned ledger is guaranteed to be well-formed:
/// - both input lists have the same, non-zero length
/// - no process holds more than it claims
/// - `available` is what's left after every holding has been taken out
/// - `available` plus every holding fits in [`Units`], so releasing
///   holdings back into the pool never overflows
#[derive(Clone, Debug)]
pub struct ResourceLedger {
    available:  Units,
    remaining:  LedgerMap,
}

impl ResourceLedger {
    /// Starts from the `total` number of units in the system and takes
    /// every process' current holding out of it.
    pub fn new(total: Units, max_need: &[Units], holding: &[Units]) -> Result<Self, InputError> {
        let held = total_held(holding)?;
        let available = total
            .checked_sub(held)
            .ok_or(InputError::Overcommitted { total, held })?;

        Self::with_available(available, max_need, holding)
    }

    /// Like [`new`](ResourceLedger::new), but `available` has already
    /// been reduced by the holdings.
    pub fn with_available(
        available:  Units,
        max_need:   &[Units],
        holding:    &[Units],
    ) -> Result<Self, InputError> {
        if max_need.len() != holding.len() {
            return Err(InputError::LengthMismatch {
                max_need:   max_need.len(),
                holding:    holding.len(),
            });
        } else if max_need.is_empty() {
            return Err(InputError::NoProcesses);
        }

        available
            .checked_add(total_held(holding)?)
            .ok_or(InputError::UnitsOverflow)?;

        let mut remaining = LedgerMap::default();
        for (i, (&m, &h)) in max_need.iter().zip(holding).enumerate() {
            let process = ProcessId(i);
            if h > m {
                return Err(InputError::HoldingExceedsClaim {
                    process,
                    holding:    h,
                    max_need:   m,
                });
            }
            remaining.insert(process, Claim { max_need: m, holding: h });
        }

        Ok(Self {
            available,
            remaining,
        })
    }

    pub fn available(&self) -> Units {
        self.available
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Sequences processes one at a time until either none is left or
    /// none of the rest can finish.
    ///
    /// Each round scans from the *front* of the remaining processes and
    /// takes the first one that [admits](Claim::admits) the current pool.
    /// Its holding goes back to the pool and the scan starts over. An
    /// earlier process that was stuck may thus be picked right after a
    /// later one frees enough units, ahead of any other later process.
    pub fn search(mut self) -> SafetyOutcome {
        let initial_available = self.available;
        let mut steps: Vec<SafetyStep> = vec![];

        loop {
            let available = self.available;
            let Some(idx) = self.remaining
                .values()
                .position(|c| c.admits(available)) else { break };
            let Some((process, claim)) = self.remaining.shift_remove_index(idx) else { break };
            // Cannot overflow: bounded by the sum checked at construction.
            self.available += claim.holding;
            debug!(
                "Step {}: {} releases {} units, {} now available ({} left)",
                steps.len(),
                process,
                claim.holding,
                self.available,
                self.remaining.len()
            );
            steps.push(SafetyStep {
                process,
                released:           claim.holding,
                remaining_after:    self.remaining.len(),
                available_after:    self.available,
            });
        }

        let deadlocked: Vec<ProcessId> = self.remaining
            .keys()
            .copied()
            .collect();
        if !deadlocked.is_empty() {
            debug!(
                "No progress after {} steps, stuck: {}",
                steps.len(),
                deadlocked.iter().join(", ")
            );
        }

        SafetyOutcome {
            initial_available,
            sequence:           steps.iter().map(|s| s.process).collect(),
            steps,
            deadlocked,
            final_available:    self.available,
        }
    }
}

/// One successful round of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SafetyStep {
    pub process:            ProcessId,
    pub released:           Units,
    pub available_after:    Units,
    /// Processes still unsequenced once this step is done.
    pub remaining_after:    usize,
}

/// Either a complete safe sequence (`deadlocked` is empty) or the
/// partial progress made before the search stalled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SafetyOutcome {
    pub initial_available:  Units,
    /// Processes in the order they were sequenced.
    pub sequence:           Vec<ProcessId>,
    pub steps:              Vec<SafetyStep>,
    /// Processes that never became satisfiable, in original order.
    pub deadlocked:         Vec<ProcessId>,
    pub final_available:    Units,
}

impl SafetyOutcome {
    pub fn is_safe(&self) -> bool {
        self.deadlocked.is_empty()
    }

    /// Number of processes sequenced before the search stalled, or
    /// `None` if it never did.
    pub fn deadlock_step(&self) -> Option<usize> {
        if self.is_safe() { None }
        else { Some(self.sequence.len()) }
    }
}

fn total_held(holding: &[Units]) -> Result<Units, InputError> {
    holding
        .iter()
        .try_fold(0 as Units, |acc, &h| acc.checked_add(h))
        .ok_or(InputError::UnitsOverflow)
}

/// Runs the search over lists whose `available` value has already
/// been reduced by the holdings.
pub fn find_safe_sequence(
    available:  Units,
    max_need:   &[Units],
    holding:    &[Units],
) -> Result<SafetyOutcome, InputError> {
    Ok(ResourceLedger::with_available(available, max_need, holding)?.search())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_restarts_from_front() {
        // P0 is stuck until P1 releases; P2 is satisfiable from the
        // start. A forward pass would give P1, P2, P0. Restarting
        // goes back to P0 first.
        let out = find_safe_sequence(2, &[4, 3, 1], &[0, 2, 0]).unwrap();
        assert_eq!(out.sequence, vec![ProcessId(1), ProcessId(0), ProcessId(2)]);
    }

    #[test]
    fn stuck_processes_keep_their_order() {
        let out = find_safe_sequence(1, &[9, 2, 8, 1], &[0, 1, 2, 0]).unwrap();
        assert_eq!(out.sequence, vec![ProcessId(1), ProcessId(3)]);
        assert_eq!(out.deadlocked, vec![ProcessId(0), ProcessId(2)]);
        assert_eq!(out.deadlock_step(), Some(2));
        assert_eq!(out.final_available, 2);
    }

    #[test]
    fn need_is_claim_minus_holding() {
        let c = Claim { max_need: 7, holding: 3 };
        assert_eq!(c.need(), 4);
        assert!(c.admits(4));
        assert!(!c.admits(3));
    }

    #[test]
    fn admits_near_the_top_of_the_range() {
        let c = Claim { max_need: 5, holding: 1 };
        assert!(c.admits(Units::MAX));
        let c = Claim { max_need: Units::MAX, holding: Units::MAX - 1 };
        assert!(c.admits(1));
        assert!(!c.admits(0));
    }
}
