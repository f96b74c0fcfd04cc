use crate::utils::*;

//---START CLASSROOM INPUTS
// The fixed inputs every run of the simulator starts from. They are
// only ever read through `Scenario::classroom`.
pub const MEMORY_BLOCKS:        [Units; 4]  = [15, 25, 35, 20];
pub const PROCESS_REQUESTS:     [Units; 6]  = [10, 20, 30, 40, 50, 60];
pub const TOTAL_RESOURCES:      Units       = 20;
pub const MAX_NEED:             [Units; 10] = [7, 5, 3, 9, 4, 6, 10, 4, 3, 8];
pub const CURRENTLY_HOLDING:    [Units; 10] = [0, 1, 2, 3, 1, 2, 4, 0, 1, 3];
//---END CLASSROOM INPUTS

/// Block capacities plus the requests to be fitted into them.
///
/// A successfully returned [`Workload`] is guaranteed to have at least
/// one block and one process, and no zero-sized entry in either list.
/// This is the gatekeeper in front of the fitting strategies, which
/// themselves accept anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Workload {
    blocks: Vec<Units>,
    procs:  Vec<Units>,
}

impl Workload {
    pub fn new(blocks: Vec<Units>, procs: Vec<Units>) -> Result<Self, InputError> {
        if blocks.is_empty() {
            return Err(InputError::NoBlocks);
        } else if procs.is_empty() {
            return Err(InputError::NoProcesses);
        }
        if let Some(block) = blocks.iter().position(|&b| b == 0) {
            return Err(InputError::ZeroBlock { block });
        }
        if let Some(p) = procs.iter().position(|&s| s == 0) {
            return Err(InputError::ZeroRequest { process: ProcessId(p) });
        }

        Ok(Self { blocks, procs })
    }

    pub fn blocks(&self) -> &[Units] {
        &self.blocks
    }

    pub fn procs(&self) -> &[Units] {
        &self.procs
    }

    pub fn run(&self, s: Strategy) -> AllocOutcome {
        s.run(&self.blocks, &self.procs)
    }

    pub fn run_timed(&self, s: Strategy) -> (AllocOutcome, Duration) {
        s.run_timed(&self.blocks, &self.procs)
    }
}

/// Everything one simulation run needs. Built once by the driver,
/// handed over to the computations and dropped afterwards.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub workload:   Workload,
    pub ledger:     ResourceLedger,
}

impl Scenario {
    pub fn new(workload: Workload, ledger: ResourceLedger) -> Self {
        Self { workload, ledger }
    }

    /// The textbook example: four blocks, six requests, and ten
    /// processes sharing twenty units.
    pub fn classroom() -> Result<Self, InputError> {
        let workload = Workload::new(MEMORY_BLOCKS.to_vec(), PROCESS_REQUESTS.to_vec())?;
        let ledger = ResourceLedger::new(TOTAL_RESOURCES, &MAX_NEED, &CURRENTLY_HOLDING)?;

        Ok(Self::new(workload, ledger))
    }
}
