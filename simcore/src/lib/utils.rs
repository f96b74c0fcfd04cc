pub use std::{
    fmt,
    hash::BuildHasherDefault,
    time::{Duration, Instant},
};
pub use ahash::AHasher;
pub use indexmap::IndexMap;
pub use itertools::Itertools;
pub use log::{debug, trace};
pub use serde::Serialize;
pub use thiserror::Error;

pub use crate::{
    fit::*,
    banker::*,
    scenario::*,
    utils::myerrors::InputError,
};

/// The unit for measuring both memory capacity and banker resources.
/// The simulator does not care about semantics (bytes, pages, tape
/// drives...), only about the arithmetic.
pub type Units = usize;

/// Index of a memory block within the list a run started from. Block
/// indices are stable for the whole run, even as capacities shrink.
pub type BlockId = usize;

/// Identifies a process by its position in the input lists.
///
/// Both halves of the simulator number processes from zero, and the
/// [`Display`](fmt::Display) form is `P0`, `P1`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

pub mod myerrors {
    use super::{BlockId, ProcessId, Units};
    use thiserror::Error;

    /// Appears while validating the literal inputs of a run. Every
    /// variant names the offending entry so that the driver can
    /// bail out with a useful message.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum InputError {
        #[error("No memory blocks given!")]
        NoBlocks,
        #[error("No processes given!")]
        NoProcesses,
        #[error("Block {block} has zero capacity!")]
        ZeroBlock { block: BlockId },
        #[error("{process} requests zero units!")]
        ZeroRequest { process: ProcessId },
        #[error("Ledger lists disagree: {max_need} max-need entries vs. {holding} holding entries")]
        LengthMismatch { max_need: usize, holding: usize },
        #[error("{process} holds {holding} units but claims at most {max_need}")]
        HoldingExceedsClaim {
            process:    ProcessId,
            holding:    Units,
            max_need:   Units,
        },
        #[error("Processes hold {held} units, more than the {total} in the system")]
        Overcommitted { total: Units, held: Units },
        #[error("Available units plus holdings do not fit in {} bits", Units::BITS)]
        UnitsOverflow,
    }
}
