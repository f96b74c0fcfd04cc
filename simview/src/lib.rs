//! Presentation adapters for `simcore`. Everything here consumes
//! finished outcomes; no allocation or scheduling decision is made
//! outside of `simcore`.

pub use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
pub use anyhow::{ensure, Context, Result};
pub use log::{info, warn};
pub use simcore::*;

pub mod report;
pub mod plot;
pub mod rag;
pub mod gantt;
mod run;

pub use run::*;
