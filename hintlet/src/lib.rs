//! Drive an external autohinter over checked-in font fixtures and diff the
//! results.

mod differ;
mod discover;
mod dump;
mod engine;
mod error;
mod options;
mod runner;

pub use differ::{Differ, UnifiedDiffer};
pub use discover::{discover, Fixture, FontKind};
pub use dump::{CffDump, TtxDump};
pub use engine::{CommandEngine, HintEngine};
pub use error::HarnessError;
pub use options::HintOptions;
pub use runner::run_case;
