//! Byte-buffer mutation engine for a coverage-guided fuzzer: a catalog of
//! independent mutation operators plus a driver that decides how many to
//! apply per round. Mirrors the shape of `fuzzer::mutation` while replacing
//! its emulator-specific plumbing with a standalone, dependency-light core.

pub mod cmp_feedback;
pub mod corpus;
pub mod dict;
pub mod engine;
pub mod input;
pub mod magic;
pub mod mutator;
pub mod random;

pub use cmp_feedback::CmpFeedback;
pub use corpus::{CorpusView, VecCorpus};
pub use dict::Dictionary;
pub use engine::{mangle, MutateCfg};
pub use input::Input;
pub use mutator::{Mutate, MutatorKind};
pub use random::{FastRandOracle, RandomOracle};
