//! The `mangle` driver: decides how many operators to apply to one input
//! and runs them in sequence, mirroring the stacking/one-shot-per-call shape
//! of the teacher's `Fuzzer::run_mutations` call site.

use std::{
    sync::atomic::{fence, Ordering},
    time::Duration,
};

use common::config::mutation::{CHANGES_SLOW_3_4, CHANGES_SLOW_5_9, CHANGES_SLOW_OTHER};

use crate::{
    cmp_feedback::CmpFeedback,
    corpus::CorpusView,
    input::Input,
    mutator::{self, MutateCtx, MutatorKind},
    random::RandomOracle,
};

const COVERAGE_STAGNATION: Duration = Duration::from_millis(common::config::mutation::COVERAGE_STAGNATION_MILLIS);

/// Global mutation context, immutable for the duration of one `mangle` call.
/// Mirrors the distilled spec's `MutateCfg` data model, plus the borrowed
/// collaborator handles that back its `dictionary[]`/`cmp_feedback_enabled`
/// fields in this crate.
pub struct MutateCfg<'a> {
    /// Baseline number of operator applications; `mangle` returns
    /// immediately without touching the buffer when this is 0.
    pub mutations_per_run: usize,
    pub only_printable: bool,
    pub dictionary: &'a [Vec<u8>],
    /// Whether the comparison-feedback dictionary is consulted at all;
    /// `ConstFeedback{Overwrite,Insert}` fall back to `Bytes{...}` when
    /// `false`, the same as when `cmp_feedback` is absent or empty.
    pub cmp_feedback_enabled: bool,
    pub cmp_feedback: Option<&'a CmpFeedback>,
    pub corpus: Option<&'a dyn CorpusView>,
    /// Elapsed time since coverage last improved. Past
    /// [`common::config::mutation::COVERAGE_STAGNATION_MILLIS`], `mangle`
    /// spends one extra application on a splice (or nothing) to try to
    /// escape the plateau.
    pub time_since_last_coverage: Duration,
}

/// Bands `slow_factor` into a change count, floored (not replaced) by
/// `mutations_per_run` outside the low band — a wedged target should never
/// get *fewer* mutations than its own baseline asks for.
fn changes_for_slow_factor(rng: &mut dyn RandomOracle, mutations_per_run: usize, slow_factor: u32) -> usize {
    match slow_factor {
        0..=2 => rng.rand(1, mutations_per_run),
        3..=4 => mutations_per_run.max(CHANGES_SLOW_3_4),
        5..=9 => mutations_per_run.max(CHANGES_SLOW_5_9),
        _ => mutations_per_run.max(CHANGES_SLOW_OTHER),
    }
}

/// Mutates `input` in place per the driver steps:
///
/// 1. `mutations_per_run == 0` → no-op.
/// 2. An empty input is resized first so later operators have something to
///    work with.
/// 3. `changes` is derived from `slow_factor`.
/// 4. On coverage stagnation, one extra splice (or nothing) is injected.
/// 5. `changes` operators are drawn from the full weighted catalog and
///    applied in sequence.
/// 6. A write memory barrier publishes the buffer to other threads.
pub fn mangle(input: &mut Input, rng: &mut dyn RandomOracle, cfg: &MutateCfg, slow_factor: u32) {
    if cfg.mutations_per_run == 0 {
        return;
    }

    let mut ctx = MutateCtx {
        rng,
        only_printable: cfg.only_printable,
        dictionary: cfg.dictionary,
        cmp_feedback: cfg.cmp_feedback_enabled.then_some(cfg.cmp_feedback).flatten(),
        corpus: cfg.corpus,
    };

    if input.size() == 0 {
        mutator::Mutate::mutate(&mutator::create(MutatorKind::Resize), input, &mut ctx);
    }

    let changes = changes_for_slow_factor(ctx.rng, cfg.mutations_per_run, slow_factor);

    if cfg.time_since_last_coverage >= COVERAGE_STAGNATION {
        let kind = match ctx.rng.rand(0, 2) {
            0 => Some(MutatorKind::SpliceOverwrite),
            1 => Some(MutatorKind::SpliceInsert),
            _ => None,
        };
        if let Some(kind) = kind {
            log::trace!("mangle: stagnation splice {kind:?}");
            mutator::Mutate::mutate(&mutator::create(kind), input, &mut ctx);
        }
    }

    for _ in 0..changes {
        let kind = mutator::random_kind();
        log::trace!("mangle: applying {kind:?}");
        mutator::Mutate::mutate(&mutator::create(kind), input, &mut ctx);
    }

    fence(Ordering::Release);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{corpus::VecCorpus, random::FastRandOracle};

    fn cfg(dictionary: &[Vec<u8>], mutations_per_run: usize) -> MutateCfg {
        MutateCfg {
            mutations_per_run,
            only_printable: false,
            dictionary,
            cmp_feedback_enabled: false,
            cmp_feedback: None,
            corpus: None,
            time_since_last_coverage: Duration::from_millis(0),
        }
    }

    #[test]
    fn zero_mutations_per_run_leaves_buffer_untouched() {
        fastrand::seed(42);
        let mut input = Input::from_bytes(vec![1, 2, 3, 4], 16);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        let before = input.as_slice().to_vec();

        mangle(&mut input, &mut oracle, &cfg(&dict, 0), 3);

        assert_eq!(input.as_slice(), before.as_slice());
    }

    #[test]
    fn empty_input_triggers_resize_scenario_a() {
        fastrand::seed(0);
        let mut input = Input::new(64);
        assert_eq!(input.size(), 0);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        let mut printable_cfg = cfg(&dict, 1);
        printable_cfg.only_printable = true;

        mangle(&mut input, &mut oracle, &printable_cfg, 0);

        assert!(input.size() > 0);
        assert!(input.size() <= input.max_size());
    }

    #[test]
    fn mangle_applies_at_least_one_operator_for_low_slow_factor() {
        fastrand::seed(7);
        let mut input = Input::from_bytes(vec![10, 20, 30, 40, 50], 64);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        mangle(&mut input, &mut oracle, &cfg(&dict, 1), 1);
        assert!(input.size() >= 1 && input.size() <= input.max_size());
    }

    #[test]
    fn high_slow_factor_floors_change_count() {
        let mut oracle = FastRandOracle;
        assert_eq!(
            CHANGES_SLOW_OTHER,
            changes_for_slow_factor(&mut oracle, 1, 50)
        );
    }

    #[test]
    fn mid_slow_factor_respects_higher_baseline() {
        let mut oracle = FastRandOracle;
        assert_eq!(20, changes_for_slow_factor(&mut oracle, 20, 3));
    }

    #[test]
    fn stagnation_may_inject_a_splice_when_corpus_present() {
        fastrand::seed(13);
        let mut input = Input::from_bytes(b"seed".to_vec(), 64);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        let corpus = VecCorpus(vec![b"other-sample-bytes".to_vec()]);
        let mut stagnant_cfg = cfg(&dict, 1);
        stagnant_cfg.corpus = Some(&corpus);
        stagnant_cfg.time_since_last_coverage = Duration::from_secs(5);

        mangle(&mut input, &mut oracle, &stagnant_cfg, 1);
        assert!(input.size() >= 1 && input.size() <= input.max_size());
    }
}
