//! The operator catalog: ~30 independent mutations over an [`Input`],
//! modeled as an `enum_dispatch` tagged-variant enum the way
//! `fuzzer::mutation::Mutator` models its own operator catalog.
//!
//! Each operator draws whatever randomness it needs and applies itself in
//! one shot — no separate "create" phase — mirroring the one-function-per-
//! operator shape of honggfuzz's `mangle_*` routines.

use common::config::mutation::{
    ADDSUB_RANGE_U16, ADDSUB_RANGE_U32, ADDSUB_RANGE_U64, ADDSUB_RANGE_U8, ASCII_NUM_FIELD_WIDTH,
    ASCII_NUM_WRITE_LEN, BYTES_LEN, EXPAND_SMALL_MAX, MAX_BLOCK, RESIZE_ARBITRARY,
    RESIZE_LARGE_DELTA, RESIZE_LARGE_GROW, RESIZE_LARGE_SHRINK, RESIZE_OUTCOMES,
    RESIZE_SMALL_DELTA, RESIZE_SMALL_GROW, RESIZE_SMALL_SHRINK, SHRINK_MULTIPLICITY,
    SMALL_LENGTH_CHANCE_DENOM,
};
use common::random::FastRand;
use enum_dispatch::enum_dispatch;
use enum_index::IndexEnum;
use enum_index_derive::IndexEnum;
use enum_kinds::EnumKind;
use once_cell::sync::OnceCell;
use rand_distr::{Distribution, WeightedAliasIndex};
use variant_count::VariantCount;

use crate::{
    cmp_feedback::CmpFeedback, corpus::CorpusView, input::canonicalize_printable, input::Input, magic,
    random::RandomOracle,
};

/// Everything an operator needs besides the buffer it mutates. Borrowed for
/// the duration of a single `Mutate::mutate` call.
pub struct MutateCtx<'a> {
    pub rng: &'a mut dyn RandomOracle,
    pub only_printable: bool,
    pub dictionary: &'a [Vec<u8>],
    pub cmp_feedback: Option<&'a CmpFeedback>,
    pub corpus: Option<&'a dyn CorpusView>,
}

#[enum_dispatch]
pub trait Mutate {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx);
}

#[enum_dispatch(Mutate)]
#[derive(Debug, Clone, Copy, EnumKind)]
#[enum_kind(
    MutatorKind,
    derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, IndexEnum, VariantCount)
)]
pub enum Mutator {
    Bit,
    IncByte,
    DecByte,
    NegByte,
    AddSub,
    MemSet,
    MemCopyOverwrite,
    MemCopyInsert,
    BytesOverwrite,
    BytesInsert,
    AsciiNumOverwrite,
    AsciiNumInsert,
    ByteRepeatOverwrite,
    ByteRepeatInsert,
    MagicOverwrite,
    MagicInsert,
    DictionaryOverwrite,
    DictionaryInsert,
    ConstFeedbackOverwrite,
    ConstFeedbackInsert,
    RandomOverwrite,
    RandomInsert,
    SpliceOverwrite,
    SpliceInsert,
    Expand,
    Shrink,
    Resize,
}

/// Length for a block operator, skewed toward small blocks and bounded by
/// `MAX_BLOCK` for locality.
fn random_block_len(rng: &mut dyn RandomOracle, available: usize) -> usize {
    let max_len = available.min(MAX_BLOCK).max(1);
    rng.rand_skewed(max_len)
}

/// `true` with probability `(SMALL_LENGTH_CHANCE_DENOM - 1) / SMALL_LENGTH_CHANCE_DENOM`.
fn roll_small(rng: &mut dyn RandomOracle) -> bool {
    rng.rand(0, SMALL_LENGTH_CHANCE_DENOM as usize - 1) != 0
}

#[derive(Debug, Clone, Copy)]
pub struct Bit;

impl Mutate for Bit {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let bit = ctx.rng.rand(0, 7) as u32;
        let flipped = input.byte(off) ^ (1 << bit);
        input.overwrite(off, &[flipped], ctx.only_printable);
    }
}

/// Wraps `b - 32 + delta` back into `32..=126`. An involution together with
/// the matching negated delta, so `IncByte` then `DecByte` round-trips.
pub(crate) fn printable_add(b: u8, delta: i32) -> u8 {
    let base = b as i32 - 32;
    let wrapped = (base + delta).rem_euclid(95);
    (wrapped + 32) as u8
}

/// Reflects `b` around the midpoint of `32..=126`. Its own inverse.
pub(crate) fn printable_neg(b: u8) -> u8 {
    (158 - b as i32) as u8
}

#[derive(Debug, Clone, Copy)]
pub struct IncByte;

impl Mutate for IncByte {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        apply_byte_delta(input, ctx, 1);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecByte;

impl Mutate for DecByte {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        apply_byte_delta(input, ctx, -1);
    }
}

fn apply_byte_delta(input: &mut Input, ctx: &mut MutateCtx, delta: i32) {
    if input.size() == 0 {
        return;
    }
    let off = ctx.rng.rand_offset(input.size());
    let b = input.byte(off);
    let new_byte = if ctx.only_printable {
        printable_add(b, delta)
    } else {
        (b as i32).wrapping_add(delta) as u8
    };
    input.write_raw(off, &[new_byte]);
}

#[derive(Debug, Clone, Copy)]
pub struct NegByte;

impl Mutate for NegByte {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let b = input.byte(off);
        let new_byte = if ctx.only_printable { printable_neg(b) } else { !b };
        input.write_raw(off, &[new_byte]);
    }
}

fn addsub_delta(rng: &mut dyn RandomOracle, range: i64) -> i64 {
    rng.rand(0, (2 * range) as usize) as i64 - range
}

#[derive(Debug, Clone, Copy)]
pub struct AddSub;

impl Mutate for AddSub {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let mut width = match ctx.rng.rand(0, 3) {
            0 => 1,
            1 => 2,
            2 => 4,
            _ => 8,
        };
        if input.size() - off < width {
            width = 1;
        }
        let swap = ctx.rng.bool();

        let mut new_bytes = [0u8; 8];
        match width {
            1 => {
                let delta = addsub_delta(ctx.rng, ADDSUB_RANGE_U8);
                let v = input.byte(off) as i64;
                new_bytes[0] = v.wrapping_add(delta) as u8;
            }
            2 => {
                let delta = addsub_delta(ctx.rng, ADDSUB_RANGE_U16);
                let mut v = u16::from_ne_bytes([input.byte(off), input.byte(off + 1)]);
                if swap {
                    v = v.swap_bytes();
                }
                v = (v as i64).wrapping_add(delta) as u16;
                if swap {
                    v = v.swap_bytes();
                }
                new_bytes[..2].copy_from_slice(&v.to_ne_bytes());
            }
            4 => {
                let delta = addsub_delta(ctx.rng, ADDSUB_RANGE_U32);
                let raw = [
                    input.byte(off),
                    input.byte(off + 1),
                    input.byte(off + 2),
                    input.byte(off + 3),
                ];
                let mut v = u32::from_ne_bytes(raw);
                if swap {
                    v = v.swap_bytes();
                }
                v = (v as i64).wrapping_add(delta) as u32;
                if swap {
                    v = v.swap_bytes();
                }
                new_bytes[..4].copy_from_slice(&v.to_ne_bytes());
            }
            _ => {
                let mut raw = [0u8; 8];
                for (i, slot) in raw.iter_mut().enumerate() {
                    *slot = input.byte(off + i);
                }
                let delta = addsub_delta(ctx.rng, ADDSUB_RANGE_U64);
                let mut v = u64::from_ne_bytes(raw);
                if swap {
                    v = v.swap_bytes();
                }
                v = (v as i64).wrapping_add(delta) as u64;
                if swap {
                    v = v.swap_bytes();
                }
                new_bytes = v.to_ne_bytes();
            }
        }

        input.overwrite(off, &new_bytes[..width], ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemSet;

impl Mutate for MemSet {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let len = random_block_len(ctx.rng, input.size() - off);
        let mut byte = ctx.rng.rand_byte();
        if ctx.only_printable {
            byte = canonicalize_printable(byte);
        }
        input.fill_range(off..off + len, byte);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemCopyOverwrite;

impl Mutate for MemCopyOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let src_off = ctx.rng.rand_offset(input.size());
        let dst_off = ctx.rng.rand_offset(input.size());
        let available = input.size() - src_off.max(dst_off);
        let len = random_block_len(ctx.rng, available);
        // Bytes read from the buffer are already printable-safe under
        // `only_printable`, so a straight `mov` needs no canonicalization pass.
        input.mov(src_off, dst_off, len);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MemCopyInsert;

impl Mutate for MemCopyInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let src_off = ctx.rng.rand_offset(input.size());
        let dst_off = ctx.rng.rand(0, input.size());
        let mut len = random_block_len(ctx.rng, input.size() - src_off);
        // Keep the source range on one side of the insertion point so a
        // single post-inflate `mov` doesn't straddle the shifted region.
        if src_off < dst_off {
            len = len.min(dst_off - src_off);
        }
        if len == 0 {
            return;
        }
        let actual_len = input.inflate(dst_off, len, ctx.only_printable);
        if actual_len == 0 {
            return;
        }
        let adjusted_src = if src_off >= dst_off { src_off + actual_len } else { src_off };
        input.mov(adjusted_src, dst_off, actual_len);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BytesOverwrite;

impl Mutate for BytesOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let len = ctx.rng.rand(*BYTES_LEN.start(), *BYTES_LEN.end());
        // BYTES_LEN tops out at 2; a fixed array covers it without allocating.
        let mut buf = [0u8; 2];
        ctx.rng.fill_random(&mut buf[..len]);
        input.overwrite(off, &buf[..len], ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BytesInsert;

impl Mutate for BytesInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let off = ctx.rng.rand(0, input.size());
        let len = ctx.rng.rand(*BYTES_LEN.start(), *BYTES_LEN.end());
        let mut buf = [0u8; 2];
        ctx.rng.fill_random(&mut buf[..len]);
        input.insert(off, &buf[..len], ctx.only_printable);
    }
}

fn format_ascii_num(rng: &mut dyn RandomOracle) -> [u8; ASCII_NUM_FIELD_WIDTH] {
    let magnitude = rng.rand(0, i64::MAX as usize) as i64;
    let value = if rng.bool() { -magnitude } else { magnitude };

    let formatted = format!("{value:<width$}", width = ASCII_NUM_FIELD_WIDTH);
    let mut field = [b' '; ASCII_NUM_FIELD_WIDTH];
    for (slot, byte) in field.iter_mut().zip(formatted.as_bytes()) {
        *slot = *byte;
    }
    field
}

#[derive(Debug, Clone, Copy)]
pub struct AsciiNumOverwrite;

impl Mutate for AsciiNumOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let field = format_ascii_num(ctx.rng);
        let write_len = ctx.rng.rand(*ASCII_NUM_WRITE_LEN.start(), *ASCII_NUM_WRITE_LEN.end());
        input.overwrite(off, &field[..write_len], ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AsciiNumInsert;

impl Mutate for AsciiNumInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let off = ctx.rng.rand(0, input.size());
        let field = format_ascii_num(ctx.rng);
        let write_len = ctx.rng.rand(*ASCII_NUM_WRITE_LEN.start(), *ASCII_NUM_WRITE_LEN.end());
        input.insert(off, &field[..write_len], ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ByteRepeatOverwrite;

impl Mutate for ByteRepeatOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        if off + 1 >= input.size() {
            BytesOverwrite.mutate(input, ctx);
            return;
        }
        let byte = input.byte(off);
        let available = input.size() - (off + 1);
        let len = random_block_len(ctx.rng, available);
        // `byte` already came from this buffer, so it's already printable-safe.
        input.fill_range(off + 1..off + 1 + len, byte);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ByteRepeatInsert;

impl Mutate for ByteRepeatInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            BytesInsert.mutate(input, ctx);
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let byte = input.byte(off);
        let len = random_block_len(ctx.rng, MAX_BLOCK);
        let actual_len = input.inflate(off + 1, len, ctx.only_printable);
        input.fill_range(off + 1..off + 1 + actual_len, byte);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MagicOverwrite;

impl Mutate for MagicOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let entry = magic::random_entry(ctx.rng);
        input.overwrite(off, entry.as_bytes(), ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MagicInsert;

impl Mutate for MagicInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let off = ctx.rng.rand(0, input.size());
        let entry = magic::random_entry(ctx.rng);
        input.insert(off, entry.as_bytes(), ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DictionaryOverwrite;

impl Mutate for DictionaryOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if ctx.dictionary.is_empty() || input.size() == 0 {
            BytesOverwrite.mutate(input, ctx);
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let idx = ctx.rng.rand(0, ctx.dictionary.len() - 1);
        let entry = ctx.dictionary[idx].as_slice();
        input.overwrite(off, entry, ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DictionaryInsert;

impl Mutate for DictionaryInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if ctx.dictionary.is_empty() {
            BytesInsert.mutate(input, ctx);
            return;
        }
        let off = ctx.rng.rand(0, input.size());
        let idx = ctx.rng.rand(0, ctx.dictionary.len() - 1);
        let entry = ctx.dictionary[idx].as_slice();
        input.insert(off, entry, ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConstFeedbackOverwrite;

impl Mutate for ConstFeedbackOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let cmp_feedback = ctx.cmp_feedback;
        let picked = cmp_feedback.and_then(|fb| fb.random_entry(ctx.rng));

        match picked {
            Some((value, len)) if input.size() > 0 => {
                let bytes = value.to_ne_bytes();
                let len = len.min(bytes.len());
                let off = ctx.rng.rand_offset(input.size());
                input.overwrite(off, &bytes[..len], ctx.only_printable);
            }
            _ => BytesOverwrite.mutate(input, ctx),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConstFeedbackInsert;

impl Mutate for ConstFeedbackInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let cmp_feedback = ctx.cmp_feedback;
        let picked = cmp_feedback.and_then(|fb| fb.random_entry(ctx.rng));

        match picked {
            Some((value, len)) => {
                let bytes = value.to_ne_bytes();
                let len = len.min(bytes.len());
                let off = ctx.rng.rand(0, input.size());
                input.insert(off, &bytes[..len], ctx.only_printable);
            }
            None => BytesInsert.mutate(input, ctx),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RandomOverwrite;

impl Mutate for RandomOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() == 0 {
            return;
        }
        let off = ctx.rng.rand_offset(input.size());
        let len = random_block_len(ctx.rng, input.size() - off);
        let mut buf = [0u8; MAX_BLOCK];
        if ctx.only_printable {
            ctx.rng.fill_printable(&mut buf[..len]);
        } else {
            ctx.rng.fill_random(&mut buf[..len]);
        }
        input.write_raw(off, &buf[..len]);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RandomInsert;

impl Mutate for RandomInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let off = ctx.rng.rand(0, input.size());
        let len = random_block_len(ctx.rng, MAX_BLOCK);
        let actual_len = input.inflate(off, len, false);
        let mut buf = [0u8; MAX_BLOCK];
        if ctx.only_printable {
            ctx.rng.fill_printable(&mut buf[..actual_len]);
        } else {
            ctx.rng.fill_random(&mut buf[..actual_len]);
        }
        input.write_raw(off, &buf[..actual_len]);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpliceOverwrite;

impl Mutate for SpliceOverwrite {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let corpus = ctx.corpus;
        let remote = corpus.and_then(|c| c.pick_random_input(ctx.rng));

        match remote {
            Some(remote) if !remote.is_empty() && input.size() > 0 => {
                let remote_off = ctx.rng.rand(0, remote.len() - 1);
                let len = random_block_len(ctx.rng, remote.len() - remote_off);
                let local_off = ctx.rng.rand_offset(input.size());
                let mut buf = [0u8; MAX_BLOCK];
                buf[..len].copy_from_slice(&remote[remote_off..remote_off + len]);
                input.overwrite(local_off, &buf[..len], ctx.only_printable);
            }
            _ => BytesOverwrite.mutate(input, ctx),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpliceInsert;

impl Mutate for SpliceInsert {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let corpus = ctx.corpus;
        let remote = corpus.and_then(|c| c.pick_random_input(ctx.rng));

        match remote {
            Some(remote) if !remote.is_empty() => {
                let remote_off = ctx.rng.rand(0, remote.len() - 1);
                let len = random_block_len(ctx.rng, remote.len() - remote_off);
                let local_off = ctx.rng.rand(0, input.size());
                let mut buf = [0u8; MAX_BLOCK];
                buf[..len].copy_from_slice(&remote[remote_off..remote_off + len]);
                input.insert(local_off, &buf[..len], ctx.only_printable);
            }
            _ => BytesInsert.mutate(input, ctx),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Expand;

impl Mutate for Expand {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let off = ctx.rng.rand(0, input.size());
        let len = if roll_small(ctx.rng) {
            ctx.rng.rand_skewed(EXPAND_SMALL_MAX)
        } else {
            let room = input.max_size().saturating_sub(off).max(1);
            ctx.rng.rand_skewed(room)
        };
        input.inflate(off, len, ctx.only_printable);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Shrink;

impl Mutate for Shrink {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        if input.size() <= 2 {
            return;
        }
        let off_start = ctx.rng.rand_offset(input.size());
        let len = if roll_small(ctx.rng) {
            ctx.rng.rand_skewed(EXPAND_SMALL_MAX)
        } else {
            let room = input.size().saturating_sub(off_start).max(1);
            ctx.rng.rand_skewed(room)
        };

        // off_end may exceed size; move()'s own bounds clamping absorbs
        // that rather than us validating up front.
        let off_end = off_start + len;
        let tail_len = input.size().saturating_sub(off_end);
        input.mov(off_end, off_start, tail_len);

        let removed = len.min(input.size() - off_start);
        input.set_size(input.size() - removed);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Resize;

impl Mutate for Resize {
    fn mutate(&self, input: &mut Input, ctx: &mut MutateCtx) {
        let outcome = ctx.rng.rand(0, RESIZE_OUTCOMES - 1);

        let new_size = if RESIZE_ARBITRARY.contains(&outcome) {
            ctx.rng.rand(1, input.max_size().max(1))
        } else if RESIZE_SMALL_GROW.contains(&outcome) {
            input.size() + small_delta(ctx.rng)
        } else if RESIZE_LARGE_GROW.contains(&outcome) {
            input.size() + large_delta(ctx.rng)
        } else if RESIZE_SMALL_SHRINK.contains(&outcome) {
            input.size().saturating_sub(small_delta(ctx.rng))
        } else if RESIZE_LARGE_SHRINK.contains(&outcome) {
            input.size().saturating_sub(large_delta(ctx.rng))
        } else {
            return;
        };

        let new_size = new_size.clamp(1, input.max_size().max(1));
        let old_size = input.size();
        input.set_size(new_size);

        if new_size > old_size && ctx.only_printable {
            input.fill_range(old_size..new_size, b' ');
        }
    }
}

fn small_delta(rng: &mut dyn RandomOracle) -> usize {
    rng.rand(*RESIZE_SMALL_DELTA.start() as usize, *RESIZE_SMALL_DELTA.end() as usize)
}

fn large_delta(rng: &mut dyn RandomOracle) -> usize {
    rng.rand(*RESIZE_LARGE_DELTA.start() as usize, *RESIZE_LARGE_DELTA.end() as usize)
}

static DISPATCH: OnceCell<WeightedAliasIndex<usize>> = OnceCell::new();

fn dispatch_weights() -> Vec<usize> {
    (0..MutatorKind::VARIANT_COUNT)
        .map(|i| {
            let kind = MutatorKind::index_enum(i).expect("mutator index is valid");
            if kind == MutatorKind::Shrink {
                SHRINK_MULTIPLICITY
            } else {
                1
            }
        })
        .collect()
}

/// Total weighted slots in the catalog: `VARIANT_COUNT` entries, with
/// `Shrink` counted `SHRINK_MULTIPLICITY` times.
pub fn catalog_size() -> usize {
    MutatorKind::VARIANT_COUNT - 1 + SHRINK_MULTIPLICITY
}

/// Samples a catalog entry from the global random stream, weighted so
/// `Shrink` appears `SHRINK_MULTIPLICITY` times as often as any other
/// operator (it counteracts every `*Insert`/`Expand` growing the buffer).
pub fn random_kind() -> MutatorKind {
    let distribution = DISPATCH.get_or_init(|| {
        WeightedAliasIndex::new(dispatch_weights()).expect("failed to build mutator weight distribution")
    });
    MutatorKind::index_enum(distribution.sample(&mut FastRand)).expect("mutator index is valid")
}

pub fn create(kind: MutatorKind) -> Mutator {
    match kind {
        MutatorKind::Bit => Bit.into(),
        MutatorKind::IncByte => IncByte.into(),
        MutatorKind::DecByte => DecByte.into(),
        MutatorKind::NegByte => NegByte.into(),
        MutatorKind::AddSub => AddSub.into(),
        MutatorKind::MemSet => MemSet.into(),
        MutatorKind::MemCopyOverwrite => MemCopyOverwrite.into(),
        MutatorKind::MemCopyInsert => MemCopyInsert.into(),
        MutatorKind::BytesOverwrite => BytesOverwrite.into(),
        MutatorKind::BytesInsert => BytesInsert.into(),
        MutatorKind::AsciiNumOverwrite => AsciiNumOverwrite.into(),
        MutatorKind::AsciiNumInsert => AsciiNumInsert.into(),
        MutatorKind::ByteRepeatOverwrite => ByteRepeatOverwrite.into(),
        MutatorKind::ByteRepeatInsert => ByteRepeatInsert.into(),
        MutatorKind::MagicOverwrite => MagicOverwrite.into(),
        MutatorKind::MagicInsert => MagicInsert.into(),
        MutatorKind::DictionaryOverwrite => DictionaryOverwrite.into(),
        MutatorKind::DictionaryInsert => DictionaryInsert.into(),
        MutatorKind::ConstFeedbackOverwrite => ConstFeedbackOverwrite.into(),
        MutatorKind::ConstFeedbackInsert => ConstFeedbackInsert.into(),
        MutatorKind::RandomOverwrite => RandomOverwrite.into(),
        MutatorKind::RandomInsert => RandomInsert.into(),
        MutatorKind::SpliceOverwrite => SpliceOverwrite.into(),
        MutatorKind::SpliceInsert => SpliceInsert.into(),
        MutatorKind::Expand => Expand.into(),
        MutatorKind::Shrink => Shrink.into(),
        MutatorKind::Resize => Resize.into(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::random::FastRandOracle;

    fn ctx<'a>(rng: &'a mut dyn RandomOracle, dictionary: &'a [Vec<u8>]) -> MutateCtx<'a> {
        MutateCtx {
            rng,
            only_printable: false,
            dictionary,
            cmp_feedback: None,
            corpus: None,
        }
    }

    #[test]
    fn inc_then_dec_byte_round_trips_non_printable() {
        fastrand::seed(1);
        // A 1-byte buffer forces `rand_offset(1) == 0` deterministically
        // (`rand_skewed(1)` always returns 1), so both calls below are
        // guaranteed to land on the same byte without controlling the RNG
        // stream directly.
        let mut input = Input::from_bytes(vec![0x42], 16);
        let mut oracle = FastRandOracle;
        let dict = vec![];

        let before = input.byte(0);
        IncByte.mutate(&mut input, &mut ctx(&mut oracle, &dict));
        assert_eq!(input.as_slice(), &[before.wrapping_add(1)]);

        DecByte.mutate(&mut input, &mut ctx(&mut oracle, &dict));
        assert_eq!(input.as_slice(), &[before]);
    }

    #[test]
    fn neg_byte_is_involution_non_printable() {
        for b in 0..=255u8 {
            assert_eq!(!(!b), b);
        }
    }

    #[test]
    fn neg_byte_is_involution_printable() {
        for b in 32..=126u8 {
            assert_eq!(printable_neg(printable_neg(b)), b);
        }
    }

    #[test]
    fn printable_add_then_inverse_round_trips() {
        for b in 32..=126u8 {
            for delta in [1, -1, 5, -5] {
                let up = printable_add(b, delta);
                let back = printable_add(up, -delta);
                assert_eq!(back, b);
            }
        }
    }

    #[test]
    fn bit_scenario_b_preserves_length() {
        fastrand::seed(0);
        let mut input = Input::from_bytes(vec![0xFF, 0xFF, 0xFF, 0xFF], 16);
        let mut oracle = FastRandOracle;
        let dict = vec![];
        let mut mutate_ctx = ctx(&mut oracle, &dict);

        // directly exercise the documented transformation instead of the
        // full random draw, since the scenario pins exact offset/bit.
        let off = 2;
        let bit = 3u32;
        let flipped = input.byte(off) ^ (1 << bit);
        input.overwrite(off, &[flipped], mutate_ctx.only_printable);

        assert_eq!(input.as_slice(), &[0xFF, 0xFF, 0xF7, 0xFF]);
        assert_eq!(input.size(), 4);
    }

    #[test]
    fn shrink_is_noop_below_three_bytes() {
        fastrand::seed(5);
        let mut input = Input::from_bytes(vec![1, 2], 16);
        let mut oracle = FastRandOracle;
        let dict = vec![];
        Shrink.mutate(&mut input, &mut ctx(&mut oracle, &dict));
        assert_eq!(input.size(), 2);
        assert_eq!(input.as_slice(), &[1, 2]);
    }

    #[test]
    fn dictionary_overwrite_falls_back_when_empty() {
        fastrand::seed(2);
        let mut input = Input::from_bytes(vec![1, 2, 3, 4], 16);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        DictionaryOverwrite.mutate(&mut input, &mut ctx(&mut oracle, &dict));
        // fallback always proceeds and stays within bounds
        assert_eq!(input.size(), 4);
    }

    #[test]
    fn splice_falls_back_when_corpus_empty() {
        fastrand::seed(9);
        let mut input = Input::from_bytes(vec![1, 2, 3, 4], 16);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        let mut mutate_ctx = ctx(&mut oracle, &dict);
        mutate_ctx.corpus = None;
        SpliceOverwrite.mutate(&mut input, &mut mutate_ctx);
        assert_eq!(input.size(), 4);
    }

    #[test]
    fn resize_result_is_always_in_bounds() {
        fastrand::seed(123);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        for _ in 0..500 {
            let mut input = Input::from_bytes(vec![0; 8], 64);
            Resize.mutate(&mut input, &mut ctx(&mut oracle, &dict));
            assert!(input.size() >= 1 && input.size() <= input.max_size());
        }
    }

    #[test]
    fn magic_overwrite_uses_a_known_table_entry() {
        fastrand::seed(11);
        let mut input = Input::from_bytes(vec![0; 8], 16);
        let mut oracle = FastRandOracle;
        let dict: Vec<Vec<u8>> = vec![];
        MagicOverwrite.mutate(&mut input, &mut ctx(&mut oracle, &dict));
        assert_eq!(input.size(), 8);
    }

    #[test]
    fn catalog_weights_count_shrink_four_times() {
        let weights = dispatch_weights();
        let shrink_index = MutatorKind::Shrink as usize;
        assert_eq!(weights[shrink_index], SHRINK_MULTIPLICITY);
        assert_eq!(catalog_size(), weights.iter().sum::<usize>());
    }

    #[test]
    #[ignore = "statistical property; run with `cargo test -- --ignored`"]
    fn shrink_frequency_matches_weighting() {
        fastrand::seed(77);
        let draws = 2_900_000;
        let shrink_count = (0..draws).filter(|_| random_kind() == MutatorKind::Shrink).count();
        let ratio = shrink_count as f64 / draws as f64;
        let expected = SHRINK_MULTIPLICITY as f64 / catalog_size() as f64;
        assert!((ratio - expected).abs() < 0.01, "ratio {ratio} vs expected {expected}");
    }
}
