pub mod mutation {
    use std::ops::RangeInclusive;

    // retries for finding a viable mutation / cross-over source before giving up
    pub const MAX_RETRY: usize = 100;
    pub const MAX_CROSS_OVER_RETRY: usize = 10;

    // block-shaped operators (MemSet, MemCopy*, Magic*, Dictionary*, Random*, ...)
    // never touch more than this many bytes in one application, for locality.
    pub const MAX_BLOCK: usize = 512;

    // baseline operator count per `mangle` call when `slow_factor` is in its
    // normal range; higher bands floor the count instead of drawing it.
    pub const CHANGES_SLOW_3_4: usize = 5;
    pub const CHANGES_SLOW_5_9: usize = 7;
    pub const CHANGES_SLOW_OTHER: usize = 10;

    // splice-on-stagnation: if coverage hasn't moved in this long, mangle()
    // spends one extra roll on a splice instead of a plain operator.
    pub const COVERAGE_STAGNATION_MILLIS: u64 = 1000;

    // Expand / Shrink: most growth/shrink amounts are small (15/16), a few are
    // allowed to span up to the remaining buffer (1/16).
    pub const SMALL_LENGTH_CHANCE_DENOM: u8 = 16;
    pub const EXPAND_SMALL_MAX: usize = 16;

    // Resize: 33 equally-likely draws, bucketed unevenly on purpose (see
    // mutator::mutator::Resize). Buckets, in draw order:
    //   0           -> arbitrary size in [1, max_input_size]     (1 slot)
    //   1..=4       -> small grow,   delta in RESIZE_SMALL_DELTA (4 slots)
    //   5           -> large grow,   delta in RESIZE_LARGE_DELTA (1 slot)
    //   6..=9       -> small shrink, delta in RESIZE_SMALL_DELTA (4 slots)
    //   10          -> large shrink, delta in RESIZE_LARGE_DELTA (1 slot)
    //   11..=32     -> no-op                                     (22 slots)
    pub const RESIZE_OUTCOMES: usize = 33;
    pub const RESIZE_ARBITRARY: RangeInclusive<usize> = 0..=0;
    pub const RESIZE_SMALL_GROW: RangeInclusive<usize> = 1..=4;
    pub const RESIZE_LARGE_GROW: RangeInclusive<usize> = 5..=5;
    pub const RESIZE_SMALL_SHRINK: RangeInclusive<usize> = 6..=9;
    pub const RESIZE_LARGE_SHRINK: RangeInclusive<usize> = 10..=10;
    pub const RESIZE_SMALL_DELTA: RangeInclusive<u32> = 0..=8;
    pub const RESIZE_LARGE_DELTA: RangeInclusive<u32> = 9..=128;

    // AddSub: per-width signed delta bound (R in spec §4.3)
    pub const ADDSUB_RANGE_U8: i64 = 16;
    pub const ADDSUB_RANGE_U16: i64 = 4096;
    pub const ADDSUB_RANGE_U32: i64 = 1_048_576;
    pub const ADDSUB_RANGE_U64: i64 = 268_435_456;

    // ASCIINum*: left-justified decimal field width, and how much of it gets
    // written into the buffer.
    pub const ASCII_NUM_FIELD_WIDTH: usize = 19;
    pub const ASCII_NUM_WRITE_LEN: RangeInclusive<usize> = 2..=8;

    pub const BYTES_LEN: RangeInclusive<usize> = 1..=2;

    // dictionary entries learned from read-only memory/input scanning
    pub const DICT_MIN_LEN: usize = 4;
    pub const DICT_MAX_LEN: usize = 64;

    // comparison-feedback dictionary capacity (ring buffer sized by producer)
    pub const CMP_FEEDBACK_CAPACITY: usize = 1 << 12;

    // operator catalog: every entry has dispatch weight 1 except Shrink, which
    // is listed SHRINK_MULTIPLICITY times to counteract the size growth of
    // every *Insert / Expand operator (see mutator::engine::CATALOG).
    pub const SHRINK_MULTIPLICITY: usize = 4;

    // magic / interesting integer constants, grouped by width. Reframed
    // (native/big-endian/little-endian) into the magic constants table
    // consumed by Magic{Overwrite,Insert} (see mutator::magic).
    pub const INTERESTING_VALUES_U8: [u8; 7] = [
        0x10, // one-off with common buffer size
        0x20, // one-off with common buffer size
        0x40, // one-off with common buffer size
        0x64, // one-off with common buffer size
        0x7f, // overflow signed 8-bit when incremented
        0x80, // overflow signed 8-bit when decremented
        0xff, // overflow unsigned 8-bit when incremented
    ];
    pub const INTERESTING_VALUES_U16: [u16; 14] = [
        0x10,   // one-off with common buffer size
        0x20,   // one-off with common buffer size
        0x40,   // one-off with common buffer size
        0x64,   // one-off with common buffer size
        0x7f,   // overflow signed 8-bit when incremented
        0xff,   // overflow unsigned 8-bit when incremented
        0x0100, // overflow unsigned 8-bit
        0x0200, // one-off with common buffer size
        0x03e8, // one-off with common buffer size
        0x0400, // one-off with common buffer size
        0x1000, // one-off with common buffer size
        0x7fff, // overflow signed 16-bit when incremented
        0x8000, // overflow signed 16-bit when decremented
        0xffff, // overflow unsigned 16-bit when incremented
    ];
    pub const INTERESTING_VALUES_U32: [u32; 21] = [
        0x10,        // one-off with common buffer size
        0x20,        // one-off with common buffer size
        0x40,        // one-off with common buffer size
        0x64,        // one-off with common buffer size
        0x7f,        // overflow signed 8-bit when incremented
        0xff,        // overflow unsigned 8-bit when incremented
        0x0100,      // overflow unsigned 8-bit
        0x0200,      // one-off with common buffer size
        0x03e8,      // one-off with common buffer size
        0x0400,      // one-off with common buffer size
        0x1000,      // one-off with common buffer size
        0x7fff,      // overflow signed 16-bit when incremented
        0x8000,      // overflow signed 16-bit when decremented
        0xffff,      // overflow unsigned 16-bit when incremented
        0x0001_0000, // overflow unsigned 16-bit
        0x05ff_ff05, // large positive number (endian-agnostic)
        0x7fff_ffff, // overflow signed 32-bit when incremented
        0x8000_0000, // overflow signed 32-bit when decremented
        0xfa00_00fa, // large negative number (endian-agnostic)
        0xffff_7fff, // overflow signed 16-bit
        0xffff_ffff, // overflow unsigned 32-bit when incremented
    ];
    pub const INTERESTING_VALUES_U64: [u64; 10] = [
        0x0000_0000_0000_0000,
        0x7fff_ffff_ffff_ffff, // overflow signed 64-bit when incremented
        0x8000_0000_0000_0000, // overflow signed 64-bit when decremented
        0xffff_ffff_ffff_ffff, // overflow unsigned 64-bit when incremented
        0x0000_0001_0000_0000, // overflow unsigned 32-bit
        0x0102_0304_0506_0708, // distinct byte pattern, endianness-sensitive
        1 << 63,               // top bit set
        1 << 31,
        1 << 15,
        1 << 7,
    ];
}
