//! Static table of "interesting" integer constants: small numbers, sign
//! boundaries and common off-by-ones, each framed as native-endian,
//! big-endian and little-endian byte sequences. Grounded in
//! `common::config::mutation::INTERESTING_VALUES_*`.

use common::config::mutation::{
    INTERESTING_VALUES_U16, INTERESTING_VALUES_U32, INTERESTING_VALUES_U64, INTERESTING_VALUES_U8,
};
use once_cell::sync::OnceCell;

use crate::random::RandomOracle;

#[derive(Debug, Clone, Copy)]
pub struct MagicValue {
    bytes: [u8; 8],
    size: usize,
}

impl MagicValue {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size]
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

fn push_u8(table: &mut Vec<MagicValue>, values: &[u8]) {
    for &v in values {
        let mut bytes = [0u8; 8];
        bytes[0] = v;
        table.push(MagicValue { bytes, size: 1 });
    }
}

fn push_u16(table: &mut Vec<MagicValue>, values: &[u16]) {
    for &v in values {
        for frame in [v.to_ne_bytes(), v.to_be_bytes(), v.to_le_bytes()] {
            let mut bytes = [0u8; 8];
            bytes[..2].copy_from_slice(&frame);
            table.push(MagicValue { bytes, size: 2 });
        }
    }
}

fn push_u32(table: &mut Vec<MagicValue>, values: &[u32]) {
    for &v in values {
        for frame in [v.to_ne_bytes(), v.to_be_bytes(), v.to_le_bytes()] {
            let mut bytes = [0u8; 8];
            bytes[..4].copy_from_slice(&frame);
            table.push(MagicValue { bytes, size: 4 });
        }
    }
}

fn push_u64(table: &mut Vec<MagicValue>, values: &[u64]) {
    for &v in values {
        for frame in [v.to_ne_bytes(), v.to_be_bytes(), v.to_le_bytes()] {
            table.push(MagicValue { bytes: frame, size: 8 });
        }
    }
}

fn build_table() -> Vec<MagicValue> {
    let mut table = Vec::new();
    push_u8(&mut table, &INTERESTING_VALUES_U8);
    push_u16(&mut table, &INTERESTING_VALUES_U16);
    push_u32(&mut table, &INTERESTING_VALUES_U32);
    push_u64(&mut table, &INTERESTING_VALUES_U64);
    table
}

static MAGIC_TABLE: OnceCell<Vec<MagicValue>> = OnceCell::new();

pub fn table() -> &'static [MagicValue] {
    MAGIC_TABLE.get_or_init(build_table)
}

pub fn random_entry(rng: &mut dyn RandomOracle) -> &'static MagicValue {
    let table = table();
    &table[rng.rand(0, table.len() - 1)]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::random::FastRandOracle;

    #[test]
    fn table_is_exhaustive_and_sized_correctly() {
        let table = table();
        assert_eq!(
            table.len(),
            INTERESTING_VALUES_U8.len()
                + INTERESTING_VALUES_U16.len() * 3
                + INTERESTING_VALUES_U32.len() * 3
                + INTERESTING_VALUES_U64.len() * 3
        );
        for entry in table {
            assert!(matches!(entry.size(), 1 | 2 | 4 | 8));
            assert_eq!(entry.as_bytes().len(), entry.size());
        }
    }

    #[test]
    fn random_entry_stays_within_table() {
        fastrand::seed(3);
        let mut oracle = FastRandOracle;
        for _ in 0..1_000 {
            let entry = random_entry(&mut oracle);
            assert!(table().iter().any(|e| e.as_bytes() == entry.as_bytes()));
        }
    }
}
