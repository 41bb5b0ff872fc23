//! User-supplied dictionary of byte strings, scanned from sample inputs or
//! target memory the same way `fuzzer::dict::Dictionary` harvests entries
//! from emulator memory blocks.

use std::{
    ascii::escape_default,
    fmt::{self, Write},
};

use common::config::mutation::{DICT_MAX_LEN, DICT_MIN_LEN};
use common::random::FastRand;
use rand_distr::{Distribution, Uniform};

#[derive(Debug, Default)]
pub struct Dictionary {
    entries: Vec<Entry>,
    distribution: Option<Uniform<usize>>,
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry(Vec<u8>);

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter().copied().flat_map(|byte| char::from_u32(byte as u32)) {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self
            .0
            .iter()
            .copied()
            .flat_map(escape_default)
            .flat_map(|byte| char::from_u32(byte as u32))
        {
            f.write_char(c)?;
        }
        f.write_char('"')
    }
}

impl AsRef<[u8]> for Entry {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Dictionary {
    pub fn from_entries(entries: Vec<Vec<u8>>) -> Self {
        let mut dict = Self {
            entries: entries.into_iter().map(Entry).collect(),
            distribution: None,
        };
        dict.entries.sort_unstable();
        dict.entries.dedup();
        dict.rebuild_distribution();
        dict
    }

    /// Scans a block of memory (or sample input) for printable ASCII
    /// strings and keeps the ones that look like text rather than noise.
    pub fn scan_memory_block(&mut self, memory_block: &[u8]) {
        let mut buffer = vec![];
        let mut heuristic_bad = 0;
        let mut heuristic_good = 0;
        let mut valid = false;

        for (idx, byte) in memory_block.iter().copied().enumerate() {
            let valid_byte = matches!(byte, b'\r' | b'\n' | b'\t' | 0x20..=0x7e);
            if valid_byte {
                if byte.is_ascii_alphanumeric()
                    || matches!(byte, b' ' | b'_' | b'-' | b'=' | b'/' | b'.' | b'\'' | b'"')
                {
                    heuristic_good += 1;
                } else if buffer.last() == Some(&b'\r') && byte == b'\n' {
                    // count '\r\n' as one bad char
                } else {
                    heuristic_bad += 1;
                }

                buffer.push(byte);
                valid = true;
            }

            let last_byte = memory_block.is_empty() || idx == memory_block.len() - 1;
            if valid && (!valid_byte || last_byte) {
                let entry = Entry(buffer);
                log::trace!("found printable ASCII string: {:?}", entry);

                if entry.0.len() >= DICT_MIN_LEN && entry.0.len() <= DICT_MAX_LEN {
                    if heuristic_bad * 3 < heuristic_good {
                        log::debug!("add dict entry: {:?}", entry);
                        self.entries.push(entry);
                    }
                }

                buffer = vec![];
                heuristic_bad = 0;
                heuristic_good = 0;
                valid = false;
            }
        }

        self.entries.sort_unstable();
        self.entries.dedup();
        self.rebuild_distribution();
    }

    fn rebuild_distribution(&mut self) {
        self.distribution = (!self.entries.is_empty()).then(|| Uniform::new(0, self.entries.len()));
    }

    pub fn random_entry(&self) -> Option<&Entry> {
        self.distribution
            .map(|dist| dist.sample(&mut FastRand))
            .and_then(|idx| self.entries.get(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Flat view of the dictionary, for handing to `MutateCtx::dictionary`.
    pub fn as_byte_strings(&self) -> Vec<Vec<u8>> {
        self.entries.iter().map(|entry| entry.0.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scan_keeps_mostly_alphanumeric_strings() {
        let mut dict = Dictionary::default();
        dict.scan_memory_block(b"\x00\x00hello_world\x00garbage\x01\x02\x03\x04");
        assert!(dict.as_byte_strings().contains(&b"hello_world".to_vec()));
    }

    #[test]
    fn scan_drops_too_short_and_too_noisy_strings() {
        let mut dict = Dictionary::default();
        dict.scan_memory_block(b"\x00abc\x00");
        assert!(dict.is_empty());
    }

    #[test]
    fn scan_dedups_and_sorts_entries() {
        let mut dict = Dictionary::default();
        dict.scan_memory_block(b"token_one\x00token_one\x00token_two\x00");
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn empty_dictionary_returns_no_entry() {
        let dict = Dictionary::default();
        assert!(dict.random_entry().is_none());
    }

    #[test]
    fn from_entries_dedups() {
        let dict = Dictionary::from_entries(vec![b"aaaa".to_vec(), b"aaaa".to_vec(), b"bbbb".to_vec()]);
        assert_eq!(dict.len(), 2);
    }
}
