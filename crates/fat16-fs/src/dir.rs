//! The stateful directory iterator: pairs a run of LFN records with the 8.3
//! record that terminates it, over either the root directory's flat region
//! or a subdirectory's cluster chain.

use crate::boot::BootBlock;
use crate::chain::ClusterId;
use crate::cluster::read_from_cluster;
use crate::name::{long_name_from_lfn_chain, short_name_from_fundamental};
use crate::record::{EntryKind, FundamentalEntry, LongFileNameEntry, RECORD_SIZE};
use crate::util::read_fill;
use fat16_core::security::MAX_DIRECTORY_ENTRIES;
use fat16_core::{Error, ReadSeek, Result};
use std::io::{Seek, SeekFrom};

/// A directory iteration cursor.
///
/// Opaque to callers beyond the accessors below. Holds the byte offset of
/// the next record to decode, which directory is being iterated (the
/// root's flat region when `root == 0`, otherwise a subdirectory's cluster
/// chain rooted at `root`), the most recently decoded 8.3 record, and the
/// LFN records accumulated ahead of it.
#[derive(Debug, Clone)]
pub struct Entry {
    cursor_record: u32,
    root: ClusterId,
    record: FundamentalEntry,
    lfn_accumulator: Vec<LongFileNameEntry>,
    ended: bool,
}

impl Entry {
    /// A fresh cursor positioned at the start of the root directory.
    pub fn root() -> Self {
        Self::at(0)
    }

    fn at(root: ClusterId) -> Self {
        Self {
            cursor_record: 0,
            root,
            record: FundamentalEntry::from_bytes(&[0u8; RECORD_SIZE]),
            lfn_accumulator: Vec::new(),
            ended: false,
        }
    }

    /// The most recently decoded 8.3 record. Meaningless before the first
    /// successful `next_entry` call.
    pub fn record(&self) -> &FundamentalEntry {
        &self.record
    }

    /// LFN records accumulated ahead of the current record, in on-disk
    /// order (highest sequence number first).
    pub fn lfn_accumulator(&self) -> &[LongFileNameEntry] {
        &self.lfn_accumulator
    }

    /// True while iterating the root directory's flat region.
    pub fn is_root(&self) -> bool {
        self.root == 0
    }

    /// Byte offset of the next record to decode, relative to the start of
    /// this directory. A multiple of 32.
    pub fn cursor_record(&self) -> u32 {
        self.cursor_record
    }

    /// The reconstructed filename: the long name if LFN records preceded
    /// the current entry, otherwise the 8.3 fallback built from it.
    pub fn filename(&self) -> Vec<u16> {
        if self.lfn_accumulator.is_empty() {
            short_name_from_fundamental(&self.record)
        } else {
            long_name_from_lfn_chain(&self.lfn_accumulator)
        }
    }

    /// True if this entry is a directory that a caller should descend
    /// into: the directory attribute bit is set, and the entry is not a
    /// "." or ".." pseudo-entry, a deleted slot, or the end-of-directory
    /// marker. See the design notes on dot-entry recursion — this is the
    /// corrected policy, not the inverted one.
    pub fn is_recursable_directory(&self) -> bool {
        self.record.is_directory() && matches!(self.record.kind(), EntryKind::Normal)
    }

    /// Classification of the current record's leading filename byte
    /// (unused / deleted / dot / normal). A typed convenience over
    /// [`Entry::record`]'s raw bytes.
    pub fn kind(&self) -> EntryKind {
        self.record.kind()
    }

    pub fn is_read_only(&self) -> bool {
        self.record.is_read_only()
    }

    pub fn is_hidden(&self) -> bool {
        self.record.is_hidden()
    }

    pub fn is_system(&self) -> bool {
        self.record.is_system()
    }

    pub fn is_volume_label(&self) -> bool {
        self.record.is_volume_label()
    }

    pub fn is_directory(&self) -> bool {
        self.record.is_directory()
    }

    pub fn is_archive(&self) -> bool {
        self.record.is_archive()
    }
}

fn read_record(
    source: &mut dyn ReadSeek,
    boot: &BootBlock,
    entry: &Entry,
    raw: &mut [u8; RECORD_SIZE],
) -> std::io::Result<usize> {
    if entry.is_root() {
        let offset = boot.root_dir_region_start as u64 + entry.cursor_record as u64;
        source.seek(SeekFrom::Start(offset))?;
        read_fill(source, raw)
    } else {
        read_from_cluster(
            source,
            boot,
            raw,
            entry.cursor_record,
            entry.root,
            RECORD_SIZE as u32,
        )
        .map(|n| n as usize)
    }
}

/// Advance `entry` to the next directory record.
///
/// Returns `Ok(false)` at the normal end of iteration: the root directory's
/// entry-count capacity is reached, a record read comes up short (the
/// subdirectory's cluster chain has ended), or a subdirectory traversal
/// exceeds the hardening cap on entries visited. Once `Ok(false)` is
/// returned, every subsequent call also returns `Ok(false)`.
pub fn next_entry(source: &mut dyn ReadSeek, boot: &BootBlock, entry: &mut Entry) -> Result<bool> {
    if entry.ended {
        return Ok(false);
    }

    if entry.is_root() && entry.cursor_record / RECORD_SIZE as u32 >= boot.root_dir_entries as u32
    {
        entry.ended = true;
        return Ok(false);
    }

    entry.lfn_accumulator.clear();
    let mut steps = 0usize;

    loop {
        let mut raw = [0u8; RECORD_SIZE];
        let got = read_record(source, boot, entry, &mut raw)?;
        if got < RECORD_SIZE {
            entry.ended = true;
            return Ok(false);
        }

        if LongFileNameEntry::is_lfn_record(&raw) {
            entry.lfn_accumulator.push(LongFileNameEntry::from_bytes(&raw));
            entry.cursor_record += RECORD_SIZE as u32;

            steps += 1;
            if !entry.is_root() && steps > MAX_DIRECTORY_ENTRIES {
                tracing::warn!("subdirectory traversal exceeded the entry cap while scanning an LFN run");
                entry.ended = true;
                return Ok(false);
            }
            if entry.is_root()
                && entry.cursor_record / RECORD_SIZE as u32 >= boot.root_dir_entries as u32
            {
                entry.ended = true;
                return Ok(false);
            }
            continue;
        }

        entry.record = FundamentalEntry::from_bytes(&raw);
        entry.cursor_record += RECORD_SIZE as u32;
        if entry.record.kind() == EntryKind::Unused {
            // 0x00 marks the end of the directory; this is the last entry
            // a caller observes.
            entry.ended = true;
        }
        return Ok(true);
    }
}

/// Build a fresh iterator over the subdirectory `parent` points at.
///
/// Fails with [`Error::NotADirectory`] if `parent`'s current record does
/// not have the directory attribute set. Does not itself enforce the
/// dot-entry recursion policy — callers should check
/// [`Entry::is_recursable_directory`] first if they want to skip "." and
/// "..", deleted slots, and the end marker.
pub fn first_entry_of(parent: &Entry) -> Result<Entry> {
    if !parent.record.is_directory() {
        return Err(Error::NotADirectory);
    }
    Ok(Entry::at(parent.record.starting_cluster()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BootBlock;
    use crate::record::ATTR_DIRECTORY;
    use std::io::Cursor;

    fn root_image(root_dir_entries: u16, records: &[[u8; RECORD_SIZE]]) -> (Vec<u8>, BootBlock) {
        let root_dir_region_start = 512u32;
        let root_bytes = root_dir_entries as usize * RECORD_SIZE;
        let mut data = vec![0u8; root_dir_region_start as usize + root_bytes];
        for (i, record) in records.iter().enumerate() {
            let off = root_dir_region_start as usize + i * RECORD_SIZE;
            data[off..off + RECORD_SIZE].copy_from_slice(record);
        }
        let boot = BootBlock {
            bytes_per_block: 512,
            blocks_per_allocation_unit: 1,
            reserved_blocks: 1,
            num_fats: 1,
            root_dir_entries,
            blocks_per_fat: 1,
            fat_region_start: 0,
            root_dir_region_start,
            data_region_start: root_dir_region_start + root_bytes as u32,
            bytes_per_cluster: 512,
        };
        (data, boot)
    }

    fn lfn_record(sequence: u8, text13: &str) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0] = sequence;
        bytes[11] = crate::record::ATTR_LFN;
        let mut units: Vec<u16> = text13.encode_utf16().collect();
        units.resize(13, 0x0000);
        for (i, unit) in units[0..5].iter().enumerate() {
            let off = 1 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }
        for (i, unit) in units[5..11].iter().enumerate() {
            let off = 14 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }
        for (i, unit) in units[11..13].iter().enumerate() {
            let off = 28 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    fn fundamental_record(name: &[u8; 8], ext: &[u8; 3], attributes: u8) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..8].copy_from_slice(name);
        bytes[8..11].copy_from_slice(ext);
        bytes[11] = attributes;
        bytes
    }

    /// S4: [LFN seq=0x42, LFN seq=0x01, 8.3 "HELLO   TXT"] -> one
    /// `next_entry` call, two accumulated LFN records, 8.3 "HELLO.TXT".
    #[test]
    fn s4_pairs_lfn_run_with_its_terminating_record() {
        // "hello world.txt" (15 chars) split across two LFN records: the
        // lower sequence number carries the head of the name and exactly
        // fills its 13 units; the higher one carries the tail plus the
        // zero terminator.
        let records = [
            lfn_record(0x42, "xt"),
            lfn_record(0x01, "hello world.t"),
            fundamental_record(b"HELLO   ", b"TXT", 0x20),
        ];
        let (data, boot) = root_image(16, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();

        let advanced = next_entry(&mut cursor, &boot, &mut entry).unwrap();
        assert!(advanced);
        assert_eq!(entry.lfn_accumulator().len(), 2);
        assert_eq!(entry.cursor_record(), 3 * RECORD_SIZE as u32);
        assert_eq!(
            crate::name::display_lossy(&entry.filename()),
            "hello world.txt"
        );
    }

    #[test]
    fn falls_back_to_short_name_without_lfn_records() {
        let records = [fundamental_record(b"HELLO   ", b"TXT", 0x20)];
        let (data, boot) = root_image(16, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();

        assert!(next_entry(&mut cursor, &boot, &mut entry).unwrap());
        assert!(entry.lfn_accumulator().is_empty());
        assert_eq!(crate::name::display_lossy(&entry.filename()), "HELLOTXT");
    }

    /// Law 4: successive calls yield strictly increasing cursor_record
    /// values, each a multiple of 32.
    #[test]
    fn iteration_is_monotone() {
        let records = [
            fundamental_record(b"A       ", b"   ", 0x20),
            fundamental_record(b"B       ", b"   ", 0x20),
        ];
        let (data, boot) = root_image(16, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();

        let mut offsets = Vec::new();
        while next_entry(&mut cursor, &boot, &mut entry).unwrap() {
            offsets.push(entry.cursor_record());
        }
        assert_eq!(offsets, vec![RECORD_SIZE as u32, 2 * RECORD_SIZE as u32]);
    }

    #[test]
    fn root_directory_capacity_bounds_iteration() {
        let records = [fundamental_record(b"A       ", b"   ", 0x20)];
        let (data, boot) = root_image(1, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();

        assert!(next_entry(&mut cursor, &boot, &mut entry).unwrap());
        assert!(!next_entry(&mut cursor, &boot, &mut entry).unwrap());
    }

    #[test]
    fn unused_marker_ends_iteration_after_reporting_it() {
        let records = [fundamental_record(&[0u8; 8], &[0u8; 3], 0)];
        let (data, boot) = root_image(16, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();

        assert!(next_entry(&mut cursor, &boot, &mut entry).unwrap());
        assert_eq!(entry.record().kind(), EntryKind::Unused);
        assert!(!next_entry(&mut cursor, &boot, &mut entry).unwrap());
    }

    #[test]
    fn first_entry_of_rejects_non_directory() {
        let records = [fundamental_record(b"FILE    ", b"TXT", 0x20)];
        let (data, boot) = root_image(16, &records);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();
        next_entry(&mut cursor, &boot, &mut entry).unwrap();

        assert!(first_entry_of(&entry).is_err());
    }

    #[test]
    fn first_entry_of_subdirectory_starts_a_fresh_cursor_at_its_cluster() {
        let records = [fundamental_record(b"SUBDIR  ", b"   ", ATTR_DIRECTORY)];
        let mut record_bytes = records[0];
        record_bytes[26..28].copy_from_slice(&5u16.to_le_bytes());
        let (data, boot) = root_image(16, &[record_bytes]);
        let mut cursor = Cursor::new(data);
        let mut entry = Entry::root();
        next_entry(&mut cursor, &boot, &mut entry).unwrap();

        let child = first_entry_of(&entry).unwrap();
        assert!(!child.is_root());
        assert_eq!(child.cursor_record(), 0);
    }

    #[test]
    fn dot_entries_are_not_recursable() {
        let bytes = fundamental_record(&[0x2E, 0x2E, b' ', b' ', b' ', b' ', b' ', b' '], b"   ", ATTR_DIRECTORY);
        let entry = FundamentalEntry::from_bytes(&bytes);
        let mut cursor_entry = Entry::root();
        cursor_entry.record = entry;
        assert!(!cursor_entry.is_recursable_directory());
    }
}
