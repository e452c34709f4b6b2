//! The two 32-byte record layouts that make up a directory: the legacy 8.3
//! "fundamental" entry, and the long-filename (LFN) extension record that
//! precedes it on disk.

/// Size in bytes of every directory slot, of either kind.
pub const RECORD_SIZE: usize = 32;

/// Attribute bit: read-only.
pub const ATTR_READ_ONLY: u8 = 0x01;
/// Attribute bit: hidden.
pub const ATTR_HIDDEN: u8 = 0x02;
/// Attribute bit: system.
pub const ATTR_SYSTEM: u8 = 0x04;
/// Attribute bit: volume label.
pub const ATTR_VOLUME_LABEL: u8 = 0x08;
/// Attribute bit: directory.
pub const ATTR_DIRECTORY: u8 = 0x10;
/// Attribute bit: archive.
pub const ATTR_ARCHIVE: u8 = 0x20;
/// Attributes 0-3 set together mark an LFN record rather than a fundamental
/// entry.
pub const ATTR_LFN: u8 = 0x0F;

/// What a record's first filename byte says about the slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 0x00 — never used; the directory ends here.
    Unused,
    /// 0xE5 — a deleted entry.
    Deleted,
    /// 0x2E — a "." or ".." pseudo-entry.
    Dot,
    /// Anything else: a live entry.
    Normal,
}

impl EntryKind {
    /// Classify a fundamental entry's first filename byte.
    pub fn classify(first_byte: u8) -> Self {
        match first_byte {
            0x00 => EntryKind::Unused,
            0xE5 => EntryKind::Deleted,
            0x2E => EntryKind::Dot,
            _ => EntryKind::Normal,
        }
    }
}

/// A decoded 8.3 directory record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundamentalEntry {
    /// Raw 8-byte filename, space-padded, with the leading-byte overloads
    /// described by [`EntryKind`] still in place.
    pub name: [u8; 8],
    /// Raw 3-byte extension, space-padded.
    pub ext: [u8; 3],
    pub attributes: u8,
    pub create_time_tenth: u8,
    pub create_time: u16,
    pub create_date: u16,
    pub access_date: u16,
    pub write_time: u16,
    pub write_date: u16,
    first_cluster_low: u16,
    pub file_size: u32,
}

impl FundamentalEntry {
    /// Decode a 32-byte record. Does not check `attributes` for the LFN
    /// marker — callers distinguish LFN records from fundamental ones before
    /// reaching here.
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        Self {
            name: bytes[0..8].try_into().unwrap(),
            ext: bytes[8..11].try_into().unwrap(),
            attributes: bytes[11],
            create_time_tenth: bytes[13],
            create_time: u16::from_le_bytes([bytes[14], bytes[15]]),
            create_date: u16::from_le_bytes([bytes[16], bytes[17]]),
            access_date: u16::from_le_bytes([bytes[18], bytes[19]]),
            write_time: u16::from_le_bytes([bytes[22], bytes[23]]),
            write_date: u16::from_le_bytes([bytes[24], bytes[25]]),
            first_cluster_low: u16::from_le_bytes([bytes[26], bytes[27]]),
            file_size: u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
        }
    }

    /// Classification of this entry's leading filename byte.
    pub fn kind(&self) -> EntryKind {
        EntryKind::classify(self.name[0])
    }

    pub fn is_read_only(&self) -> bool {
        self.attributes & ATTR_READ_ONLY != 0
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes & ATTR_HIDDEN != 0
    }

    pub fn is_system(&self) -> bool {
        self.attributes & ATTR_SYSTEM != 0
    }

    pub fn is_volume_label(&self) -> bool {
        self.attributes & ATTR_VOLUME_LABEL != 0
    }

    pub fn is_directory(&self) -> bool {
        self.attributes & ATTR_DIRECTORY != 0
    }

    pub fn is_archive(&self) -> bool {
        self.attributes & ATTR_ARCHIVE != 0
    }

    /// The entry's starting cluster. FAT16 never populates the high cluster
    /// word at offset 20-21 (that field only matters for FAT32); this
    /// decoder doesn't read it.
    pub fn starting_cluster(&self) -> u16 {
        self.first_cluster_low
    }
}

/// A decoded long-filename extension record.
///
/// Three runs of UTF-16 code units (5 + 6 + 2 = 13 per record) carry a
/// fragment of a long name; [`LongFileNameEntry::code_units`] concatenates
/// them in on-disk field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongFileNameEntry {
    /// Sequence/position byte, including the 0x40 "last logical entry" bit.
    pub sequence: u8,
    name1: [u16; 5],
    pub attributes: u8,
    pub entry_type: u8,
    pub checksum: u8,
    name2: [u16; 6],
    pub checksum_name_start_cluster: u16,
    name3: [u16; 2],
}

impl LongFileNameEntry {
    /// True if the raw 32-byte slot is an LFN record rather than a
    /// fundamental entry: attribute byte is exactly `ATTR_LFN`, and the
    /// slot's would-be starting-cluster word is zero (true LFN records
    /// never populate it).
    pub fn is_lfn_record(bytes: &[u8; RECORD_SIZE]) -> bool {
        bytes[11] == ATTR_LFN && bytes[26] == 0 && bytes[27] == 0
    }

    /// Decode a 32-byte record already known to satisfy
    /// [`Self::is_lfn_record`].
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let code_unit = |lo: usize| u16::from_le_bytes([bytes[lo], bytes[lo + 1]]);
        Self {
            sequence: bytes[0],
            name1: [
                code_unit(1),
                code_unit(3),
                code_unit(5),
                code_unit(7),
                code_unit(9),
            ],
            attributes: bytes[11],
            entry_type: bytes[12],
            checksum: bytes[13],
            name2: [
                code_unit(14),
                code_unit(16),
                code_unit(18),
                code_unit(20),
                code_unit(22),
                code_unit(24),
            ],
            checksum_name_start_cluster: code_unit(26),
            name3: [code_unit(28), code_unit(30)],
        }
    }

    /// The 13 UTF-16 code units this record contributes, in on-disk field
    /// order (name1, then name2, then name3).
    pub fn code_units(&self) -> [u16; 13] {
        let mut out = [0u16; 13];
        out[0..5].copy_from_slice(&self.name1);
        out[5..11].copy_from_slice(&self.name2);
        out[11..13].copy_from_slice(&self.name3);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fundamental_bytes(name: &[u8; 8], ext: &[u8; 3], attributes: u8) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..8].copy_from_slice(name);
        bytes[8..11].copy_from_slice(ext);
        bytes[11] = attributes;
        bytes
    }

    #[test]
    fn classifies_entry_kinds() {
        assert_eq!(EntryKind::classify(0x00), EntryKind::Unused);
        assert_eq!(EntryKind::classify(0xE5), EntryKind::Deleted);
        assert_eq!(EntryKind::classify(0x2E), EntryKind::Dot);
        assert_eq!(EntryKind::classify(b'H'), EntryKind::Normal);
    }

    #[test]
    fn decodes_fundamental_entry_fields() {
        let bytes = fundamental_bytes(b"HELLO   ", b"TXT", ATTR_ARCHIVE);
        let entry = FundamentalEntry::from_bytes(&bytes);
        assert_eq!(&entry.name, b"HELLO   ");
        assert_eq!(&entry.ext, b"TXT");
        assert!(entry.is_archive());
        assert!(!entry.is_directory());
        assert_eq!(entry.kind(), EntryKind::Normal);
    }

    #[test]
    fn directory_attribute_is_recognised() {
        let bytes = fundamental_bytes(b"SUBDIR  ", b"   ", ATTR_DIRECTORY);
        let entry = FundamentalEntry::from_bytes(&bytes);
        assert!(entry.is_directory());
    }

    #[test]
    fn starting_cluster_reads_low_word() {
        let mut bytes = fundamental_bytes(b"HELLO   ", b"TXT", ATTR_ARCHIVE);
        bytes[26..28].copy_from_slice(&42u16.to_le_bytes());
        let entry = FundamentalEntry::from_bytes(&bytes);
        assert_eq!(entry.starting_cluster(), 42);
    }

    #[test]
    fn lfn_record_is_distinguished_by_attribute_and_zero_cluster() {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[11] = ATTR_LFN;
        assert!(LongFileNameEntry::is_lfn_record(&bytes));

        bytes[26] = 1;
        assert!(!LongFileNameEntry::is_lfn_record(&bytes));
    }

    /// Part of S4: an LFN record's 13 code units concatenate name1/name2/name3.
    #[test]
    fn lfn_code_units_concatenate_in_field_order() {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0] = 0x42;
        bytes[11] = ATTR_LFN;
        let text: Vec<u16> = "HELLOWORLD1AB".encode_utf16().collect();
        assert_eq!(text.len(), 13);
        // name1 (5 units) at offsets 1,3,5,7,9
        for (i, unit) in text[0..5].iter().enumerate() {
            let off = 1 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }
        // name2 (6 units) at offsets 14..26
        for (i, unit) in text[5..11].iter().enumerate() {
            let off = 14 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }
        // name3 (2 units) at offsets 28..32
        for (i, unit) in text[11..13].iter().enumerate() {
            let off = 28 + i * 2;
            bytes[off..off + 2].copy_from_slice(&unit.to_le_bytes());
        }

        let lfn = LongFileNameEntry::from_bytes(&bytes);
        assert_eq!(lfn.sequence, 0x42);
        assert_eq!(&lfn.code_units()[..], &text[..]);
    }
}
