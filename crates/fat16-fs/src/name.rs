//! Reconstructing a filename from either the accumulated LFN chain or, when
//! there is none, the 8.3 fundamental record.

use crate::record::{EntryKind, FundamentalEntry, LongFileNameEntry};

/// Reconstruct a long filename from LFN records in on-disk order.
///
/// On-disk order is the reverse of sequence-number order: the highest
/// sequence number comes first. Visiting the accumulator from last-pushed
/// to first-pushed therefore yields the name in the right order without
/// sorting — see the design notes on LFN ordering. A 0x0000 code unit
/// terminates the name; everything after it is dropped.
pub fn long_name_from_lfn_chain(accumulator: &[LongFileNameEntry]) -> Vec<u16> {
    let mut units = Vec::with_capacity(accumulator.len() * 13);
    for record in accumulator.iter().rev() {
        for unit in record.code_units() {
            if unit == 0x0000 {
                return units;
            }
            units.push(unit);
        }
    }
    units
}

/// Build the short name from an 8.3 fundamental record: strip the leading
/// byte overload, trim space padding from the stem, append the extension
/// verbatim, then trim space padding again.
///
/// No dot is inserted between stem and extension — that's left to callers
/// that want "NAME.EXT" (see the design notes on the dot/extension
/// separator).
pub fn short_name_from_fundamental(entry: &FundamentalEntry) -> Vec<u16> {
    let stem_bytes: Vec<u8> = if entry.kind() == EntryKind::Dot {
        // Strip the single leading 0x2E byte.
        entry.name[1..].to_vec()
    } else if entry.name[0] == 0x05 {
        let mut name = entry.name;
        name[0] = 0xE5;
        name.to_vec()
    } else {
        entry.name.to_vec()
    };

    let stem = trim_trailing_spaces(&stem_bytes);
    let mut units: Vec<u16> = stem.iter().map(|&b| b as u16).collect();
    units.extend(trim_trailing_spaces(&entry.ext).iter().map(|&b| b as u16));
    units
}

fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ')
        .map(|i| i + 1)
        .unwrap_or(0);
    &bytes[..end]
}

/// Lossily render a UTF-16 code-unit sequence as a display `String`,
/// substituting U+FFFD for any unpaired surrogate. Not used by the decoder
/// itself; a convenience for callers such as the inspection demo.
pub fn display_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
