//! The boot block: the first 512 bytes of the image.

use crate::util::read_fill;
use fat16_core::{checked_add_u64, checked_multiply_u32_to_u64, checked_narrow_u32, Error, Result};
use fat16_core::ReadSeek;
use std::io::{Seek, SeekFrom};

/// The expected value of the boot-sector signature word at offset 510.
/// Not enforced — some images in the wild carry other values — but a
/// mismatch is worth a `tracing::warn!` since it usually means the image
/// isn't what the caller thinks it is.
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Parsed boot-block geometry plus the region offsets derived from it.
///
/// Only the fields the decoder actually needs are kept (see the format's
/// data model): bytes per logical sector, sectors per cluster, the reserved
/// region, FAT count and size, and the root directory's entry capacity.
/// Timestamps, volume labels, and CHS geometry live on the sector but are
/// never surfaced here — this decoder doesn't interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootBlock {
    /// Logical sector size in bytes (BPB offset 0x0B).
    pub bytes_per_block: u16,
    /// Sectors per cluster (BPB offset 0x0D).
    pub blocks_per_allocation_unit: u8,
    /// Reserved sectors before the first FAT, including the boot sector
    /// itself (BPB offset 0x0E).
    pub reserved_blocks: u16,
    /// Number of FAT copies (BPB offset 0x10).
    pub num_fats: u8,
    /// Maximum number of root directory entries (BPB offset 0x11).
    pub root_dir_entries: u16,
    /// Sectors occupied by one copy of the FAT (BPB offset 0x16).
    pub blocks_per_fat: u16,

    /// Byte offset of the first FAT.
    pub fat_region_start: u32,
    /// Byte offset of the (flat) root directory region.
    pub root_dir_region_start: u32,
    /// Byte offset of cluster 2, the first data cluster.
    pub data_region_start: u32,
    /// `bytes_per_block * blocks_per_allocation_unit`.
    pub bytes_per_cluster: u32,
}

impl BootBlock {
    /// Parse the boot block from offset 0 of `source`.
    ///
    /// Fails with [`Error::MalformedBootBlock`] when fewer than 512 bytes
    /// are available, or when `bytes_per_block` or
    /// `blocks_per_allocation_unit` is zero (both are divisors in the
    /// geometry derived below, and both must be non-zero on a well-formed
    /// image). `num_fats` and `blocks_per_fat` are likewise required to be
    /// non-zero; a FAT16 volume with no FAT copies or a zero-length FAT
    /// cannot address any data.
    pub fn parse(source: &mut dyn ReadSeek) -> Result<Self> {
        source.seek(SeekFrom::Start(0))?;
        let mut sector = [0u8; 512];
        let n = read_fill(source, &mut sector)?;
        if n < 512 {
            return Err(Error::malformed_boot_block(format!(
                "boot sector short read: got {n} of 512 bytes"
            )));
        }

        let bytes_per_block = u16::from_le_bytes([sector[11], sector[12]]);
        let blocks_per_allocation_unit = sector[13];
        let reserved_blocks = u16::from_le_bytes([sector[14], sector[15]]);
        let num_fats = sector[16];
        let root_dir_entries = u16::from_le_bytes([sector[17], sector[18]]);
        let blocks_per_fat = u16::from_le_bytes([sector[22], sector[23]]);
        let signature = u16::from_le_bytes([sector[510], sector[511]]);

        if signature != BOOT_SIGNATURE {
            tracing::warn!(
                signature = format!("{signature:#06x}"),
                "boot sector signature is not 0xAA55; continuing anyway"
            );
        }

        if bytes_per_block == 0 {
            return Err(Error::malformed_boot_block("bytes_per_block is zero"));
        }
        if blocks_per_allocation_unit == 0 {
            return Err(Error::malformed_boot_block(
                "blocks_per_allocation_unit is zero",
            ));
        }
        if num_fats == 0 {
            return Err(Error::malformed_boot_block("num_fats is zero"));
        }
        if blocks_per_fat == 0 {
            return Err(Error::malformed_boot_block("blocks_per_fat is zero"));
        }

        let fat_region_start = checked_multiply_u32_to_u64(
            reserved_blocks as u32,
            bytes_per_block as u32,
            "fat_region_start",
        )?;

        let one_fat_size = checked_multiply_u32_to_u64(
            blocks_per_fat as u32,
            bytes_per_block as u32,
            "one FAT size",
        )?;
        let all_fats_size = (num_fats as u64)
            .checked_mul(one_fat_size)
            .ok_or_else(|| Error::malformed_boot_block("all_fats_size: multiplication overflow"))?;
        let root_dir_region_start =
            checked_add_u64(fat_region_start, all_fats_size, "root_dir_region_start")?;

        let root_dir_bytes =
            checked_multiply_u32_to_u64(root_dir_entries as u32, 32, "root_dir_bytes")?;
        let data_region_start =
            checked_add_u64(root_dir_region_start, root_dir_bytes, "data_region_start")?;

        let bytes_per_cluster = checked_multiply_u32_to_u64(
            bytes_per_block as u32,
            blocks_per_allocation_unit as u32,
            "bytes_per_cluster",
        )?;

        Ok(Self {
            bytes_per_block,
            blocks_per_allocation_unit,
            reserved_blocks,
            num_fats,
            root_dir_entries,
            blocks_per_fat,
            fat_region_start: checked_narrow_u32(fat_region_start, "fat_region_start")?,
            root_dir_region_start: checked_narrow_u32(
                root_dir_region_start,
                "root_dir_region_start",
            )?,
            data_region_start: checked_narrow_u32(data_region_start, "data_region_start")?,
            bytes_per_cluster: checked_narrow_u32(bytes_per_cluster, "bytes_per_cluster")?,
        })
    }

    /// Byte offset of `cluster` in the data region. Callers are expected to
    /// have already checked `cluster >= 2`; cluster 0 and 1 have no data
    /// offset.
    pub fn data_offset(&self, cluster: u16) -> u64 {
        self.data_region_start as u64
            + (cluster.saturating_sub(2) as u64) * self.bytes_per_cluster as u64
    }
}
