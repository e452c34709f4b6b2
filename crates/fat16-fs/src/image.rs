//! The facade composing the boot block, the cluster reader, and the
//! directory iterator into a single handle on an open FAT16 image.

use crate::boot::BootBlock;
use crate::chain::ClusterId;
use crate::cluster;
use crate::dir::{self, Entry};
use fat16_core::{ReadSeek, Result};

/// An opened FAT16 image.
///
/// Owns the parsed boot block and the image source exclusively; an `Entry`
/// cursor is owned by the caller and only mutated when passed back in.
pub struct Fat16Image<S: ReadSeek> {
    source: S,
    boot: BootBlock,
}

impl<S: ReadSeek> Fat16Image<S> {
    /// Parse the boot block from `source` and take ownership of it.
    pub fn open(mut source: S) -> Result<Self> {
        let boot = BootBlock::parse(&mut source)?;
        Ok(Self { source, boot })
    }

    /// The parsed boot block.
    pub fn boot_block(&self) -> &BootBlock {
        &self.boot
    }

    /// Bytes per cluster, as derived from the boot block.
    pub fn bytes_per_cluster(&self) -> u32 {
        self.boot.bytes_per_cluster
    }

    /// Read up to `dest.len()` bytes starting at `byte_offset` within the
    /// cluster chain rooted at `start_cluster`. See
    /// [`cluster::read_from_cluster`] for the exact semantics.
    pub fn read_from_cluster(
        &mut self,
        dest: &mut [u8],
        byte_offset: u32,
        start_cluster: ClusterId,
    ) -> std::io::Result<u32> {
        let size = dest.len() as u32;
        cluster::read_from_cluster(&mut self.source, &self.boot, dest, byte_offset, start_cluster, size)
    }

    /// A fresh cursor over the root directory.
    pub fn root_entry(&self) -> Entry {
        Entry::root()
    }

    /// Advance `entry` to the next directory record. See
    /// [`dir::next_entry`] for the exact semantics.
    pub fn next_entry(&mut self, entry: &mut Entry) -> Result<bool> {
        dir::next_entry(&mut self.source, &self.boot, entry)
    }

    /// A fresh cursor over the subdirectory `parent` currently points at.
    /// Fails with [`fat16_core::Error::NotADirectory`] if it isn't one.
    pub fn first_entry_of(&self, parent: &Entry) -> Result<Entry> {
        dir::first_entry_of(parent)
    }
}
