//! # fat16-fs
//!
//! A read-only decoder for the FAT16 on-disk file-system format.
//!
//! Given an opaque, byte-addressable, random-access image — a disk image
//! file, a raw device, or any source exposing [`Read`](std::io::Read) +
//! [`Seek`](std::io::Seek) — this crate exposes the image's boot-block
//! geometry, enumerates directory entries (including reconstructed long
//! filenames), and streams the byte content of any file by walking its
//! cluster chain.
//!
//! The pieces, leaves first:
//!
//! - [`boot::BootBlock`] decodes the 512-byte boot sector and derives region
//!   offsets and cluster size.
//! - [`chain`] walks the File Allocation Table as a singly-linked chain of
//!   16-bit cluster indices.
//! - [`cluster`] turns a `(cluster, offset, length)` triple into the
//!   sequence of physical reads needed to satisfy it, following chain links
//!   across cluster boundaries.
//! - [`record`] decodes the raw 32-byte directory slots (8.3 records and
//!   long-filename records) and reconstructs long filenames.
//! - [`dir`] is the stateful directory iterator built on top of the above.
//! - [`Fat16Image`] is the facade that composes all of it.
//!
//! What this crate is *not*: a host-filesystem extraction tool, a path
//! parser, a CLI, or a writer. Those are external collaborators — see
//! `demos/fat16-inspect` for a minimal one built on this crate. FAT12/FAT32
//! variants and disk caching are non-goals; this reads FAT16 and only
//! FAT16.

pub mod boot;
pub mod chain;
pub mod cluster;
pub mod dir;
pub mod image;
pub mod name;
pub mod record;
mod util;

pub use boot::BootBlock;
pub use chain::ClusterId;
pub use dir::Entry;
pub use fat16_core::{Error, ReadSeek, Result};
pub use image::Fat16Image;
pub use record::EntryKind;
