//! # fat16-core
//!
//! Shared plumbing for the FAT16 reader workspace: the error type, the
//! `ReadSeek` contract an image source must satisfy, and the overflow- and
//! bounds-checked arithmetic helpers used when turning untrusted boot-block
//! fields into region offsets and allocation sizes.
//!
//! Nothing here is specific to the FAT16 on-disk layout itself — that lives
//! in `fat16-fs`. This crate exists because the geometry math and the
//! security posture around it are exactly the kind of thing worth sharing if
//! a second on-disk format reader ever joins this workspace.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fat16_core::{ReadSeek, Result};
//!
//! fn read_boot_sector(source: &mut dyn ReadSeek) -> Result<[u8; 512]> {
//!     use std::io::{Read, Seek, SeekFrom};
//!     source.seek(SeekFrom::Start(0))?;
//!     let mut buf = [0u8; 512];
//!     source.read_exact(&mut buf)?;
//!     Ok(buf)
//! }
//! ```

pub mod error;
pub mod security;
pub mod traits;

pub use error::{Error, Result};
pub use security::*;
pub use traits::ReadSeek;
