//! fat16-inspect — a small CLI exercising the FAT16 decoder: boot-block
//! geometry, directory listings, and raw file extraction.
//!
//! This binary is the one place in the workspace allowed to open a real
//! file and parse a path string; `fat16-fs` itself never does either.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use fat16_fs::{Entry, EntryKind, Fat16Image};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

type Image = Fat16Image<BufReader<File>>;

#[derive(Parser)]
#[command(name = "fat16-inspect", version, about = "Inspect FAT16 disk images")]
struct Cli {
    /// Path to the disk image.
    image: PathBuf,

    /// Tracing log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print boot-block geometry and derived region offsets.
    Info,
    /// List a directory's entries. Omit `path` for the root directory.
    Ls {
        #[arg(default_value = "")]
        path: String,
    },
    /// Write a file's bytes to stdout.
    Cat { path: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let file =
        File::open(&cli.image).with_context(|| format!("opening {}", cli.image.display()))?;
    let mut image = Fat16Image::open(BufReader::new(file))?;

    match cli.command {
        Command::Info => print_info(&image),
        Command::Ls { path } => print_listing(&mut image, &path)?,
        Command::Cat { path } => cat_file(&mut image, &path)?,
    }

    Ok(())
}

fn print_info(image: &Image) {
    let boot = image.boot_block();
    println!("bytes_per_block:        {}", boot.bytes_per_block);
    println!(
        "blocks_per_allocation_unit: {}",
        boot.blocks_per_allocation_unit
    );
    println!("reserved_blocks:        {}", boot.reserved_blocks);
    println!("num_fats:               {}", boot.num_fats);
    println!("root_dir_entries:       {}", boot.root_dir_entries);
    println!("blocks_per_fat:         {}", boot.blocks_per_fat);
    println!();
    println!("fat_region_start:       {}", boot.fat_region_start);
    println!("root_dir_region_start:  {}", boot.root_dir_region_start);
    println!("data_region_start:      {}", boot.data_region_start);
    println!("bytes_per_cluster:      {}", boot.bytes_per_cluster);
}

fn print_listing(image: &mut Image, path: &str) -> Result<()> {
    let mut entry = navigate(image, path)?;
    while image.next_entry(&mut entry)? {
        let record = entry.record();
        if !matches!(record.kind(), EntryKind::Normal) {
            continue;
        }
        let name = fat16_fs::name::display_lossy(&entry.filename());
        let marker = if record.is_directory() { "/" } else { "" };
        println!("{:>10}  {}{}", record.file_size, name, marker);
    }
    Ok(())
}

fn cat_file(image: &mut Image, path: &str) -> Result<()> {
    let (parent_path, file_name) = path.rsplit_once('/').unwrap_or(("", path));
    let mut dir = navigate(image, parent_path)?;

    let mut found = None;
    while image.next_entry(&mut dir)? {
        let record = dir.record();
        if !matches!(record.kind(), EntryKind::Normal) || record.is_directory() {
            continue;
        }
        if fat16_fs::name::display_lossy(&dir.filename()).eq_ignore_ascii_case(file_name) {
            found = Some((record.starting_cluster(), record.file_size));
            break;
        }
    }
    let (cluster, size) = found.ok_or_else(|| anyhow!("file not found: {path}"))?;

    let mut remaining = size;
    let mut offset = 0u32;
    let mut buf = vec![0u8; image.bytes_per_cluster() as usize];
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u32);
        let got = image.read_from_cluster(&mut buf[..chunk as usize], offset, cluster)?;
        if got == 0 {
            break;
        }
        out.write_all(&buf[..got as usize])?;
        offset += got;
        remaining -= got;
    }
    Ok(())
}

/// Walk a slash-separated path from the root, descending into each named
/// subdirectory in turn. An empty path returns a cursor over the root
/// directory itself.
fn navigate(image: &mut Image, path: &str) -> Result<Entry> {
    let mut current = image.root_entry();

    for component in path.split('/').filter(|c| !c.is_empty()) {
        let mut matched = false;
        while image.next_entry(&mut current)? {
            if !current.is_recursable_directory() {
                continue;
            }
            if fat16_fs::name::display_lossy(&current.filename()).eq_ignore_ascii_case(component)
            {
                matched = true;
                break;
            }
        }
        if !matched {
            return Err(anyhow!("path component not found: {component}"));
        }
        current = image.first_entry_of(&current)?;
    }

    Ok(current)
}
