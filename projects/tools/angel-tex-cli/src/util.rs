use crate::error::CliError;
use bytesize::ByteSize;
#[cfg(feature = "multithreaded")]
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Recursively visits directories and collects the files inside them.
///
/// Directories or entries which cannot be read are skipped.
pub fn find_all_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let dir_entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(()),
    };

    for entry in dir_entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue, // Skip problematic entries, e.g. those without access.
        };

        let path = entry.path();
        if path.is_dir() {
            find_all_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Resolves the files an `--input` argument refers to.
///
/// A file is returned as is, even if `accept` rejects it. Directories are walked recursively
/// and only files accepted by `accept` are kept, in sorted order.
pub fn collect_inputs(input: &Path, accept: fn(&Path) -> bool) -> Result<Vec<PathBuf>, CliError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(CliError::MissingInput(input.to_path_buf()));
    }

    let mut files = Vec::new();
    find_all_files(input, &mut files)?;
    files.retain(|path| accept(path));
    files.sort();
    Ok(files)
}

/// Where the output for `file` goes.
///
/// Files found inside an input directory keep their path relative to it.
pub fn output_path(input: &Path, file: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let relative = match file.strip_prefix(input) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => Path::new(file.file_name().unwrap_or(file.as_os_str())),
    };
    output_dir.join(relative).with_extension(extension)
}

/// Whether the path has a `.tex` or `.xtex` extension.
pub fn is_texture_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            extension.eq_ignore_ascii_case("tex") || extension.eq_ignore_ascii_case("xtex")
        })
}

/// Whether the path has the extension of an image format that can be read.
pub fn is_image_path(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Canonicalizes a CLI path argument, creating the directory if it doesn't exist.
pub fn canonicalize_cli_path(value: &str) -> Result<PathBuf, String> {
    let path = Path::new(value);

    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| format!("Failed to create directory: {e}"))?;
    }

    fs::canonicalize(path).map_err(|e| format!("Invalid path: {e}"))
}

/// Creates the parent directory of `path` if needed.
pub fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Totals of a [`process_files`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_written: u64,
}

impl ProcessSummary {
    pub fn print(&self, action: &str, elapsed: Duration) {
        println!("\n=== {action} Complete ===");
        println!("Files: {} ok, {} failed", self.succeeded, self.failed);
        println!("Time taken: {elapsed:.2?}");
        println!("Data written: {}", ByteSize(self.bytes_written));
    }
}

/// Runs `process` on every file, in parallel with the `multithreaded` feature.
///
/// `process` returns the number of bytes written. Failures are printed to stderr and counted.
pub fn process_files<F>(files: &[PathBuf], process: F) -> ProcessSummary
where
    F: Fn(&Path) -> Result<u64, CliError> + Sync + Send,
{
    let failed = AtomicUsize::new(0);
    let bytes_written = AtomicU64::new(0);

    let run = |path: &PathBuf| match process(path) {
        Ok(written) => {
            bytes_written.fetch_add(written, Ordering::Relaxed);
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            failed.fetch_add(1, Ordering::Relaxed);
        }
    };

    #[cfg(feature = "multithreaded")]
    files.par_iter().for_each(run);
    #[cfg(not(feature = "multithreaded"))]
    files.iter().for_each(run);

    let failed = failed.into_inner();
    ProcessSummary {
        succeeded: files.len() - failed,
        failed,
        bytes_written: bytes_written.into_inner(),
    }
}
