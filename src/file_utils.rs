use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Counters collected while flattening a directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Files moved into the destination
    pub moved: usize,

    /// Files that replaced a file of the same name in the destination,
    /// whether moved earlier in the run or already there
    pub overwritten: usize,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files whose name ends with `.extension` anywhere below `dir`.
    ///
    /// The order of the result follows the directory walk and is not sorted.
    /// Fails if `dir` does not exist or cannot be read.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let suffix = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry
                .with_context(|| format!("Failed to read directory entry under {:?}", dir.as_ref()))?;
            let path = entry.path();

            if path.is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Move `file` directly into `dest_dir`, replacing a file of the same name.
    ///
    /// Falls back to copy and delete when a rename is not possible, for
    /// example across file systems.
    pub fn move_file<P1: AsRef<Path>, P2: AsRef<Path>>(file: P1, dest_dir: P2) -> Result<PathBuf> {
        let file = file.as_ref();
        let name = file
            .file_name()
            .ok_or_else(|| anyhow!("Not a file path: {:?}", file))?;
        let target = dest_dir.as_ref().join(name);

        if let Err(rename_err) = fs::rename(file, &target) {
            debug!("Rename of {:?} failed ({}), copying instead", file, rename_err);
            fs::copy(file, &target)
                .with_context(|| format!("Failed to move {:?} to {:?}", file, target))?;
            fs::remove_file(file)
                .with_context(|| format!("Failed to remove {:?} after copying", file))?;
        }

        Ok(target)
    }

    /// Move every `.extension` file below `source` into `dest`, then empty `source`.
    ///
    /// Nested directories are not kept: all files land directly in `dest` and
    /// replace any file of the same name found there. Once all
    /// files are moved, `source` is deleted with everything left in it and
    /// recreated as an empty directory. A failure leaves whatever was moved so
    /// far in place.
    pub fn flatten_tree<P1: AsRef<Path>, P2: AsRef<Path>>(
        source: P1,
        dest: P2,
        extension: &str,
    ) -> Result<FlattenStats> {
        let source = source.as_ref();
        let dest = dest.as_ref();

        let files = Self::find_files(source, extension)?;
        Self::ensure_dir(dest)?;

        let mut stats = FlattenStats::default();
        for file in &files {
            // Covers earlier files of this run and files already in `dest`
            let replaces = file.file_name().is_some_and(|name| dest.join(name).exists());
            let target = Self::move_file(file, dest)?;
            if replaces {
                warn!("{:?} replaced an existing file {:?}", file, target);
                stats.overwritten += 1;
            }
            stats.moved += 1;
        }

        fs::remove_dir_all(source)
            .with_context(|| format!("Failed to remove directory tree: {:?}", source))?;
        fs::create_dir(source)
            .with_context(|| format!("Failed to recreate directory: {:?}", source))?;

        Ok(stats)
    }
}
