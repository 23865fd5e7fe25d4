use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use rand::Rng;
use rand::distributions::Alphanumeric;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::PackageError;

const ARCHIVE_NAME_LENGTH: usize = 15;

/// An uploadable artifact. A temporary file must be deleted by whoever
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub path: PathBuf,
    pub is_temporary: bool,
}

/// Passes a regular file through untouched; zips a directory into a new
/// randomly named archive under `out_dir`.
pub async fn package_into(path: &Path, out_dir: &Path) -> Result<PackageFile, PackageError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| PackageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if !metadata.is_dir() {
        return Ok(PackageFile {
            path: path.to_path_buf(),
            is_temporary: false,
        });
    }

    let archive = out_dir.join(format!("{}.zip", random_file_name(ARCHIVE_NAME_LENGTH)));
    let source = path.to_path_buf();
    let target = archive.clone();

    tokio::task::spawn_blocking(move || {
        let result = zip_directory(&source, &target);
        if result.is_err() {
            let _ = fs::remove_file(&target);
        }
        result
    })
    .await??;

    tracing::debug!(
        source = %path.display(),
        archive = %archive.display(),
        "packaged directory"
    );

    Ok(PackageFile {
        path: archive,
        is_temporary: true,
    })
}

fn zip_directory(directory: &Path, archive: &Path) -> Result<(), PackageError> {
    let read_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| PackageError::Read { path, source }
    };

    // Keep the last component as given so a symlinked directory is archived
    // under the link's name.
    let mut root = std::path::absolute(directory).map_err(read_err(directory))?;
    if root.file_name().is_none() {
        root = fs::canonicalize(&root).map_err(read_err(directory))?;
    }
    let base = root.parent().unwrap_or(&root).to_path_buf();

    // Walk before the archive exists, so an output directory inside the
    // packaged tree never picks up the archive itself.
    let mut entries = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|e| PackageError::Read {
            path: e.path().unwrap_or(&root).to_path_buf(),
            source: e.into(),
        })?;
        let is_dir = entry.depth() == 0 || entry.file_type().is_dir();
        entries.push((entry.into_path(), is_dir));
    }

    let file = File::create(archive).map_err(|source| PackageError::Write {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default();

    for (path, is_dir) in entries {
        let name = archive_path(&path, &base);
        if is_dir {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut input = File::open(&path).map_err(read_err(&path))?;
            io::copy(&mut input, &mut zip).map_err(read_err(&path))?;
        }
    }

    let mut writer = zip.finish()?;
    writer.flush().map_err(|source| PackageError::Write {
        path: archive.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// The entry name for `path`: relative to `base`, joined with `/` whatever
/// the host separator is.
fn archive_path(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn random_file_name(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
