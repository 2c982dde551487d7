//! File primitives with explicit paths: atomic writes, artifact copies, and lookups.

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use globset::Glob;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::domain::AppError;

/// Write `contents` to a temporary sibling of `destination`, set `mode`, then
/// rename it into place.
pub fn write_atomic(destination: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let parent = destination.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", destination.display()),
        )
    })?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    fs::set_permissions(file.path(), Permissions::from_mode(mode))?;
    file.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

/// Copy a prepackaged artifact, verifying it against `expected_sha256` when given.
pub fn copy_artifact(
    source: &Path,
    destination: &Path,
    expected_sha256: Option<&str>,
) -> Result<(), AppError> {
    fs::copy(source, destination).map_err(|err| {
        AppError::Io(io::Error::new(
            err.kind(),
            format!("copy {} -> {}: {err}", source.display(), destination.display()),
        ))
    })?;
    fs::set_permissions(destination, Permissions::from_mode(0o644))?;

    if let Some(expected) = expected_sha256 {
        let actual = sha256_hex(destination)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(AppError::ChecksumMismatch {
                path: destination.to_path_buf(),
                expected: expected.to_ascii_lowercase(),
                actual,
            });
        }
    }
    Ok(())
}

/// Lowercase hex SHA-256 of a file.
pub fn sha256_hex(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Names of regular files directly inside `dir` matching the glob `pattern`, sorted.
pub fn find_matching(dir: &Path, pattern: &str) -> Result<Vec<String>, AppError> {
    let matcher = Glob::new(pattern)
        .map_err(|err| AppError::InternalError(format!("invalid glob '{pattern}': {err}")))?
        .compile_matcher();

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && matcher.is_match(name)
        {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Remove a file. Returns `false` when it was already absent.
pub fn remove_if_present(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
