//! Rewrite the units-per-em value of a font file at the byte level.
//!
//! This does not parse the font. It looks for the `head` table signature
//! (magic number, flags, unitsPerEm) in the raw bytes and changes the
//! unitsPerEm of the first match, leaving the rest of the file alone.
mod error;
pub mod patch;

pub use crate::error::PatchError;
pub use crate::patch::{UpmPatch, HEAD_MAGIC, SOURCE_UPM, TARGET_UPM};

use crate::error::Result;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Reads the whole of a file into memory.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| PatchError::Read {
        source,
        path: path.to_path_buf(),
    })?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|source| PatchError::Read {
        source,
        path: path.to_path_buf(),
    })?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Writes `data` to a file, truncating whatever was there.
pub fn save<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|source| PatchError::Write {
        source,
        path: path.to_path_buf(),
    })?;
    file.write_all(data).map_err(|source| PatchError::Write {
        source,
        path: path.to_path_buf(),
    })?;
    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Loads `input`, applies `patch` and saves the result to `output`.
///
/// `output` is written even when nothing matched, so passing the same path
/// twice rewrites the file in place. Returns the offset of the rewritten
/// signature.
pub fn patch_file<P, Q>(input: P, output: Q, patch: &UpmPatch) -> Result<Option<usize>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let mut data = load(input)?;
    let found = patch.apply(&mut data);
    match found {
        Some(offset) => log::info!(
            "Changed unitsPerEm from {} to {} at offset {:#x}",
            patch.from(),
            patch.to(),
            offset
        ),
        None => log::warn!(
            "No head table with unitsPerEm {} found in {}; leaving it unchanged",
            patch.from(),
            input.display()
        ),
    }
    save(output, &data)?;
    Ok(found)
}
