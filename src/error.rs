use snafu::Snafu;
use std::{io, path::PathBuf};

#[derive(Debug, Snafu)]
pub enum PatchError {
    #[snafu(display("Could not read font file {}: {}", path.display(), source))]
    Read { source: io::Error, path: PathBuf },

    #[snafu(display("Could not write font file {}: {}", path.display(), source))]
    Write { source: io::Error, path: PathBuf },

    #[snafu(display("Could not compile head table signature: {}", source))]
    BadPattern { source: regex::Error },
}

pub type Result<T, E = PatchError> = std::result::Result<T, E>;
