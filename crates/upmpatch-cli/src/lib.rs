use clap::{value_t, App, Arg};
use std::path::PathBuf;
use upmpatch::{PatchError, UpmPatch, SOURCE_UPM, TARGET_UPM};

pub fn read_args(name: &str, description: &str) -> clap::ArgMatches<'static> {
    App::new(name)
        .about(description)
        .arg(
            Arg::with_name("from")
                .long("from")
                .takes_value(true)
                .help("unitsPerEm value to look for (default 1000)"),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .takes_value(true)
                .help("unitsPerEm value to write (default 1024)"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .required(true),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use (defaults to patching INPUT in place)")
                .required(false),
        )
        .get_matches()
}

/// Input and output paths; the output is the input unless one was given.
pub fn file_args(matches: &clap::ArgMatches) -> (PathBuf, PathBuf) {
    let input = PathBuf::from(matches.value_of_os("INPUT").unwrap_or_default());
    let output = matches
        .value_of_os("OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| input.clone());
    (input, output)
}

fn upm_value(matches: &clap::ArgMatches, name: &str, default: u16) -> u16 {
    if matches.is_present(name) {
        value_t!(matches, name, u16).unwrap_or_else(|e| e.exit())
    } else {
        default
    }
}

pub fn upm_patch(matches: &clap::ArgMatches) -> Result<UpmPatch, PatchError> {
    UpmPatch::new(
        upm_value(matches, "from", SOURCE_UPM),
        upm_value(matches, "to", TARGET_UPM),
    )
}
