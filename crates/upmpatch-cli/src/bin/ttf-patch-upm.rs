/*
Make a font's units-per-em consistent with a companion family by rewriting
the unitsPerEm field of its head table in the raw bytes. Used to bring
Source Han Sans (1000) in line with Gen Jyuu Gothic (1024).
*/
use upmpatch_cli::{file_args, read_args, upm_patch};

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );
    let matches = read_args(
        "ttf-patch-upm",
        "Rewrites the unitsPerEm of a font file without parsing it",
    );
    let (input, output) = file_args(&matches);

    let result = upm_patch(&matches)
        .and_then(|patch| upmpatch::patch_file(&input, &output, &patch));
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
