//! Shells out to the built `jackc` binary the way the CLI's own users
//! would, so integration tests exercise the real driver rather than
//! calling `jack_core` in-process.

use std::{
    error::Error,
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Output},
};

const JACKC_PATH: &str = "./target/debug/jackc";
const OUTPUT_DIR: &str = "./output";

fn run_compiler(src_path: &Path, out_dir: &Path) -> Result<Output, io::Error> {
    Command::new(JACKC_PATH)
        .arg("compile")
        .arg(src_path)
        .arg("--out-dir")
        .arg(out_dir)
        .output()
}

/// Compiles `src_path` with the `jackc` binary and asserts the emitted
/// `.vm` text matches `expected_vm` exactly.
pub fn check_compilation(src_path: &Path, expected_vm: &str) -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(out_dir)?;

    let compile_output = run_compiler(src_path, out_dir)?;
    let compile_stderr = std::str::from_utf8(&compile_output.stderr)?;

    assert!(
        compile_output.status.success(),
        "jackc exited with status {:?}: {compile_stderr}",
        compile_output.status.code()
    );

    let vm_path: PathBuf = out_dir.join(src_path.with_extension("vm").file_name().unwrap());
    let actual_vm = fs::read_to_string(&vm_path)?;

    assert_eq!(actual_vm, expected_vm);

    Ok(())
}

/// Asserts that compiling `src_path` fails (a malformed program should
/// never produce `.vm` output).
pub fn check_failing_compilation(src_path: &Path) -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new(OUTPUT_DIR);
    fs::create_dir_all(out_dir)?;

    let compile_output = run_compiler(src_path, out_dir)?;

    assert!(
        !compile_output.status.success(),
        "jackc should have rejected {}",
        src_path.display()
    );

    Ok(())
}
