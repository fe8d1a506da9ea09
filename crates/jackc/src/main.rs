//! # jackc
//!
//! Command-line driver for the Jack-to-VM compiler. Finds `.jack` source
//! files, hands each one to [`jack_core`], and writes the resulting VM
//! text next to it (or into `--out-dir`). Argument parsing, file
//! discovery, and diagnostic rendering live here; the grammar and codegen
//! live in `jack_core`.

mod cli;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{error, info};

use cli::{Cli, CompileArgs};
use jack_core::CompileError;

fn main() -> Result<()> {
    let args = Cli::init();

    simple_logger::init_with_level(args.verbosity.into())
        .context("failed to initialize logger")?;

    let cli::Commands::Compile(compile_args) = args.command;
    run_compile(compile_args)
}

fn run_compile(args: CompileArgs) -> Result<()> {
    let path = fs::canonicalize(&args.path)
        .with_context(|| format!("cannot find '{}'", args.path.display()))?;

    let sources = discover_sources(&path)?;
    if sources.is_empty() {
        bail!("no .jack files found at '{}'", path.display());
    }

    let mut failures = 0usize;

    for source_path in sources {
        if let Err(err) = compile_one(&source_path, &args) {
            error!("{} failed to compile:\n{err}", source_path.display());
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} file(s) failed to compile");
    }

    Ok(())
}

/// A single `.jack` file, or every `.jack` file directly inside a directory.
fn discover_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(path).with_context(|| format!("cannot read '{}'", path.display()))? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.extension().and_then(|ext| ext.to_str()) == Some("jack") {
            found.push(entry_path);
        }
    }
    found.sort();
    Ok(found)
}

fn compile_one(source_path: &Path, args: &CompileArgs) -> Result<(), CompileError> {
    info!("compiling {}", source_path.display());
    let source = fs::read_to_string(source_path)?;

    if args.dump_tokens {
        return dump_tokens(&source, args.json);
    }

    if args.dump_symbols {
        return dump_symbols(&source);
    }

    let vm = jack_core::compile(&source)?;
    let out_path = output_path(source_path, args.out_dir.as_deref());
    fs::write(&out_path, vm)?;
    info!("wrote {}", out_path.display());
    Ok(())
}

fn dump_tokens(source: &str, json: bool) -> Result<(), CompileError> {
    let tokens = jack_core::lexer::lex(source)?;
    if json {
        let rendered = serde_json::to_string_pretty(&tokens)
            .expect("tokens always serialize to valid JSON");
        println!("{rendered}");
    } else {
        for token in &tokens {
            println!("{token}");
        }
    }
    Ok(())
}

fn dump_symbols(source: &str) -> Result<(), CompileError> {
    let (_, symbols, class_name) = jack_core::compile_with_symbols(source)?;
    println!("class {class_name}:\n{symbols:#?}");
    Ok(())
}

fn output_path(source_path: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = source_path.with_extension("vm");
    match out_dir {
        Some(dir) => dir.join(file_name.file_name().expect("source path has a file name")),
        None => file_name,
    }
}
