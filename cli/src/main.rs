use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use baz_idl_compiler::{compile, emit, emitter::base_name, BazError};

#[derive(Parser)]
#[command(name = "bazc")]
#[command(about = "Compile a Baz RPC contract into server/client/proto/service stubs", long_about = None)]
struct Cli {
    /// Input `.baz` contract file
    input: PathBuf,
}

fn run(cli: &Cli) -> Result<(), BazError> {
    // Read the whole contract up front
    let text = fs::read_to_string(&cli.input)?;
    let _program = compile(&text)?;

    let base = base_name(&cli.input).ok_or_else(|| {
        BazError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("cannot derive a base name from {}", cli.input.display()),
        ))
    })?;

    // Every artifact is rendered before the first write
    for file in emit(&base) {
        fs::write(&file.file_name, &file.contents)?;
        println!("Generated {}", file.file_name);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
