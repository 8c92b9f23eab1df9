use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;
use scsh::config::ConfigLoader;
use scsh::repl::Repl;
use scsh::shell::Shell;

fn main() -> ExitCode {
    // Logging stays off unless RUST_LOG asks for it
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("scsh: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<i32> {
    let mut args = std::env::args_os().skip(1);
    let script = args.next();
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let config = ConfigLoader::load().context("failed to load config")?;
    let mut shell = Shell::new(config);

    let code = match script {
        None => Repl::new(io::stdin().lock(), true).run(&mut shell),
        Some(path) => {
            let file = File::open(&path).with_context(|| path.to_string_lossy().into_owned())?;
            Repl::new(BufReader::new(file), false).run(&mut shell)
        }
    };
    Ok(code)
}
