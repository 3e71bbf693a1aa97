use clap::{ArgAction, Parser};
use env_logger::Env;
use hashwalk::{Algorithm, Options, Printer, E};
use log::{debug, warn};
use std::{io, path::PathBuf, process::ExitCode, sync::Arc};

/// Hash every file beneath a directory with a pool of workers
#[derive(Parser, Debug)]
#[command(
    name = "hashwalk",
    version,
    about = "Hash every file beneath a directory with a pool of workers",
    long_about = "Walks ROOT recursively and hashes every file with a fixed pool of workers.\n\n\
                  Prints `Hashing: <path>` when a file is found and `<digest>  <path>` (or\n\
                  `ERR: <path> (<error>)`) as soon as the file is done. Results come in any order.",
    after_help = "EXAMPLES:\n    \
        hashwalk ./testdata\n    \
        hashwalk /data -w 16 -a blake3 -q\n    \
        hashwalk . --exclude .git --exclude '*.tmp'"
)]
struct CliArgs {
    /// Directory (or single file) to hash
    #[arg(value_name = "ROOT", default_value = ".", env = "HASHWALK_ROOT")]
    root: PathBuf,

    /// Number of hashing workers (number of cores if not set)
    #[arg(short = 'w', long, value_name = "NUM", env = "HASHWALK_WORKERS")]
    workers: Option<usize>,

    /// Hashing algorithm: sha256 or blake3
    #[arg(short = 'a', long, default_value = "sha256", value_name = "NAME")]
    algorithm: Algorithm,

    /// Capacity of the work queue and of the result stream (0 - direct hand-off)
    #[arg(long, default_value_t = 0, value_name = "NUM")]
    capacity: usize,

    /// Re-read a file up to NUM times after a transient I/O error
    #[arg(long, default_value_t = 0, value_name = "NUM")]
    retries: usize,

    /// Skip paths matching a glob pattern (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Don't print `Hashing: <path>` lines
    #[arg(short = 'q', long)]
    quiet: bool,

    /// More logs on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), E> {
    let mut opt = Options::new();
    opt.root(&args.root)
        .capacity(args.capacity)
        .algorithm(args.algorithm)
        .retries(args.retries);
    if let Some(workers) = args.workers {
        opt.workers(workers)?;
    }
    for pattern in args.exclude.iter() {
        opt.exclude(pattern)?;
    }
    let pipeline = opt.pipeline()?;
    let abort = pipeline.breaker().breaker();
    if let Err(err) = ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        abort();
    }) {
        warn!("Fail to set signal handler: {err}");
    }
    let printer = Arc::new(Printer::new(io::stdout()).announce(!args.quiet));
    let summary = pipeline.run(printer)?;
    if summary.failed > 0 {
        warn!(
            "{} of {} files could not be hashed",
            summary.failed, summary.discovered
        );
    }
    debug!(
        "{} files hashed by {} workers: {:?}",
        summary.hashed,
        pipeline.workers(),
        summary.processed
    );
    Ok(())
}
