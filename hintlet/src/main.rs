use std::{
    io::Write,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use hintlet::{
    discover, run_case, CommandEngine, Fixture, FontKind, HarnessError, TtxDump, UnifiedDiffer,
};

#[derive(clap::Parser, Debug)]
#[command(about = "Regression checks for autohinter output")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Hint every fixture under the sample tree and diff the results
    Check {
        /// Root of the fixture tree
        #[arg(long, default_value = "test-data")]
        fixtures: PathBuf,
        /// Autohinter executable to drive
        #[arg(long, default_value = "otfautohint")]
        engine: PathBuf,
        /// ttx executable used to serialize 'CFF ' tables
        #[arg(long, default_value = "ttx")]
        ttx: PathBuf,
        /// Print the path for each fixture as it is processed
        #[arg(long)]
        print_paths: bool,
        /// Keep the per-fixture scratch directories around for inspection
        #[arg(long)]
        keep_outputs: bool,
        /// End the process immediately if a comparison fails
        #[arg(long)]
        exit_on_fail: bool,
    },
}

#[allow(clippy::explicit_write)]
fn main() {
    env_logger::init();

    use clap::Parser as _;
    let args = Args::parse_from(wild::args());

    match args.command {
        Command::Check {
            fixtures,
            engine,
            ttx,
            print_paths,
            keep_outputs,
            exit_on_fail,
        } => {
            let engine = CommandEngine::new(engine);
            let dump = TtxDump::new(ttx);
            let differ = UnifiedDiffer::ignoring(&["checkSumAdjustment"]);

            let mut cases = discover(&fixtures, FontKind::Ufo);
            cases.extend(discover(&fixtures, FontKind::Otf));
            if cases.is_empty() {
                log::warn!("no fixtures found under {fixtures:?}");
            }

            let ok = AtomicBool::new(true);
            cases.par_iter().for_each(|fixture| {
                if print_paths {
                    writeln!(std::io::stdout(), "[{:?}]", fixture.path).unwrap();
                }
                if let Err(err) = run_one(fixture, &engine, &dump, &differ, keep_outputs) {
                    writeln!(std::io::stderr(), "[{:?}] {err}", fixture.path).unwrap();
                    ok.store(false, Ordering::Release);
                    if exit_on_fail {
                        std::process::exit(1);
                    }
                }
            });
            if !ok.load(Ordering::Acquire) {
                std::process::exit(1);
            }
        }
    }
}

#[allow(clippy::explicit_write)]
fn run_one(
    fixture: &Fixture,
    engine: &CommandEngine,
    dump: &TtxDump,
    differ: &UnifiedDiffer,
    keep_outputs: bool,
) -> Result<(), HarnessError> {
    let scratch = tempfile::Builder::new().prefix("hintlet").tempdir()?;
    let result = run_case(fixture, engine, dump, differ, scratch.path());
    if keep_outputs {
        let kept = scratch.into_path();
        writeln!(
            std::io::stdout(),
            "[{:?}] outputs kept in {kept:?}",
            fixture.path
        )
        .unwrap();
    }
    result
}
