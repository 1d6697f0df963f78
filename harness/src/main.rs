//! Command-line entry point for the test-suite harness.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use harness::core::directives::{CnxDdosRequest, Directives, IndexRange, ModeRequests};
use harness::core::registry::Registry;
use harness::core::selection;
use harness::exit_codes;
use harness::io::manifest::SuiteFile;
use harness::logging::{self, Diagnostics};
use harness::run::run_suite;

#[derive(Parser)]
#[command(
    name = "harness",
    version,
    about = "Deterministic test-suite orchestration harness"
)]
struct Cli {
    /// Tests to run; when given, every test not listed is excluded.
    #[arg(value_name = "TEST")]
    tests: Vec<String>,

    /// Do not run the named tests.
    #[arg(short = 'x', long = "exclude", value_name = "NAME", num_args = 1..)]
    exclude: Vec<String>,

    /// Only run test numbers in the inclusive range [FIRST, LAST].
    #[arg(short = 'o', long = "only", num_args = 2, value_names = ["FIRST", "LAST"])]
    only: Option<Vec<usize>>,

    /// Run stress for the given number of minutes.
    #[arg(
        short = 's',
        long = "stress",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    stress: Option<u32>,

    /// Run fuzz for the given number of minutes.
    #[arg(
        short = 'f',
        long = "fuzz",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    fuzz: Option<u32>,

    /// Run connection stress for MINUTES minutes with CONNECTIONS connections.
    #[arg(
        short = 'c',
        long = "cnx-stress",
        num_args = 2,
        value_names = ["MINUTES", "CONNECTIONS"]
    )]
    cnx_stress: Option<Vec<u32>>,

    /// Run connection ddos for PACKETS packets at INTERVAL_USEC intervals,
    /// logging into DIR ("-" for no logs).
    #[arg(
        short = 'd',
        long = "cnx-ddos",
        num_args = 3,
        value_names = ["PACKETS", "INTERVAL_USEC", "DIR"]
    )]
    cnx_ddos: Option<Vec<String>>,

    /// Run the corrupt-file fuzzer for the given number of rounds.
    #[arg(
        short = 'F',
        long = "cf-fuzz",
        value_name = "ROUNDS",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    cf_fuzz: Option<u32>,

    /// Disable diagnostic output for the initial pass.
    #[arg(short = 'n', long = "disable-debug")]
    disable_debug: bool,

    /// Retry failed tests with diagnostic output re-enabled.
    #[arg(short = 'r', long = "retry-failed")]
    retry_failed: bool,

    /// Path to the suite manifest.
    #[arg(long = "suite", value_name = "PATH", default_value = "suite.toml")]
    suite: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let mut diagnostics = logging::init(cli.disable_debug);
    std::process::exit(run(cli, &mut diagnostics));
}

fn run(cli: Cli, diagnostics: &mut Diagnostics) -> i32 {
    let directives = match directives_from(&cli) {
        Ok(directives) => directives,
        Err(err) => {
            eprintln!("{err:#}");
            return exit_codes::USAGE;
        }
    };

    let registry = match SuiteFile::load(&cli.suite) {
        Ok(suite) => suite.into_registry(),
        Err(err) => {
            eprintln!("{err:#}");
            return exit_codes::USAGE;
        }
    };

    let selection = match selection::resolve(&registry, &directives) {
        Ok(selection) => selection,
        Err(err) => {
            eprintln!("{err}");
            print_valid_names(&registry);
            return exit_codes::USAGE;
        }
    };

    let mut out = std::io::stdout().lock();
    match run_suite(&registry, selection, &directives, diagnostics, &mut out) {
        Ok(verdict) if verdict.overall_failed => exit_codes::TESTS_FAILED,
        Ok(_) => exit_codes::OK,
        Err(err) => {
            eprintln!("{err:#}");
            exit_codes::TESTS_FAILED
        }
    }
}

/// Translate parsed flags into the directive set the core consumes.
fn directives_from(cli: &Cli) -> Result<Directives> {
    let range = match cli.only.as_deref() {
        Some([first, last]) => IndexRange {
            first: *first,
            last: *last,
        },
        Some(_) => bail!("--only takes exactly two bounds"),
        None => IndexRange::default(),
    };

    let cnx_stress = match cli.cnx_stress.as_deref() {
        Some([minutes, connections]) => {
            if *minutes == 0 {
                bail!("cnx stress minutes must be > 0");
            }
            Some((*minutes, *connections))
        }
        Some(_) => bail!("--cnx-stress takes exactly two arguments"),
        None => None,
    };

    let cnx_ddos = match cli.cnx_ddos.as_deref() {
        Some([packets, interval, dir]) => {
            let packets: u32 = packets
                .parse()
                .with_context(|| format!("cnx ddos packets: {packets}"))?;
            if packets == 0 {
                bail!("cnx ddos packets must be > 0");
            }
            let interval_usec: u32 = interval
                .parse()
                .with_context(|| format!("cnx ddos interval: {interval}"))?;
            Some(CnxDdosRequest {
                packets,
                interval_usec,
                log_dir: dir.clone(),
            })
        }
        Some(_) => bail!("--cnx-ddos takes exactly three arguments"),
        None => None,
    };

    Ok(Directives {
        excluded: cli.exclude.clone(),
        allow_list: cli.tests.clone(),
        range,
        modes: ModeRequests {
            stress_minutes: cli.stress,
            fuzz_minutes: cli.fuzz,
            cnx_stress,
            cnx_ddos,
            cf_fuzz_rounds: cli.cf_fuzz,
        },
        disable_debug: cli.disable_debug,
        retry_failed: cli.retry_failed,
    })
}

/// List the registry names on stderr, four per line, the way the usage
/// text does for a fixed table.
fn print_valid_names(registry: &Registry) {
    let stderr = std::io::stderr();
    let mut err = stderr.lock();
    let _ = writeln!(err, "Valid test names are:");
    let names: Vec<&str> = registry.names().collect();
    for chunk in names.chunks(4) {
        let _ = writeln!(err, "    {}", chunk.join(", "));
    }
}
