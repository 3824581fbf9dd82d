//! `iosched`: replay an I/O request file against a disk scheduling policy
//!
//! ```text
//! iosched [-v] [-q] [-f] [-s<N|S|L|C|F>] [--json] [--admit-one-per-tick] inputfile
//! iosched --generate <count> [--seed <n>] [--rate <lambda>] [--max-track <track>]
//! ```
//!
//! The second form writes a synthetic request file instead of simulating.
//!
//! Simulation output goes to stdout. Developer diagnostics go to stderr
//! through `tracing`, filtered by `RUST_LOG` (default `warn`).

mod error;
mod input;
mod output;

use clap::{Arg, ArgAction, ArgMatches, Command};
use iosched_core_rs::{
    AdmissionMode, PolicyKind, RngManager, SimulationConfig, Simulator, WorkloadConfig,
    WorkloadGenerator,
};
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::output::TraceFlags;

/// What the invocation produces
#[derive(Debug, Clone, PartialEq)]
enum Task {
    /// Replay a request file
    Simulate { inputfile: String },
    /// Write a synthetic request file to stdout
    Generate { workload: WorkloadConfig, seed: u64 },
}

/// Everything the command line decides
#[derive(Debug, Clone, PartialEq)]
struct Options {
    flags: TraceFlags,
    policy: PolicyKind,
    json: bool,
    admission: AdmissionMode,
    task: Task,
}

/// getopt-style surface: repeated flags are accepted (the last `-s` wins)
/// and there is no implicit `-h`/`-V`
fn build_command() -> Command {
    Command::new("iosched")
        .about("Disk I/O scheduling simulator")
        .args_override_self(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Print the add/issue/finish trace"),
        )
        .arg(
            Arg::new("queue")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Print the queue scanned at each dispatch"),
        )
        .arg(
            Arg::new("flook")
                .short('f')
                .action(ArgAction::SetTrue)
                .help("Print both FLOOK queues at each dispatch"),
        )
        .arg(
            Arg::new("scheduler")
                .short('s')
                .value_name("ALGO")
                .num_args(1)
                .help("Scheduling policy: N (FCFS), S (SSTF), L (LOOK), C (CLOOK), F (FLOOK)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the report as JSON instead of the text summary"),
        )
        .arg(
            Arg::new("admit_one_per_tick")
                .long("admit-one-per-tick")
                .action(ArgAction::SetTrue)
                .help("Admit at most one arrived request per tick"),
        )
        .arg(
            Arg::new("generate")
                .long("generate")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(usize))
                .help("Write COUNT synthetic requests instead of simulating"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .default_value("1")
                .help("Generator seed"),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .value_name("LAMBDA")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.1")
                .help("Expected arrivals per tick"),
        )
        .arg(
            Arg::new("max_track")
                .long("max-track")
                .value_parser(clap::value_parser!(u32))
                .default_value("199")
                .help("Highest generated track; tracks start at 0"),
        )
        .arg(Arg::new("inputfile").index(1).help("Request file"))
}

fn parse_args<I, T>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command()
        .try_get_matches_from(args)
        .map_err(|err| CliError::Usage {
            reason: err.to_string(),
        })?;

    let policy = match matches.get_one::<String>("scheduler") {
        Some(spec) => spec.parse::<PolicyKind>()?,
        None => PolicyKind::default(),
    };
    let task = match matches.get_one::<usize>("generate") {
        Some(&num_requests) => generate_task(&matches, num_requests)?,
        None => Task::Simulate {
            inputfile: matches
                .get_one::<String>("inputfile")
                .cloned()
                .ok_or_else(|| CliError::Usage {
                    reason: "missing inputfile\n".to_string(),
                })?,
        },
    };
    let admission = if matches.get_flag("admit_one_per_tick") {
        AdmissionMode::OnePerTick
    } else {
        AdmissionMode::AllDue
    };

    Ok(Options {
        flags: TraceFlags {
            verbose: matches.get_flag("verbose"),
            queue: matches.get_flag("queue"),
            flook: matches.get_flag("flook"),
        },
        policy,
        json: matches.get_flag("json"),
        admission,
        task,
    })
}

fn generate_task(matches: &ArgMatches, num_requests: usize) -> Result<Task, CliError> {
    let rate = matches.get_one::<f64>("rate").copied().unwrap_or(0.1);
    if !(rate.is_finite() && rate > 0.0) {
        return Err(CliError::Usage {
            reason: format!("--rate must be a positive number, got {rate}\n"),
        });
    }
    let max_track = matches.get_one::<u32>("max_track").copied().unwrap_or(199);

    Ok(Task::Generate {
        workload: WorkloadConfig {
            num_requests,
            rate_per_tick: rate,
            track_range: (0, i64::from(max_track)),
            start_tick: 0,
        },
        seed: matches.get_one::<u64>("seed").copied().unwrap_or(1),
    })
}

/// Load, simulate and render; returns the complete stdout text
///
/// Nothing is rendered unless the input is valid and the run completes.
fn run(options: &Options) -> Result<String, CliError> {
    let inputfile = match &options.task {
        Task::Simulate { inputfile } => inputfile,
        Task::Generate { workload, seed } => {
            let mut rng = RngManager::new(*seed);
            let pairs = WorkloadGenerator::new(workload.clone()).generate_pairs(&mut rng);
            debug!(seed, requests = pairs.len(), "workload generated");
            return Ok(output::render_workload(workload, &pairs));
        }
    };

    let pairs = input::read_requests(inputfile)?;
    let config = SimulationConfig {
        policy: options.policy,
        admission: options.admission,
        record_queue_views: options.flags.needs_queue_views(),
        ..Default::default()
    };

    let mut sim = Simulator::from_pairs(config, &pairs)?;
    sim.run_to_completion()?;
    let report = sim.report();
    info!(
        policy = %options.policy,
        requests = report.summary.num_requests,
        total_ticks = report.summary.total_ticks,
        "run complete"
    );

    if options.json {
        let mut out = report.to_json()?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = output::render_trace(sim.event_log().events(), options.flags, options.policy);
    out.push_str(&output::render_summary(&report));
    Ok(out)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let result = parse_args(std::env::args_os()).and_then(|options| {
        debug!(?options, "arguments parsed");
        run(&options)
    });

    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let CliError::Usage { reason } = &err {
                eprint!("{reason}");
            }
            if err.goes_to_stdout() {
                println!("{err}");
            } else {
                eprintln!("{err}");
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = parse_args(["iosched", "input0"]).unwrap();
        assert_eq!(
            options,
            Options {
                flags: TraceFlags::default(),
                policy: PolicyKind::Fcfs,
                json: false,
                admission: AdmissionMode::AllDue,
                task: Task::Simulate {
                    inputfile: "input0".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_attached_scheduler_letter_and_flags() {
        let options = parse_args(["iosched", "-sF", "-v", "-q", "-f", "input9"]).unwrap();
        assert_eq!(options.policy, PolicyKind::Flook);
        assert!(options.flags.verbose && options.flags.queue && options.flags.flook);
        assert!(options.flags.needs_queue_views());
    }

    #[test]
    fn test_separate_scheduler_letter() {
        let options = parse_args(["iosched", "-s", "C", "in"]).unwrap();
        assert_eq!(options.policy, PolicyKind::Clook);
    }

    #[test]
    fn test_extended_flags() {
        let options = parse_args(["iosched", "--json", "--admit-one-per-tick", "in"]).unwrap();
        assert!(options.json);
        assert_eq!(options.admission, AdmissionMode::OnePerTick);
    }

    #[test]
    fn test_unknown_scheduler() {
        let err = parse_args(["iosched", "-sX", "in"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown Scheduler spec: -s X");
    }

    #[test]
    fn test_missing_inputfile_is_usage_error() {
        assert!(matches!(
            parse_args(["iosched", "-v"]),
            Err(CliError::Usage { .. })
        ));
    }

    #[test]
    fn test_generate_needs_no_inputfile() {
        let options =
            parse_args(["iosched", "--generate", "8", "--seed", "3", "--max-track", "63"]).unwrap();
        assert_eq!(
            options.task,
            Task::Generate {
                workload: WorkloadConfig {
                    num_requests: 8,
                    rate_per_tick: 0.1,
                    track_range: (0, 63),
                    start_tick: 0,
                },
                seed: 3,
            }
        );
    }

    #[test]
    fn test_generate_rejects_non_positive_rate() {
        for rate in ["0", "-1.5", "NaN"] {
            assert!(
                matches!(
                    parse_args(["iosched", "--generate", "4", "--rate", rate]),
                    Err(CliError::Usage { .. })
                ),
                "rate {rate} was accepted"
            );
        }
    }

    #[test]
    fn test_generated_workload_replays() {
        let options = parse_args(["iosched", "--generate", "12", "--rate", "0.5"]).unwrap();
        let file = run(&options).unwrap();
        let pairs = input::parse_requests(&file).unwrap();
        assert_eq!(pairs.len(), 12);
        assert!(pairs.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(pairs.iter().all(|&(_, track)| (0..=199).contains(&track)));
    }

    #[test]
    fn test_repeated_flags_accepted() {
        let options = parse_args(["iosched", "-v", "-v", "-q", "-q", "in"]).unwrap();
        assert!(options.flags.verbose && options.flags.queue);
    }

    #[test]
    fn test_last_scheduler_letter_wins() {
        let options = parse_args(["iosched", "-sS", "-sL", "in"]).unwrap();
        assert_eq!(options.policy, PolicyKind::Look);
    }

    #[test]
    fn test_help_flags_are_not_recognised() {
        for flag in ["-h", "--help", "-V"] {
            assert!(
                matches!(parse_args(["iosched", flag, "in"]), Err(CliError::Usage { .. })),
                "{flag} was accepted"
            );
        }
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        assert!(matches!(
            parse_args(["iosched", "-z", "in"]),
            Err(CliError::Usage { .. })
        ));
    }
}
