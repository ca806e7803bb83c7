use crate::cli::{CliArgs, Command, CsvArgs, EggAction, MistyAction};
use crate::output;
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use clap::CommandFactory;
use kanga_core::{init_logging, CsvOptions, FlipOutcome, RecordKind, TallyService};
use log::{info, warn};
use std::fmt::Display;

/// Runs one invocation. Only bootstrap failures (paths, opening the store)
/// surface as `Err`; command failures are printed and the call returns `Ok`.
pub fn execute(args: CliArgs) -> Result<()> {
    let command = match args.command {
        Some(Command::Help { command }) => return print_help(command.as_deref()),
        Some(command) => command,
        None => return print_help(None),
    };

    if let Command::Egg { action: None } = command {
        return print_help(Some("egg"));
    }

    if let Command::Misty { action: None } = command {
        return print_help(Some("misty"));
    }

    let paths = AppPaths::resolve(args.db.as_deref(), args.log_dir.as_deref())?;

    let level = args.log_level.unwrap_or_default();
    if let Err(err) = init_logging(level, &paths.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let service = TallyService::open(&paths.db_file).with_context(|| {
        format!(
            "Failed to initialize database at '{}'",
            paths.db_file.display()
        )
    })?;

    info!("event=command_start module=cli command={command:?}");
    dispatch(&service, command);

    Ok(())
}

fn dispatch(service: &TallyService, command: Command) {
    match command {
        Command::DoubleHeads
        | Command::HeadsTails
        | Command::TailsHeads
        | Command::DoubleTails => {
            if let Some(outcome) = command.flip_outcome() {
                record_flip(service, outcome);
            }
        }
        Command::Heads => match service.flip_stats() {
            Ok(stats) => output::print_table("HEADS INFO", &output::heads_report(&stats)),
            Err(err) => report_failure("get heads info", err),
        },
        Command::Tails => match service.flip_stats() {
            Ok(stats) => output::print_table("TAILS INFO", &output::tails_report(&stats)),
            Err(err) => report_failure("get tails info", err),
        },
        Command::Stats => match service.flip_stats() {
            Ok(stats) => output::print_table("STATISTICS", &output::flip_report(&stats)),
            Err(err) => report_failure("get stats", err),
        },
        Command::Egg {
            action: Some(action),
        } => run_egg(service, action),
        Command::Misty {
            action: Some(action),
        } => run_misty(service, action),
        Command::Reset => match service.reset() {
            Ok(_) => println!("Data reset"),
            Err(err) => report_failure("reset data", err),
        },
        Command::Undo => match service.undo_last(RecordKind::Flip) {
            Ok(_) => println!("Last flip undone"),
            Err(err) => report_failure("undo flip", err),
        },
        Command::DumpCsv(csv) => dump_csv(service, &csv),
        Command::ReadCsv(csv) => read_csv(service, &csv),
        // Help output never touches the store; `execute` prints it up front.
        Command::Egg { action: None } | Command::Misty { action: None } | Command::Help { .. } => {}
    }
}

fn record_flip(service: &TallyService, outcome: FlipOutcome) {
    match service.record_flip(outcome) {
        Ok(_) if outcome == FlipOutcome::TailsTails => println!("flip logged... RIP"),
        Ok(_) => println!("flip logged..."),
        Err(err) => report_failure("insert flip", err),
    }
}

fn run_egg(service: &TallyService, action: EggAction) {
    match action {
        EggAction::Record(outcome) => match service.record_egg(outcome) {
            Ok(_) => println!("Exeggutor entry logged..."),
            Err(err) => report_failure("insert exeggutor entry", err),
        },
        EggAction::Stats => match service.egg_stats() {
            Ok(stats) => output::print_table("EXEGGUTOR STATS", &output::egg_report(&stats)),
            Err(err) => report_failure("get egg stats", err),
        },
        EggAction::Undo => match service.undo_last(RecordKind::Egg) {
            Ok(_) => println!("Last exeggutor flip undone..."),
            Err(err) => report_failure("undo exeggutor entry", err),
        },
    }
}

fn run_misty(service: &TallyService, action: MistyAction) {
    match action {
        MistyAction::Record(heads) => match service.record_misty(heads) {
            Ok(_) => println!("Entry logged..."),
            Err(err) => report_failure("insert misty entry", err),
        },
        MistyAction::Stats => match service.misty_stats() {
            Ok(stats) => output::print_table("MISTY STATS", &output::misty_report(&stats)),
            Err(err) => report_failure("get misty stats", err),
        },
        MistyAction::Undo => match service.undo_last(RecordKind::Misty) {
            Ok(_) => println!("Last misty flip undone..."),
            Err(err) => report_failure("undo misty entry", err),
        },
    }
}

fn dump_csv(service: &TallyService, csv: &CsvArgs) {
    let options = CsvOptions::new(&csv.folder, csv.selection());
    match service.export_csv(&options) {
        Ok(_) => println!("Data dumped to {}", csv.folder.display()),
        Err(err) => report_failure("dump CSV", err),
    }
}

fn read_csv(service: &TallyService, csv: &CsvArgs) {
    let options = CsvOptions::new(&csv.folder, csv.selection());
    match service.import_csv(&options) {
        Ok(_) => println!("Data read from {}", csv.folder.display()),
        Err(err) => report_failure("read CSV", err),
    }
}

fn report_failure(action: &str, err: impl Display) {
    warn!("event=command_failed module=cli action=\"{action}\" error={err}");
    println!("Failed to {action}: {err}");
}

/// Prints help for `topic` (a verb or alias), or the top-level help when the
/// topic is absent or unknown.
fn print_help(topic: Option<&str>) -> Result<()> {
    let root = CliArgs::command();
    let subcommand = topic.and_then(|name| root.find_subcommand(name).cloned());

    let mut cmd = match subcommand {
        Some(sub) => {
            let bin_name = format!("kanga {}", sub.get_name());
            sub.bin_name(bin_name)
        }
        None => root,
    };

    cmd.print_long_help()?;
    Ok(())
}
