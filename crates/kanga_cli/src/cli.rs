//! Command-line surface.
//!
//! Verbs mirror the tally kinds: bare flip verbs (`HH`, `HT`, `TH`, `TT`),
//! `egg` and `misty` with an action argument, plus reporting, undo, reset
//! and CSV interchange.

use clap::{Args, Parser, Subcommand};
use kanga_core::{EggOutcome, FlipOutcome, KindSelection, LogLevel, RecordKind};
use std::path::PathBuf;
use std::str::FromStr;

const INVALID_EGG_ARG: &str =
    "Invalid argument for egg command. Use `kanga help egg` for more info";
const INVALID_MISTY_ARG: &str =
    "Invalid argument for misty command. Use `kanga help misty` for more info";

#[derive(Parser, Debug)]
#[command(
    name = "kanga",
    about = "Log coin flips, exeggutor and misty results and report running statistics",
    version,
    disable_help_subcommand = true
)]
pub struct CliArgs {
    #[arg(
        long = "db",
        global = true,
        value_name = "PATH",
        help = "Database file (default: kanga.db next to the executable)."
    )]
    pub db: Option<PathBuf>,

    #[arg(
        long = "log-dir",
        global = true,
        value_name = "DIR",
        help = "Directory for rolling log files (default: logs/ next to the database)."
    )]
    pub log_dir: Option<PathBuf>,

    #[arg(
        long = "log-level",
        global = true,
        value_name = "LEVEL",
        value_parser = parse_log_level,
        help = "Log level: trace | debug | info | warn | error."
    )]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(about = "Show heads info")]
    Heads,

    #[command(about = "Show tails info")]
    Tails,

    #[command(about = "Show statistics")]
    Stats,

    #[command(name = "HH", alias = "hh", about = "Log a double heads flip")]
    DoubleHeads,

    #[command(name = "HT", alias = "ht", about = "Log a heads-tails flip")]
    HeadsTails,

    #[command(name = "TH", alias = "th", about = "Log a tails-heads flip")]
    TailsHeads,

    #[command(name = "TT", alias = "tt", about = "Log a double tails flip")]
    DoubleTails,

    #[command(
        about = "Log an exeggutor entry or show stats",
        long_about = "Log an exeggutor entry or show stats\n\n  \
            H        Log a heads\n  \
            T        Log a tails\n  \
            HX       Log a heads, but... the result didn't really matter\n  \
            TX       Log a tails, but... the result didn't really matter\n  \
            stats    Show exeggutor statistics\n  \
            undo     Undo the last exeggutor entry"
    )]
    Egg {
        #[arg(value_name = "H|HX|T|TX|stats|undo")]
        action: Option<EggAction>,
    },

    #[command(
        about = "Log a misty session or show stats",
        long_about = "Log a misty session or show stats\n\n  \
            N        Log a session with N heads\n  \
            stats    Show misty statistics\n  \
            undo     Undo the last misty entry"
    )]
    Misty {
        #[arg(value_name = "N|stats|undo")]
        action: Option<MistyAction>,
    },

    #[command(about = "Reset the database")]
    Reset,

    #[command(about = "Undo the last flip")]
    Undo,

    #[command(
        name = "dump-csv",
        about = "Dump the data to CSV files in the specified folder (default: current directory)"
    )]
    DumpCsv(CsvArgs),

    #[command(
        name = "read-csv",
        about = "Read the data from CSV files in the specified folder (default: current directory)"
    )]
    ReadCsv(CsvArgs),

    #[command(about = "Show this help message, or help for a specific command")]
    Help {
        #[arg(value_name = "COMMAND")]
        command: Option<String>,
    },
}

impl Command {
    /// Flip recorded by a bare flip verb.
    pub fn flip_outcome(&self) -> Option<FlipOutcome> {
        match self {
            Self::DoubleHeads => Some(FlipOutcome::HeadsHeads),
            Self::HeadsTails => Some(FlipOutcome::HeadsTails),
            Self::TailsHeads => Some(FlipOutcome::TailsHeads),
            Self::DoubleTails => Some(FlipOutcome::TailsTails),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CsvArgs {
    #[arg(value_name = "FOLDER", default_value = ".")]
    pub folder: PathBuf,

    #[arg(long = "kanga", conflicts_with_all = ["egg", "misty"], help = "Only the flip table.")]
    pub kanga: bool,

    #[arg(long = "egg", conflicts_with = "misty", help = "Only the exeggutor table.")]
    pub egg: bool,

    #[arg(long = "misty", help = "Only the misty table.")]
    pub misty: bool,
}

impl CsvArgs {
    pub fn selection(&self) -> KindSelection {
        if self.kanga {
            KindSelection::Only(RecordKind::Flip)
        } else if self.egg {
            KindSelection::Only(RecordKind::Egg)
        } else if self.misty {
            KindSelection::Only(RecordKind::Misty)
        } else {
            KindSelection::All
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggAction {
    Record(EggOutcome),
    Stats,
    Undo,
}

impl FromStr for EggAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "stats" => Ok(Self::Stats),
            "undo" => Ok(Self::Undo),
            _ => value
                .parse::<EggOutcome>()
                .map(Self::Record)
                .map_err(|_| INVALID_EGG_ARG.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MistyAction {
    Record(u32),
    Stats,
    Undo,
}

impl FromStr for MistyAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Ok(heads) = value.parse::<u32>() {
            return Ok(Self::Record(heads));
        }

        match value.to_ascii_lowercase().as_str() {
            "stats" => Ok(Self::Stats),
            "undo" => Ok(Self::Undo),
            _ => Err(INVALID_MISTY_ARG.to_string()),
        }
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse().map_err(|err: kanga_core::LoggingError| err.to_string())
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Command, EggAction, MistyAction};
    use clap::{CommandFactory, Parser};
    use kanga_core::{EggOutcome, FlipOutcome, KindSelection, LogLevel, RecordKind};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn flip_verbs_accept_both_cases() {
        let upper = CliArgs::try_parse_from(["kanga", "HT"]).unwrap();
        let lower = CliArgs::try_parse_from(["kanga", "ht"]).unwrap();
        assert_eq!(upper.command, lower.command);
        assert_eq!(
            upper.command.unwrap().flip_outcome(),
            Some(FlipOutcome::HeadsTails)
        );
    }

    #[test]
    fn egg_action_parses_outcomes_and_verbs() {
        assert_eq!(
            "hx".parse::<EggAction>(),
            Ok(EggAction::Record(EggOutcome::HeadsIgnored))
        );
        assert_eq!("stats".parse::<EggAction>(), Ok(EggAction::Stats));
        assert!("HTX".parse::<EggAction>().is_err());
    }

    #[test]
    fn misty_action_takes_non_negative_counts() {
        assert_eq!("5".parse::<MistyAction>(), Ok(MistyAction::Record(5)));
        assert_eq!("undo".parse::<MistyAction>(), Ok(MistyAction::Undo));
        assert!("-1".parse::<MistyAction>().is_err());
    }

    #[test]
    fn csv_flags_select_a_single_kind() {
        let args = CliArgs::try_parse_from(["kanga", "dump-csv", "backup", "--egg"]).unwrap();
        match args.command {
            Some(Command::DumpCsv(csv)) => {
                assert_eq!(csv.folder, PathBuf::from("backup"));
                assert_eq!(csv.selection(), KindSelection::Only(RecordKind::Egg));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let args = CliArgs::try_parse_from(["kanga", "read-csv"]).unwrap();
        match args.command {
            Some(Command::ReadCsv(csv)) => {
                assert_eq!(csv.folder, PathBuf::from("."));
                assert_eq!(csv.selection(), KindSelection::All);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn csv_flags_are_mutually_exclusive() {
        assert!(CliArgs::try_parse_from(["kanga", "dump-csv", "--kanga", "--egg"]).is_err());
    }

    #[test]
    fn global_db_flag_follows_the_verb() {
        let args = CliArgs::try_parse_from(["kanga", "stats", "--db", "/tmp/k.db"]).unwrap();
        assert_eq!(args.db, Some(PathBuf::from("/tmp/k.db")));
    }

    #[test]
    fn log_level_is_validated_at_parse_time() {
        let args = CliArgs::try_parse_from(["kanga", "--log-level", "WARN", "stats"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Warn));
        assert!(CliArgs::try_parse_from(["kanga", "--log-level", "loud", "stats"]).is_err());
    }
}
