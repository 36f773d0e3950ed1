mod app;
mod commands;
mod render;

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use planner_lib::schedule::{parse_time, WeekdayKey};

#[derive(Parser)]
#[command(name = "planner-cli", about = "Homeschool weekly schedule editor", version)]
struct Cli {
    /// Path to config.toml (default: user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory schedules are stored in
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
enum Command {
    /// List students that have a stored schedule
    Students,

    /// Show a student's weekly schedule
    Show {
        student: Uuid,
    },

    /// List the block times for one day
    Slots {
        student: Uuid,
        /// Day name or three-letter abbreviation
        day: WeekdayKey,
    },

    /// Add a day to the weekly plan, or remove it
    Toggle {
        student: Uuid,
        day: WeekdayKey,
    },

    /// Set a day's start time
    Start {
        student: Uuid,
        day: WeekdayKey,
        /// HH:MM
        #[arg(value_parser = parse_time_arg)]
        time: NaiveTime,
    },

    /// Set a day's end time (earlier than the start time runs past midnight)
    End {
        student: Uuid,
        day: WeekdayKey,
        /// HH:MM
        #[arg(value_parser = parse_time_arg)]
        time: NaiveTime,
    },

    /// Set a day's block length in minutes
    Block {
        student: Uuid,
        day: WeekdayKey,
        minutes: u32,
    },

    /// Keep all selected days identical
    Uniform {
        student: Uuid,
        state: Switch,
    },

    /// Delete a student's stored schedule
    Reset {
        student: Uuid,
    },
}

fn parse_time_arg(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Students => {
            commands::students::run(&app, &cli.format)?;
        }
        Command::Show { student } => {
            commands::show::run(&app, student, &cli.format, use_color)?;
        }
        Command::Slots { student, day } => {
            commands::show::run_slots(&app, student, day, &cli.format)?;
        }
        Command::Toggle { student, day } => {
            commands::edit::run_toggle(&app, student, day, &cli.format, use_color)?;
        }
        Command::Start { student, day, time } => {
            commands::edit::run_start(&app, student, day, time, &cli.format, use_color)?;
        }
        Command::End { student, day, time } => {
            commands::edit::run_end(&app, student, day, time, &cli.format, use_color)?;
        }
        Command::Block { student, day, minutes } => {
            commands::edit::run_block(&app, student, day, minutes, &cli.format, use_color)?;
        }
        Command::Uniform { student, state } => {
            let enabled = matches!(state, Switch::On);
            commands::edit::run_uniform(&app, student, enabled, &cli.format, use_color)?;
        }
        Command::Reset { student } => {
            commands::students::run_reset(&app, student, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
