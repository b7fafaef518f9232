//! Command-line front end for the gradebook.
//!
//! Each invocation hydrates the gradebook from its JSON document, runs one
//! action, saves on success and prints the confirmation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gradebook::core::listing::StudentRow;
use gradebook::core::registry::Registry;
use gradebook::exit_codes;
use gradebook::io::config::{CONFIG_FILE, GradebookConfig, load_config, write_config};
use gradebook::io::store::{StoreError, save_registry};
use gradebook::logging;
use gradebook::session::{Outcome, Session, SessionError};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Keep student, course and grade records in a JSON file"
)]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Gradebook document; overrides `data_file` from the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config and an empty gradebook if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Add a student with a unique id.
    AddStudent { name: String, student_id: String },
    /// Add a course with a unique code.
    AddCourse { name: String, code: String },
    /// Enroll a student in a course (resets any existing grade).
    Enroll { student_id: String, code: String },
    /// Assign an integer grade to an existing enrollment.
    Grade {
        student_id: String,
        code: String,
        #[arg(allow_hyphen_values = true)]
        grade: String,
    },
    /// List students with their courses and grades.
    List {
        #[arg(long)]
        json: bool,
    },
    /// List courses.
    Courses {
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, cli.data.as_deref(), force),
        command => {
            let cfg = load_config(&cli.config)?;
            let data_path = cli.data.unwrap_or(cfg.data_file);
            debug!(path = %data_path.display(), "opening gradebook");
            let mut session = Session::open(&data_path, cfg.on_corrupt)?;
            run_action(&mut session, command)
                .with_context(|| format!("gradebook {}", session.data_path().display()))
        }
    }
}

fn run_action(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Init { .. } => {}
        Command::AddStudent { name, student_id } => {
            report(session.add_student(&name, &student_id)?);
        }
        Command::AddCourse { name, code } => report(session.add_course(&name, &code)?),
        Command::Enroll { student_id, code } => report(session.enroll(&student_id, &code)?),
        Command::Grade {
            student_id,
            code,
            grade,
        } => report(session.assign_grade(&student_id, &code, &grade)?),
        Command::List { json } => {
            let rows = session.list();
            if json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    println!("{}", student_line(&row));
                }
            }
        }
        Command::Courses { json } => {
            let rows = session.courses();
            if json {
                print_json(&rows)?;
            } else {
                for row in rows {
                    println!("{}: {}", row.code, row.name);
                }
            }
        }
    }
    Ok(())
}

fn cmd_init(config_path: &Path, data: Option<&Path>, force: bool) -> Result<()> {
    let mut cfg = if config_path.exists() && !force {
        load_config(config_path)?
    } else {
        GradebookConfig::default()
    };
    if let Some(data) = data {
        cfg.data_file = data.to_path_buf();
    }
    if force || !config_path.exists() {
        write_config(config_path, &cfg)
            .with_context(|| format!("write {}", config_path.display()))?;
    }
    if force || !cfg.data_file.exists() {
        save_registry(&cfg.data_file, &Registry::new())?;
    }
    println!("Gradebook ready at {}.", cfg.data_file.display());
    Ok(())
}

/// `S1: C1: 90, C2: ungraded`, or just `S1` when not enrolled anywhere.
fn student_line(row: &StudentRow) -> String {
    if row.courses.is_empty() {
        row.student_id.clone()
    } else {
        format!("{}: {}", row.student_id, row.courses)
    }
}

fn report(outcome: Outcome) {
    println!("{}", outcome.message);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

/// Map an error to a stable exit code.
fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(session_err) = cause.downcast_ref::<SessionError>() {
            return match session_err {
                SessionError::Action(_) => exit_codes::REJECTED,
                SessionError::Store(store_err) => store_exit_code(store_err),
            };
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return store_exit_code(store_err);
        }
    }
    exit_codes::INVALID
}

fn store_exit_code(err: &StoreError) -> i32 {
    if err.is_corrupt() {
        exit_codes::CORRUPT
    } else {
        exit_codes::INVALID
    }
}
