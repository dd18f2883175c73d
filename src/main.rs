use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rbarrange::{config::Config, engine::Linter, file_handler::FileHandler, offense::Offense};

#[derive(Parser)]
#[command(name = "rbarrange")]
#[command(author = "krokorok")]
#[command(version)]
#[command(about = "An opinionated ordering and alignment linter for Ruby", long_about = None)]
struct Cli {
    #[arg(help = "Files, directories or glob patterns to check")]
    paths: Vec<PathBuf>,

    #[arg(short, long, help = "Apply corrections to the files")]
    fix: bool,

    #[arg(long, help = "Print corrected output to stdout instead of writing to file")]
    stdout: bool,

    #[arg(long, help = "Skip creating backups of original files")]
    no_backup: bool,

    #[arg(long, value_name = "COP", help = "Run only these cops or departments")]
    only: Vec<String>,

    #[arg(long, value_name = "COP", help = "Skip these cops or departments")]
    except: Vec<String>,

    #[arg(
        long = "model-path",
        value_name = "GLOB",
        help = "Treat classes in matching files as models"
    )]
    model_paths: Vec<String>,

    #[arg(short, long, help = "Log progress to stderr")]
    verbose: bool,
}

/// What happened to one file.
struct FileReport {
    offenses: Vec<Offense>,
    corrected: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.paths.is_empty() {
        eprintln!("{}", "Error: No files or directories specified".red());
        std::process::exit(1);
    }

    let config = Config::default()
        .with_only(cli.only.clone())
        .with_except(cli.except.clone())
        .with_model_paths(&cli.model_paths)?;
    let linter = Linter::new(config);

    let file_handler = FileHandler::new(!cli.no_backup);
    let files = file_handler.find_ruby_files(&cli.paths)?;

    if files.is_empty() {
        println!("{}", "No Ruby files found".yellow());
        return Ok(());
    }

    if !cli.stdout {
        println!("{} {} files", "Inspecting".green(), files.len());
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|file| process_file(&linter, &file_handler, file, &cli))
        .collect();

    let mut offense_count = 0;
    let mut corrected_count = 0;
    let mut had_errors = false;

    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(report) => {
                corrected_count += report.corrected;
                offense_count += report.offenses.len();
                if !cli.stdout {
                    print_offenses(file, &report.offenses);
                }
            }
            Err(e) => {
                had_errors = true;
                eprintln!("{} {}: {:#}", "✗".red(), file.display(), e);
            }
        }
    }

    if cli.stdout {
        if had_errors || offense_count > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!();
    if cli.fix && corrected_count > 0 {
        println!("{} {} corrections", "Applied".green(), corrected_count);
    }

    if had_errors {
        eprintln!("{}", "Some files had errors".red());
        std::process::exit(1);
    }

    if offense_count > 0 {
        eprintln!(
            "{}",
            format!("{} files inspected, {} offenses", files.len(), offense_count).red()
        );
        std::process::exit(1);
    }

    println!(
        "{}",
        format!("{} files inspected, no offenses", files.len()).green()
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "rbarrange=debug"
    } else {
        "rbarrange=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn process_file(linter: &Linter, file_handler: &FileHandler, path: &Path, cli: &Cli) -> Result<FileReport> {
    let content = file_handler.read_file(path)?;

    if !cli.fix && !cli.stdout {
        return Ok(FileReport {
            offenses: linter.lint(&content, path)?,
            corrected: 0,
        });
    }

    let outcome = linter.fix(&content, path)?;

    if cli.stdout {
        print!("{}", outcome.source);
    } else if outcome.changed() {
        file_handler.write_file(path, &outcome.source)?;
    }

    Ok(FileReport {
        offenses: outcome.remaining,
        corrected: outcome.edits_applied,
    })
}

fn print_offenses(path: &Path, offenses: &[Offense]) {
    for offense in offenses {
        let location = format!(
            "{}:{}:{}:",
            path.display(),
            offense.location.line,
            offense.location.column
        );
        let suffix = if offense.correctable {
            " [Correctable]".yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "{} {}: {}{}",
            location.bold(),
            offense.cop.cyan(),
            offense.message,
            suffix
        );
    }
}
