//! docfill CLI - DOCX template filling tool

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docfill::{
    fill::{locate_creditor_table, PlaceholderScanner},
    CreditorRecord, CreditorTableConfig, Docfill, DocxPackage, OpenOptions, Replacements,
};

#[derive(Parser)]
#[command(name = "docfill")]
#[command(version)]
#[command(about = "Fill DOCX templates with placeholder values and creditor tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill one or more templates
    Fill {
        /// Template files (.docx)
        #[arg(value_name = "TEMPLATE", required = true)]
        templates: Vec<PathBuf>,

        /// JSON file with placeholder values (object or list of pairs)
        #[arg(long, value_name = "JSON", env = "DOCFILL_VALUES")]
        values: PathBuf,

        /// JSON file with a list of creditor records
        #[arg(long, value_name = "JSON")]
        creditors: Option<PathBuf>,

        /// Add a placeholder holding today's date (DD.MM.YYYY)
        #[arg(long, value_name = "KEY")]
        today: Option<String>,

        /// Output file (single template only)
        #[arg(short, long, value_name = "FILE", conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Leave headers and footers untouched
        #[arg(long)]
        skip_headers: bool,
    },

    /// List placeholder tokens found in a template
    Placeholders {
        /// Template file (.docx)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show template information
    Info {
        /// Template file (.docx)
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Fill {
            templates,
            values,
            creditors,
            today,
            output,
            out_dir,
            skip_headers,
        }) => cmd_fill(
            &templates,
            &values,
            creditors.as_deref(),
            today.as_deref(),
            output.as_deref(),
            out_dir.as_deref(),
            skip_headers,
        ),
        Some(Commands::Placeholders { template, json }) => cmd_placeholders(&template, json),
        Some(Commands::Info { template }) => cmd_info(&template),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docfill fill <TEMPLATE>... --values <JSON>".yellow());
            println!("       docfill --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_fill(
    templates: &[PathBuf],
    values: &Path,
    creditors: Option<&Path>,
    today: Option<&str>,
    output: Option<&Path>,
    out_dir: Option<&Path>,
    skip_headers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if output.is_some() && templates.len() > 1 {
        return Err("--output accepts a single template; use --out-dir for several".into());
    }

    let date = Local::now().date_naive();
    let replacements = load_replacements(values, today, date)?;
    let records = match creditors {
        Some(path) => CreditorRecord::list_from_json(&fs::read_to_string(path)?)?,
        None => Vec::new(),
    };
    log::info!(
        "{} placeholders, {} creditor records",
        replacements.len(),
        records.len()
    );

    let mut builder = Docfill::new()
        .with_replacements(replacements)
        .with_creditors(records);
    if skip_headers {
        builder = builder.without_headers_footers();
    }

    let out_dir = out_dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir)?;

    let pb = ProgressBar::new(templates.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Filling templates...");

    let results = builder.fill_files(templates);
    let mut failures = 0;
    let mut written = Vec::new();
    let mut used = HashSet::new();
    for (template, result) in templates.iter().zip(results) {
        pb.inc(1);
        let filled = match result {
            Ok(filled) => filled,
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), template.display(), e));
                failures += 1;
                continue;
            }
        };

        let target = match output {
            Some(path) => path.to_path_buf(),
            None => unique_output_path(&out_dir, template, date, &mut used),
        };
        filled.save(&target)?;
        written.push((target, filled.stats.clone()));
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    let count = written.len();
    for (i, (path, stats)) in written.iter().enumerate() {
        let branch = if i + 1 == count { "└─" } else { "├─" };
        let mut line = format!(
            "{} ({} paragraphs filled",
            path.display(),
            stats.paragraphs_changed
        );
        if let Some(ref report) = stats.creditors {
            line.push_str(&format!(
                ", creditors: {} updated, {} added, {} removed",
                report.rows_updated, report.rows_appended, report.rows_deleted
            ));
        }
        line.push(')');
        println!("  {} {}", branch.dimmed(), line);
    }

    if failures > 0 {
        return Err(format!("{} of {} templates failed", failures, templates.len()).into());
    }
    Ok(())
}

fn cmd_placeholders(template: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let package = DocxPackage::open_with_options(template, OpenOptions::new().lenient())?;
    let found = PlaceholderScanner::new().scan(package.document());

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("{}", "No placeholders found".yellow());
        return Ok(());
    }

    println!("{}", "Placeholders".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for occurrence in &found {
        println!("{} {}", occurrence.token, format!("x{}", occurrence.count).dimmed());
    }
    Ok(())
}

fn cmd_info(template: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let package = DocxPackage::open_with_options(template, OpenOptions::new().lenient())?;
    let doc = package.document();

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), template.display());
    println!("{}: {}", "Main part".bold(), package.main_part());
    println!("{}: {}", "Parts".bold(), package.part_names().count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut paragraphs = 0;
    doc.visit_paragraphs(false, |_| paragraphs += 1);
    let placeholders = PlaceholderScanner::new().scan(doc);

    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Tables".bold(), doc.tables().count());
    println!("{}: {}", "Headers".bold(), doc.headers.len());
    println!("{}: {}", "Footers".bold(), doc.footers.len());
    println!("{}: {}", "Placeholders".bold(), placeholders.len());

    let config = CreditorTableConfig::default();
    match locate_creditor_table(doc, &config) {
        Some(index) => {
            let rows = doc.tables().nth(index).map(|t| t.row_count()).unwrap_or(0);
            println!(
                "{}: table {} ({} rows)",
                "Creditor table".bold(),
                index + 1,
                rows
            );
        }
        None => println!("{}: {}", "Creditor table".bold(), "none".dimmed()),
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docfill".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX template filling tool");
    println!();
    println!("License: MIT");
}

/// Read the replacement list and append the `--today` pair, if any.
fn load_replacements(
    path: &Path,
    today_key: Option<&str>,
    date: NaiveDate,
) -> Result<Replacements, Box<dyn std::error::Error>> {
    let mut replacements = Replacements::from_json(&fs::read_to_string(path)?)?;
    if let Some(key) = today_key {
        replacements.push_date(key, date);
    }
    Ok(replacements)
}

/// `<stem>_<YYYYMMDD>.docx`
fn default_output_name(template: &Path, date: NaiveDate) -> String {
    let stem = template.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}_{}.docx", stem, date.format("%Y%m%d"))
}

/// Output path in `dir` that no earlier template of this run has taken.
///
/// Templates sharing a stem get `_2`, `_3`, ... appended.
fn unique_output_path(
    dir: &Path,
    template: &Path,
    date: NaiveDate,
    used: &mut HashSet<PathBuf>,
) -> PathBuf {
    let name = default_output_name(template, date);
    let mut path = dir.join(&name);
    let mut n = 2;
    while used.contains(&path) {
        let stem = name.trim_end_matches(".docx");
        path = dir.join(format!("{}_{}.docx", stem, n));
        n += 1;
    }
    log::debug!("{} -> {}", template.display(), path.display());
    used.insert(path.clone());
    path
}
