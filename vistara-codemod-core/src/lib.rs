// vistara-codemod-core/src/lib.rs

// declare modules
pub mod batch;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod inventory;
pub mod migrate;
pub mod normalize;
pub mod scanner;
pub mod utils;

// re-export key structs/functions for the CLI crate
pub use anyhow::{Context, Result};
pub use clap::Parser; // re-export Parser for CLI crate
pub use console::style;

pub use crate::batch::{BatchMigrator, Complexity, JsonFileRepository, Progress};
pub use crate::catalog::{catalog, Pattern, PatternKind};
pub use crate::config::Config;
pub use crate::convert::{convert_directory, convert_source};
pub use crate::detect::{scan_directory, Report};
pub use crate::error::CodemodError;
pub use crate::inventory::build_component_map;
pub use crate::migrate::{ComponentMigrator, TemplateMigrator};
pub use crate::normalize::{find_hardcoded, normalize_style};
pub use crate::scanner::{scan, Finding};

use crate::batch::MapRepository;
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "vistara-codemod")]
#[command(version)]
#[command(about = "design-token linter and component migration codemods for vistara ui", long_about = None)]
pub struct CoreCliArgs {
    /// config file (defaults to ./vistara-codemod.toml or $VISTARA_CODEMOD_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// show extra detail while working
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// scan for hardcoded style values; exits 1 when any are found
    Detect {
        /// directory to scan (defaults to the configured root, ./src)
        path: Option<PathBuf>,

        /// print findings as json instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// rewrite hardcoded values to design tokens in place
    Convert {
        path: Option<PathBuf>,

        /// only report what would change
        #[arg(long)]
        dry_run: bool,
    },

    /// scaffold a single migrated component
    Migrate {
        source: PathBuf,
        destination: PathBuf,
        name: String,
    },

    /// build the component map from a legacy component tree
    Inventory {
        /// legacy component root (defaults to batch.source_base)
        root: Option<PathBuf>,

        /// where to write the map (defaults to batch.map_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// migrate components listed in the component map
    Batch {
        #[command(subcommand)]
        action: BatchAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BatchAction {
    /// migrate the next batch of pending components
    Batch { count: Option<usize> },

    /// migrate every pending component of one category
    Category { name: String },

    /// migrate every pending component of one complexity tier
    Complexity { tier: Complexity },

    /// migrate everything still pending
    All {
        /// skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// print a json migration report
    Report {
        /// how many upcoming components to list
        #[arg(long, default_value = "10")]
        next: usize,
    },
}

/// run one command, returning the process exit code
pub async fn execute(args: CoreCliArgs) -> Result<i32> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match args.command {
        Command::Detect { path, json } => run_detect(&config, path, json, args.verbose),
        Command::Convert { path, dry_run } => run_convert(&config, path, dry_run),
        Command::Migrate {
            source,
            destination,
            name,
        } => Ok(run_migrate(&source, &destination, &name)),
        Command::Inventory { root, output } => run_inventory(&config, root, output, args.verbose),
        Command::Batch { action } => run_batch(&config, action).await,
    }
}

fn run_detect(config: &Config, path: Option<PathBuf>, json: bool, verbose: bool) -> Result<i32> {
    let root = path.unwrap_or_else(|| config.scan.root.clone());
    if !root.exists() {
        return Err(CodemodError::PathNotFound(root).into());
    }

    if !json {
        println!("{}\n", style(format!("🔍 scanning {} for hardcoded values...", root.display())).cyan());
    }
    if verbose {
        println!("extensions: {}", config.scan.extensions.join(", "));
    }

    let spinner = utils::spinner("walking source tree...");
    let findings = scan_directory(&root, &config.scan.extensions);
    spinner.finish_and_clear();
    let report = Report::from_findings(&findings?);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
        if !report.is_clean() {
            println!("\n{}", style("❌ hardcoded values need fixing").red().bold());
        }
    }

    Ok(report.exit_code())
}

fn run_convert(config: &Config, path: Option<PathBuf>, dry_run: bool) -> Result<i32> {
    let root = path.unwrap_or_else(|| config.scan.root.clone());
    let verb = if dry_run { "analysing" } else { "converting" };
    println!("{}\n", style(format!("🔧 {verb} hardcoded values in {}...", root.display())).cyan());

    let results = convert_directory(&root, &config.scan.extensions, dry_run)?;

    println!("🔧 Vistara UI - Auto-Convert Hardcoded Values");
    println!("{}", "=".repeat(50));
    if results.is_empty() {
        println!("{}", style("✅ no hardcoded values found to convert!").green());
        return Ok(0);
    }

    let action = if dry_run { "would convert" } else { "converted" };
    println!("{action} {} file(s):\n", results.len());
    for result in &results {
        println!("{}", style(format!("📁 {}:", result.file)).bold());
        for change in &result.changes {
            if change.is_edit() {
                println!("   ✓ {change}");
            } else {
                println!("   {}", style(format!("⚠ {change}")).yellow());
            }
        }
        println!();
    }

    if dry_run {
        println!("{}", style("💡 run without --dry-run to apply these changes").dim());
    } else {
        println!("{}", style("✅ conversion complete! remember to:").green().bold());
        println!("   1. test your components");
        println!("   2. check that the css variables are defined in tokens.css");
        println!("   3. convert the remaining tailwind classes by hand");
    }
    Ok(0)
}

fn run_migrate(source: &Path, destination: &Path, name: &str) -> i32 {
    println!("\n{}", style(format!("🔄 migrating {name}...")).cyan());

    match TemplateMigrator.migrate(source, destination, name) {
        Ok(migrated) => {
            println!(
                "{}",
                style(format!("✅ successfully migrated to: {}", migrated.destination.display())).green()
            );
            if !migrated.class_hints.is_empty() {
                println!("📋 tailwind classes found (need manual conversion):");
                for hint in &migrated.class_hints {
                    println!("   {}", utils::truncate_with_ellipsis(hint, 120));
                }
            }
            0
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                style(format!("❌ error migrating {name}:")).red().bold(),
                style(format!("{e:#}")).red()
            );
            1
        }
    }
}

fn run_inventory(
    config: &Config,
    root: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<i32> {
    let root = root.unwrap_or_else(|| config.batch.source_base.clone());
    let output = output.unwrap_or_else(|| config.batch.map_file.clone());
    println!("{}\n", style(format!("🔍 scanning components in {}...", root.display())).cyan());

    let mut map = build_component_map(&root)?;

    // keep progress from an earlier map of the same tree
    let repository = JsonFileRepository::new(&output, &config.batch.log_dir);
    if output.exists() {
        let previous = repository.load()?;
        let kept = map.carry_over_progress(&previous);
        if kept > 0 {
            println!("{}", style(format!("♻️  kept {kept} completed migrations")).dim());
        }
    }

    if verbose {
        for (name, record) in &map.components {
            println!("✅ found: {name} ({}) in {}", record.complexity, record.category);
        }
    }

    repository.save(&map)?;

    let count = |tier: Complexity| {
        map.components
            .values()
            .filter(|record| record.complexity == tier)
            .count()
    };
    println!("\n{}", style("📊 scan complete!").green().bold());
    println!("total components: {}", map.total());
    println!("simple: {}", count(Complexity::Simple));
    println!("medium: {}", count(Complexity::Medium));
    println!("complex: {}", count(Complexity::Complex));
    println!("\n📁 results saved to: {}", output.display());
    Ok(0)
}

async fn run_batch(config: &Config, action: BatchAction) -> Result<i32> {
    println!("{}\n", style("🎯 Vistara UI Batch Migrator").cyan().bold());

    let repository = JsonFileRepository::new(&config.batch.map_file, &config.batch.log_dir);
    let mut migrator = BatchMigrator::new(repository, TemplateMigrator, config.batch.clone())
        .context("cannot start batch migration")?;

    match action {
        BatchAction::Batch { count } => {
            let batch = migrator.select_batch(batch_size(count, config.batch.batch_size));
            migrator.migrate_entries(&batch).await?;
        }
        BatchAction::Category { name } => {
            let batch = migrator.select_by_category(&name);
            println!("🗂️  migrating {} components from category: {name}", batch.len());
            migrator.migrate_entries(&batch).await?;
        }
        BatchAction::Complexity { tier } => {
            let batch = migrator.select_by_complexity(tier);
            println!("📊 migrating {} {tier} components", batch.len());
            migrator.migrate_entries(&batch).await?;
        }
        BatchAction::All { yes } => {
            let batch = migrator.all_pending();
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("migrate all {} pending components?", batch.len()))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("{}", style("cancelled, nothing migrated").yellow());
                return Ok(0);
            }
            migrator.migrate_entries(&batch).await?;
        }
        BatchAction::Report { next } => {
            let report = migrator.report(next);
            println!("📊 migration report:");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    print_progress(&migrator.progress());
    Ok(0)
}

// a missing or zero count falls back to the configured batch size
fn batch_size(count: Option<usize>, configured: usize) -> usize {
    count.filter(|&n| n > 0).unwrap_or(configured)
}

fn print_progress(progress: &Progress) {
    println!("\n{}", style("📊 migration progress:").cyan().bold());
    println!("total components: {}", progress.total);
    println!("✅ completed: {} ({}%)", progress.completed, progress.percent);
    println!("⏳ pending: {}", progress.pending);
    println!("\n{}", style("📈 this session:").cyan());
    println!("✅ successful: {}", progress.successful);
    println!("❌ failed: {}", progress.failed);
    println!("⏭️  skipped: {}", progress.skipped);
}
