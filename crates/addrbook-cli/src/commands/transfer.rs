use crate::commands::{print_json, Context};
use crate::util::resolve_book_name;
use addrbook_core::rules::ImportPolicy;
use addrbook_sync::{encode, Format};
use anyhow::{anyhow, Context as _, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    Txt(ImportArgs),
    Csv(ImportArgs),
    Json(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub book: Option<String>,
    /// Overrides `[import] on_invalid` from the config
    #[arg(long, value_enum)]
    pub on_invalid: Option<PolicyArg>,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    Txt(ExportArgs),
    Csv(ExportArgs),
    Json(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long)]
    pub book: Option<String>,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PolicyArg {
    Abort,
    Skip,
}

impl From<PolicyArg> for ImportPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Abort => ImportPolicy::Abort,
            PolicyArg::Skip => ImportPolicy::Skip,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportReport {
    format: String,
    book: String,
    count: usize,
    output: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportSummary {
    format: String,
    book: String,
    added: usize,
    duplicates: usize,
    invalid: usize,
    warnings: Vec<String>,
}

impl ImportCommand {
    fn split(self) -> (Format, ImportArgs) {
        match self {
            ImportCommand::Txt(args) => (Format::Text, args),
            ImportCommand::Csv(args) => (Format::Csv, args),
            ImportCommand::Json(args) => (Format::Json, args),
        }
    }
}

impl ExportCommand {
    fn split(self) -> (Format, ExportArgs) {
        match self {
            ExportCommand::Txt(args) => (Format::Text, args),
            ExportCommand::Csv(args) => (Format::Csv, args),
            ExportCommand::Json(args) => (Format::Json, args),
        }
    }
}

pub fn import(ctx: &mut Context<'_>, cmd: ImportCommand) -> Result<()> {
    let (format, args) = cmd.split();
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    let policy = args
        .on_invalid
        .map(ImportPolicy::from)
        .unwrap_or(ctx.config.import.on_invalid);

    let report = ctx
        .book_mut(&book_name)?
        .import_from(format, &args.file, policy)
        .with_context(|| format!("import {} file {}", format, args.file.display()))?;
    ctx.store.save()?;

    let summary = ImportSummary {
        format: format.to_string(),
        book: book_name,
        added: report.added,
        duplicates: report.duplicates,
        invalid: report.invalid,
        warnings: report.warnings,
    };

    if ctx.json {
        return print_json(&summary);
    }

    println!(
        "Imported {} contacts into {}: added {}, duplicates {}, invalid {}",
        summary.format, summary.book, summary.added, summary.duplicates, summary.invalid
    );
    if !summary.warnings.is_empty() {
        println!("Warnings:");
        for warning in summary.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

pub fn export(ctx: &Context<'_>, cmd: ExportCommand) -> Result<()> {
    let (format, args) = cmd.split();
    let book_name = resolve_book_name(ctx.config, args.book.as_deref())?;
    let book = ctx.book(&book_name)?;

    let Some(path) = args.out else {
        if ctx.json {
            return Err(anyhow!("--json requires --out for export commands"));
        }
        let data = encode(format, book.contacts())?;
        print!("{}", data);
        return Ok(());
    };

    let count = book
        .export_to(format, &path)
        .with_context(|| format!("write export file {}", path.display()))?;

    if ctx.json {
        print_json(&ExportReport {
            format: format.to_string(),
            book: book_name,
            count,
            output: Some(path.display().to_string()),
        })?;
    } else {
        println!("Exported {} contacts to {}", count, path.display());
    }
    Ok(())
}
