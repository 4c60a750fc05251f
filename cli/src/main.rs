//! content-model CLI - import, edit and export rich-text content models

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use content_model::edit::{delete_char_backward, delete_char_forward, DeleteSelectionStep};
use content_model::model::{Block, BlockGroupContainer, SegmentKind};
use content_model::{
    content_model_to_html, content_model_to_text, delete_selection, html_to_content_model,
    merge_model, normalize_document, read_model_file, render, Document, DomToModelOptions,
    FormatContext, JsonFormat, MergeFormatPolicy, MergeModelOptions, ModelToDomOptions,
    TextOptions,
};

#[derive(Parser)]
#[command(name = "content-model")]
#[command(version)]
#[command(about = "Import, edit and export rich-text content models", long_about = None)]
struct Cli {
    /// Output compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an HTML fragment as a JSON content model
    Import {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export a JSON content model as HTML
    Export {
        /// Input model file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wrapper tag for undecorated paragraphs
        #[arg(long, default_value = "div")]
        paragraph_tag: String,
    },

    /// Convert a JSON content model to plain text
    Text {
        /// Input model file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Separate lines with "\n" instead of "\r\n"
        #[arg(long)]
        unix: bool,
    },

    /// Normalize a JSON content model
    Normalize {
        /// Input model file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Delete the selection stored in a JSON content model
    Delete {
        /// Input model file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Delete one character at a collapsed selection
        #[arg(long, value_enum)]
        direction: Option<Direction>,
    },

    /// Merge a source content model into a target at its selection
    Merge {
        /// Target model file
        #[arg(value_name = "TARGET")]
        target: PathBuf,

        /// Source model file
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Default format policy
        #[arg(long, value_enum, default_value = "none")]
        format: FormatPolicy,

        /// Merge a single source table into the target table cell by cell
        #[arg(long)]
        merge_table: bool,
    },

    /// Show content model statistics
    Info {
        /// Input model file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Delete key
    Forward,
    /// Backspace
    Backward,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatPolicy {
    /// Keep source formats
    None,
    /// Fill unset source fields from the target format
    MergeAll,
    /// Use the target format but keep source emphasis
    KeepSourceEmphasis,
}

impl From<FormatPolicy> for MergeFormatPolicy {
    fn from(policy: FormatPolicy) -> Self {
        match policy {
            FormatPolicy::None => MergeFormatPolicy::None,
            FormatPolicy::MergeAll => MergeFormatPolicy::MergeAll,
            FormatPolicy::KeepSourceEmphasis => MergeFormatPolicy::KeepSourceEmphasisFormat,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let result = match cli.command {
        Commands::Import { input, output } => cmd_import(&input, output.as_deref(), format),
        Commands::Export {
            input,
            output,
            paragraph_tag,
        } => cmd_export(&input, output.as_deref(), &paragraph_tag),
        Commands::Text {
            input,
            output,
            unix,
        } => cmd_text(&input, output.as_deref(), unix),
        Commands::Normalize { input, output } => cmd_normalize(&input, output.as_deref(), format),
        Commands::Delete {
            input,
            output,
            direction,
        } => cmd_delete(&input, output.as_deref(), direction, format),
        Commands::Merge {
            target,
            source,
            output,
            format: policy,
            merge_table,
        } => cmd_merge(&target, &source, output.as_deref(), policy, merge_table, format),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Write to `output`, or print to stdout.
fn emit(content: &str, output: Option<&Path>) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn emit_model(model: &Document, output: Option<&Path>, format: JsonFormat) -> CmdResult {
    let json = render::to_json(model, format)?;
    emit(&json, output)
}

fn cmd_import(input: &Path, output: Option<&Path>, format: JsonFormat) -> CmdResult {
    let html = fs::read_to_string(input)?;
    let model = html_to_content_model(&html, &DomToModelOptions::default())?;
    emit_model(&model, output, format)
}

fn cmd_export(input: &Path, output: Option<&Path>, paragraph_tag: &str) -> CmdResult {
    let mut model = read_model_file(input)?;
    let options = ModelToDomOptions::new().with_paragraph_tag(paragraph_tag);
    let html = content_model_to_html(&mut model, &options);
    emit(&html, output)
}

fn cmd_text(input: &Path, output: Option<&Path>, unix: bool) -> CmdResult {
    let model = read_model_file(input)?;
    let mut options = TextOptions::new();
    if unix {
        options = options.with_separator("\n");
    }
    let text = content_model_to_text(&model, &options);
    emit(&text, output)
}

fn cmd_normalize(input: &Path, output: Option<&Path>, format: JsonFormat) -> CmdResult {
    let mut model = read_model_file(input)?;
    normalize_document(&mut model);
    emit_model(&model, output, format)
}

fn cmd_delete(
    input: &Path,
    output: Option<&Path>,
    direction: Option<Direction>,
    format: JsonFormat,
) -> CmdResult {
    let mut model = read_model_file(input)?;
    let steps: Vec<DeleteSelectionStep> = direction
        .map(|direction| match direction {
            Direction::Forward => delete_char_forward as DeleteSelectionStep,
            Direction::Backward => delete_char_backward,
        })
        .into_iter()
        .collect();

    let mut context = FormatContext::new();
    let result = delete_selection(&mut model, &steps, Some(&mut context));
    normalize_document(&mut model);

    eprintln!("{} {:?}", "Result:".cyan(), result.delete_result);
    for deleted in &context.deleted_entities {
        eprintln!(
            "  {} entity {} ({:?})",
            "-".dimmed(),
            deleted.entity.entity_format.entity_type.as_deref().unwrap_or("unknown"),
            deleted.operation
        );
    }
    emit_model(&model, output, format)
}

fn cmd_merge(
    target: &Path,
    source: &Path,
    output: Option<&Path>,
    policy: FormatPolicy,
    merge_table: bool,
    format: JsonFormat,
) -> CmdResult {
    let mut target_model = read_model_file(target)?;
    let source_model = read_model_file(source)?;
    let options = MergeModelOptions::new()
        .with_merge_format(policy.into())
        .with_merge_table(merge_table);

    let mut context = FormatContext::new();
    if merge_model(&mut target_model, source_model, Some(&mut context), &options).is_none() {
        return Err(format!("{} has no selection to merge into", target.display()).into());
    }

    eprintln!(
        "{} {} entities, {} images",
        "Merged:".cyan(),
        context.new_entities.len(),
        context.new_images.len()
    );
    emit_model(&target_model, output, format)
}

/// Block and segment counts of a model.
#[derive(Debug, Default)]
struct ModelStats {
    paragraphs: usize,
    tables: usize,
    dividers: usize,
    entities: usize,
    list_items: usize,
    containers: usize,
    segments: usize,
    images: usize,
    selected: usize,
}

impl ModelStats {
    fn collect(group: &dyn BlockGroupContainer) -> Self {
        let mut stats = Self::default();
        stats.visit(group);
        stats
    }

    fn visit(&mut self, group: &dyn BlockGroupContainer) {
        for block in group.blocks() {
            match block {
                Block::Paragraph(paragraph) => {
                    self.paragraphs += 1;
                    for segment in &paragraph.segments {
                        self.segments += 1;
                        if segment.is_selected {
                            self.selected += 1;
                        }
                        match &segment.kind {
                            SegmentKind::Image(_) => self.images += 1,
                            SegmentKind::Entity(_) => self.entities += 1,
                            SegmentKind::General(general) => self.visit(general),
                            _ => {}
                        }
                    }
                }
                Block::Table(table) => {
                    self.tables += 1;
                    for cell in table.rows.iter().flat_map(|row| &row.cells) {
                        self.visit(cell);
                    }
                }
                Block::Divider(_) => self.dividers += 1,
                Block::Entity(_) => self.entities += 1,
                Block::BlockGroup(inner) => {
                    match inner {
                        content_model::BlockGroup::ListItem(_) => self.list_items += 1,
                        _ => self.containers += 1,
                    }
                    self.visit(inner);
                }
            }
        }
    }
}

fn cmd_info(input: &Path) -> CmdResult {
    let model = read_model_file(input)?;
    let stats = ModelStats::collect(&model);
    let text = content_model_to_text(&model, &TextOptions::default());

    println!("{}", "Content Model Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Top-level blocks".bold(), model.blocks.len());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "List items".bold(), stats.list_items);
    println!("{}: {}", "Containers".bold(), stats.containers);
    println!("{}: {}", "Dividers".bold(), stats.dividers);
    println!("{}: {}", "Entities".bold(), stats.entities);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Segments".bold(), stats.segments);
    println!("{}: {}", "Images".bold(), stats.images);
    println!("{}: {}", "Selected segments".bold(), stats.selected);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "content-model".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rich-text content model tool");
    println!();
    println!("License: MIT");
}
