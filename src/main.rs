// LaTeX Grid Editor - headless export and import

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use latex_grid_editor::{codec, export, logging, persistence, EditorConfig, ExportFormat, Grid};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "latex_grid_editor")]
#[command(about = "Convert grid files to LaTeX tables and other text formats")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a saved grid file to stdout
    #[command(after_help = "\
Examples:
  latex_grid_editor export table.json
  latex_grid_editor export table.json --format tabular
  latex_grid_editor export table.json --format brackets
  latex_grid_editor export table.json --format 'Special Matrix' --config prefs.json")]
    Export {
        /// Grid file written by the editor
        file: PathBuf,

        /// Output format: tab, html, brackets, braces, angle, maxima, sage,
        /// or a LaTeX grid type (longtable, tabular, tabbing, array, matrix,
        /// "Special Matrix"). Defaults to the configured grid type.
        #[arg(long, short = 'f')]
        format: Option<String>,

        /// Config file to take export preferences from
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Turn tab-delimited or LaTeX table text into a grid file
    #[command(after_help = "\
Examples:
  latex_grid_editor import \"$(cat data.tsv)\" -o table.json
  cat table.tex | latex_grid_editor import - --markup -o table.json")]
    Import {
        /// Text to import, or - to read stdin
        text: String,

        /// Grid file to write
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Parse the text as a LaTeX table instead of tab-delimited rows
        #[arg(long)]
        markup: bool,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            file,
            format,
            config,
        } => cmd_export(&file, format.as_deref(), config.as_deref()),
        Commands::Import {
            text,
            output,
            markup,
        } => cmd_import(&text, &output, markup),
    }
}

fn cmd_export(file: &Path, format: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => EditorConfig::load_from(path)?,
        None => EditorConfig::load(),
    };

    let cells = persistence::load_grid(file)?;
    let grid = Grid::from_contents(&cells);

    let format = match format {
        Some(tag) => ExportFormat::from_tag(tag, &config.export)
            .with_context(|| format!("Invalid --format '{}'", tag))?,
        None => ExportFormat::Markup(config.export.format_options()),
    };

    print!("{}", export::render(grid.cells(), &format));
    Ok(())
}

fn cmd_import(text: &str, output: &Path, markup: bool) -> Result<()> {
    let text = if text == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        text.to_string()
    };

    let block = if markup {
        codec::parse_markup_table(&text)
    } else {
        codec::from_tab_delimited(&text)
    };
    anyhow::ensure!(!block.is_empty(), "Nothing to import: the text has no rows");

    let grid = Grid::from_contents(&block);
    persistence::save_grid(output, grid.cells())?;
    eprintln!(
        "✓ Wrote {} x {} grid to {}",
        grid.rows(),
        grid.cols(),
        output.display()
    );
    Ok(())
}
