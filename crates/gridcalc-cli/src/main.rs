//! gridcalc CLI - evaluate spreadsheet triple files

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gridcalc::prelude::*;
use gridcalc::{TripleReadOptions, TripleWriteOptions, TripleWriter, DEFAULT_COLUMNS, DEFAULT_ROWS};
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Evaluate spreadsheet formulas stored as triple files")]
struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct GridArgs {
    /// Number of rows in the grid
    #[arg(long, global = true, default_value_t = DEFAULT_ROWS)]
    rows: u32,

    /// Number of columns in the grid
    #[arg(long, global = true, default_value_t = DEFAULT_COLUMNS)]
    columns: u16,

    /// Field delimiter of the triple file (default: comma)
    #[arg(short, long, global = true, default_value = ",")]
    delimiter: char,

    /// The triple file starts with a header record
    #[arg(long, global = true)]
    header: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of every non-empty cell
    Values {
        /// Input triple file
        input: PathBuf,
    },

    /// Print the value of one cell
    Get {
        /// Input triple file
        input: PathBuf,

        /// Cell address, e.g. B7
        cell: String,
    },

    /// Write the formulas back out as a normalized triple file
    Formulas {
        /// Input triple file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a triple file
    Info {
        /// Input triple file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let args = &cli.grid;

    match &cli.command {
        Commands::Values { input } => print_values(input, args),
        Commands::Get { input, cell } => print_cell(input, cell, args),
        Commands::Formulas { input, output } => write_formulas(input, output.as_deref(), args),
        Commands::Info { input } => show_info(input, args),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{}' is not a single ASCII character", delimiter))
}

fn load(input: &Path, args: &GridArgs) -> Result<Grid> {
    let options = GridOptions {
        rows: args.rows,
        columns: args.columns,
        ..Default::default()
    };
    let read_options = TripleReadOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        has_header: args.header,
        ..Default::default()
    };

    let grid = Grid::open_with(input, options, &read_options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    debug!("Loaded {} cells from '{}'", grid.len(), input.display());
    Ok(grid)
}

fn print_values(input: &Path, args: &GridArgs) -> Result<()> {
    let mut grid = load(input, args)?;
    grid.recalculate();

    let addresses: Vec<CellAddress> = grid.cells().map(|(addr, _)| addr).collect();
    let mut stdout = io::stdout().lock();
    for addr in addresses {
        let text = grid.display_text(addr);
        writeln!(stdout, "{}\t{}", addr, text).context("Failed to write to stdout")?;
    }

    Ok(())
}

fn print_cell(input: &Path, cell: &str, args: &GridArgs) -> Result<()> {
    let addr =
        CellAddress::parse(cell).with_context(|| format!("Invalid cell address '{}'", cell))?;
    let mut grid = load(input, args)?;
    grid.check_bounds(addr)?;

    println!("{}", grid.display_text(addr));
    Ok(())
}

fn write_formulas(input: &Path, output: Option<&Path>, args: &GridArgs) -> Result<()> {
    let grid = load(input, args)?;
    let triples = grid.triples();
    let options = TripleWriteOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        write_header: args.header,
        ..Default::default()
    };

    if let Some(output_path) = output {
        TripleWriter::write_file(&triples, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} cells to '{}'", triples.len(), output_path.display());
    } else {
        TripleWriter::write(&triples, io::stdout().lock(), &options)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_info(input: &Path, args: &GridArgs) -> Result<()> {
    let mut grid = load(input, args)?;
    let expressions = grid
        .cells()
        .filter(|(_, cell)| gridcalc::classify(cell.formula()).is_expression())
        .count();
    let stats = grid.recalculate();

    println!("File: {}", input.display());
    println!("Grid: {} rows x {} columns", grid.rows(), grid.columns());
    println!("Cells: {}", stats.cells);
    println!("Formulas: {}", expressions);
    println!("Invalid values: {}", stats.invalid);
    println!("Circular references: {}", stats.circular_references);

    Ok(())
}
