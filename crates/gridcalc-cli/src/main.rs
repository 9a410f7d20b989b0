//! gridcalc CLI - formula evaluation and CSV calculation tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::prelude::*;
use gridcalc::{formula_references, LineTerminator};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula and print the result
    Eval {
        /// Formula or cell text, e.g. "=SUM(A1:A3)"
        formula: String,

        /// CSV file supplying the cells the formula reads (default: all empty)
        #[arg(short, long)]
        grid: Option<PathBuf>,

        /// Skip the first row of the grid file
        #[arg(long)]
        header: bool,

        /// Largest range a function may expand to
        #[arg(long, default_value_t = EvaluationOptions::DEFAULT_MAX_RANGE_CELLS)]
        max_range_cells: u64,
    },

    /// Calculate every formula in a CSV file and output the displayed values
    #[command(alias = "calculate")]
    Calc {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter for input and output (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Skip the first row of the input
        #[arg(long)]
        header: bool,

        /// Largest range a function may expand to
        #[arg(long, default_value_t = EvaluationOptions::DEFAULT_MAX_RANGE_CELLS)]
        max_range_cells: u64,
    },

    /// List the cells and ranges a formula references
    Refs {
        /// Formula text
        formula: String,
    },

    /// Report whether text would be treated as a formula
    Check {
        /// Cell text
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            formula,
            grid,
            header,
            max_range_cells,
        } => eval(&formula, grid.as_deref(), header, max_range_cells),
        Commands::Calc {
            input,
            output,
            delimiter,
            header,
            max_range_cells,
        } => calc(&input, output.as_deref(), delimiter, header, max_range_cells),
        Commands::Refs { formula } => list_references(&formula),
        Commands::Check { value } => check(&value),
    }
}

fn eval(formula: &str, grid: Option<&Path>, header: bool, max_range_cells: u64) -> Result<()> {
    let grid = match grid {
        Some(path) => read_grid(path, b',', header)?,
        None => Grid::new(),
    };

    let options = EvaluationOptions { max_range_cells };
    let output = gridcalc::evaluate_formula_with_options(formula, &grid, &options);
    println!("{}", output);

    Ok(())
}

fn calc(
    input: &Path,
    output: Option<&Path>,
    delimiter: char,
    header: bool,
    max_range_cells: u64,
) -> Result<()> {
    let delimiter = u8::try_from(delimiter)
        .with_context(|| format!("Delimiter '{}' is not a single byte", delimiter))?;

    let grid = read_grid(input, delimiter, header)?;

    let calculated = grid.calculate_with_options(&CalculationOptions {
        evaluation: EvaluationOptions { max_range_cells },
    });

    let stats = &calculated.stats;
    eprintln!(
        "Calculated {} of {} formulas ({} errors, {} circular)",
        stats.cells_calculated, stats.formula_count, stats.errors, stats.circular_references
    );

    let options = CsvWriteOptions {
        delimiter,
        line_terminator: LineTerminator::LF,
        ..Default::default()
    };

    if let Some(output_path) = output {
        CsvWriter::write_file(&calculated.values, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        CsvWriter::write(&calculated.values, &mut handle, &options)
            .context("Failed to write to stdout")?;
        handle.flush().context("Failed to write to stdout")?;
    }

    Ok(())
}

fn read_grid(path: &Path, delimiter: u8, header: bool) -> Result<Grid> {
    let options = CsvReadOptions {
        delimiter,
        has_header: header,
        ..Default::default()
    };
    CsvReader::read_file(path, &options)
        .with_context(|| format!("Failed to open '{}'", path.display()))
}

fn list_references(formula: &str) -> Result<()> {
    let references = formula_references(formula);
    if references.is_empty() {
        eprintln!("No cell references found");
    }

    for reference in references {
        println!("{}\t{} cells", reference, reference.cell_count());
    }

    Ok(())
}

fn check(value: &str) -> Result<()> {
    if is_formula(value) {
        println!("formula");
    } else {
        println!("text");
    }

    Ok(())
}
