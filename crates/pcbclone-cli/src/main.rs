mod error;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::ErrorCode;

#[derive(Parser)]
#[command(name = "pcbclone", version, about = "Replicate a template layout across a grid of clones", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move the clone footprints and copy zones, tracks and drawings
    Clone {
        /// Board snapshot (.json, .yaml or .yml)
        #[arg(value_name = "BOARD")]
        board: PathBuf,

        /// Where to write the cloned board [default: <BOARD stem>.cloned.<ext>]
        #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Overwrite the input board
        #[arg(long)]
        in_place: bool,

        /// Write the run report as JSON
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Show the template, clone designators and net map without changing anything
    Plan {
        /// Board snapshot (.json, .yaml or .yml)
        #[arg(value_name = "BOARD")]
        board: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Clone settings. Flags override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct GridArgs {
    /// Clone config file (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Designator spacing between sheets
    #[arg(long)]
    pub modulo: Option<u32>,

    /// First designator index of the template sheet
    #[arg(long)]
    pub start: Option<u32>,

    /// Column displacement in mm, as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_vec2, allow_hyphen_values = true)]
    pub step_x: Option<[f64; 2]>,

    /// Row displacement in mm, as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_vec2, allow_hyphen_values = true)]
    pub step_y: Option<[f64; 2]>,

    /// Grid size as WIDTHxHEIGHT, template cell included
    #[arg(long, value_name = "WxH", value_parser = parse_grid)]
    pub grid: Option<(u32, u32)>,

    /// Layer id of the marker zone
    #[arg(long)]
    pub marker_layer: Option<u32>,
}

fn parse_vec2(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number \"{v}\": {e}"))
    };
    Ok([parse(x)?, parse(y)?])
}

fn parse_grid(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT but got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid grid dimension \"{v}\": {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ErrorCode::Usage.exit_code()
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Clone {
            board,
            output,
            in_place,
            report,
            grid,
        } => run::run_clone(run::CloneArgs {
            board,
            output,
            in_place,
            report,
            grid,
        }),
        Command::Plan { board, json, grid } => run::run_plan(&board, json, &grid),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.code.exit_code()
        }
    }
}
