use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use pt_app::{AppError, AppResult, DemoEngine, InspectorConfig, Session, demo_engine};
use pt_core::VarPath;
use pt_engine::SimEngine;
use pt_tree::TreeView;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pt-cli")]
#[command(about = "proptrace CLI - inspect and record simulation properties", long_about = None)]
struct Cli {
    /// Inspector config file (YAML); defaults are used if it does not exist
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Simulation time step in seconds
    #[arg(long, global = true, default_value_t = 0.01)]
    dt: f64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the property tree with current values
    Tree {
        /// Keep only branches whose names contain this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print the current value of one property
    Get {
        /// Property path, e.g. aero/coefficient/CD
        path: String,
    },
    /// Step the simulation and export the history of watched properties
    Run {
        /// Number of simulation steps
        #[arg(long, default_value_t = 100)]
        steps: usize,
        /// Property to record (repeatable)
        #[arg(short, long, required = true)]
        watch: Vec<String>,
        /// Assignment applied before stepping, as path=value (repeatable)
        #[arg(long)]
        set: Vec<String>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print step timing to stderr
        #[arg(long)]
        timing: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = pt_app::load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Tree { filter } => cmd_tree(config, cli.dt, filter.as_deref()),
        Commands::Get { path } => cmd_get(config, cli.dt, &path),
        Commands::Run {
            steps,
            watch,
            set,
            format,
            output,
            timing,
        } => {
            if timing {
                pt_core::timing::enable_timing();
            }
            cmd_run(
                config,
                cli.dt,
                steps,
                &watch,
                &set,
                format,
                output.as_deref(),
            )
        }
    }
}

fn open_session(config: InspectorConfig, dt: f64) -> AppResult<Session<DemoEngine>> {
    Session::new(demo_engine(dt)?, config)
}

fn cmd_tree(config: InspectorConfig, dt: f64, filter: Option<&str>) -> AppResult<()> {
    let mut session = open_session(config, dt)?;
    let expanded = TreeView::new(session.catalog().tree(), true);
    *session.tree_mut() = expanded;
    if let Some(pattern) = filter {
        let visible = session.search(pattern);
        if visible.is_empty() {
            println!("No properties match '{}'", pattern);
            return Ok(());
        }
    }

    for line in tree_lines(&session)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per visible row, indented two spaces per segment depth.
fn tree_lines(session: &Session<DemoEngine>) -> AppResult<Vec<String>> {
    let trie = session.catalog().tree();
    let mut lines = Vec::new();
    for row in session.tree().rows(trie) {
        let indent = "  ".repeat(row.depth);
        let line = match trie.payload(row.id) {
            Some(var) if row.is_leaf => {
                let value = session.read_value(var.path.as_str())?;
                format!(
                    "{}{:<28} {:>16}  {}",
                    indent,
                    row.name,
                    session.format_value(value),
                    if var.writable { "RW" } else { "RO" }
                )
            }
            _ => format!("{}{}/", indent, row.name),
        };
        lines.push(line);
    }
    Ok(lines)
}

fn cmd_get(config: InspectorConfig, dt: f64, path: &str) -> AppResult<()> {
    let session = open_session(config, dt)?;
    let value = session.read_value(path)?;
    println!("{} = {}", path, session.format_value(value));
    Ok(())
}

fn parse_assignment(input: &str) -> AppResult<(&str, &str)> {
    input
        .split_once('=')
        .map(|(path, value)| (path.trim(), value.trim()))
        .filter(|(path, _)| !path.is_empty())
        .ok_or_else(|| AppError::InvalidAssignment {
            input: input.to_string(),
        })
}

fn cmd_run(
    config: InspectorConfig,
    dt: f64,
    steps: usize,
    watch: &[String],
    set: &[String],
    format: ExportFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut session = open_session(config, dt)?;

    for assignment in set {
        let (path, text) = parse_assignment(assignment)?;
        let value = session.edit_value(path, text)?;
        eprintln!("set {} = {}", path, value);
    }

    let vars = watch
        .iter()
        .map(|p| Ok(session.catalog().variable(p)?.path.clone()))
        .collect::<AppResult<Vec<VarPath>>>()?;
    session.bind(None, &vars)?;

    for _ in 0..steps {
        session.step_once()?;
    }
    tracing::info!(
        steps,
        sim_time = session.catalog().engine().sim_time(),
        "run finished"
    );

    match output {
        Some(path) => {
            let file = File::create(path)?;
            write_history(&session, format, BufWriter::new(file))?;
            eprintln!(
                "✓ Exported {} samples of {} properties to {}",
                session.log().ncol(),
                vars.len(),
                path.display()
            );
        }
        None => write_history(&session, format, io::stdout().lock())?,
    }

    if pt_core::timing::is_enabled() {
        eprintln!("Timing: {}", session.surface().stats_summary());
    }
    Ok(())
}

fn write_history<W: Write>(
    session: &Session<DemoEngine>,
    format: ExportFormat,
    mut out: W,
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => session.log().write_csv(&mut out)?,
        ExportFormat::Json => {
            session.log().write_json(&mut out)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
