use clap::Parser;
use puente_core::{MilpProblem, ObjectiveSense, RowSense};
use puente_highs::solve_problem;
use puente_solver::{SolveConfig, SolveOutcome};
use serde::Serialize;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const SCHEMA_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Deterministic knapsack benchmark for the solve pipeline"
)]
struct Cli {
    /// Number of items in the generated knapsack instance
    #[arg(long, default_value_t = 24)]
    items: usize,

    /// Seed for both the instance generator and the engine
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of times to solve the same instance
    #[arg(long, default_value_t = 3)]
    repeat: u32,

    /// Wall-clock limit per solve in seconds; non-positive means none
    #[arg(long)]
    time_limit: Option<f64>,

    /// Stop each solve at the first feasible solution
    #[arg(long)]
    first_feasible: bool,

    /// Append one JSONL record per solve to this file
    #[arg(long)]
    jsonl: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct SolveRecord {
    schema_version: u32,
    run_id: String,
    items: usize,
    seed: u64,
    repetition: u32,
    status: String,
    objective_value: Option<f64>,
    solve_time_ms: f64,
    node_count: i64,
    mip_gap: Option<f64>,
}

/// SplitMix64 generator for reproducible instance data.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        low + self.next_u64() % (high - low + 1)
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Enable structured logging on stderr.
///
/// Reads `PUENTE_TRACE` for a filter directive; unset or `off` keeps the
/// benchmark silent so timing output stays clean.
fn init_tracing() {
    let level = std::env::var("PUENTE_TRACE").unwrap_or_else(|_| "off".to_string());
    let filter = if level.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level)
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.items == 0 {
        return Err(boxed_input_error("items must be greater than zero"));
    }
    if cli.repeat == 0 {
        return Err(boxed_input_error("repeat must be greater than zero"));
    }

    let run_id = build_run_id()?;
    let problem = generate_knapsack(cli.items, cli.seed);
    let config = build_config(&cli);

    let mut records = Vec::new();
    let mut outcomes = Vec::new();
    for repetition in 1..=cli.repeat {
        let outcome = solve_problem(&problem, &config)?;
        records.push(solve_record(&run_id, &cli, repetition, &outcome));
        outcomes.push(outcome);
    }

    print_summary(&records);

    let identical = objectives_bit_identical(&outcomes);
    println!(
        "objectives bit-identical across {} repeats: {}",
        cli.repeat,
        if identical { "yes" } else { "no" }
    );

    if let Some(path) = cli.jsonl.as_ref() {
        append_records_jsonl(path, &records)?;
        println!("artifact: {}", path.display());
    }

    if !identical {
        return Err(boxed_input_error("objective values diverged across repeats"));
    }

    Ok(())
}

/// Build a 0/1 knapsack instance: maximize item value subject to one
/// weight row at half the total weight.
fn generate_knapsack(items: usize, seed: u64) -> MilpProblem {
    let mut prng = SplitMix64::new(seed);
    let weights: Vec<f64> = (0..items)
        .map(|_| prng.next_in_range(1, 20) as f64)
        .collect();
    let values: Vec<f64> = (0..items)
        .map(|_| prng.next_in_range(1, 30) as f64)
        .collect();
    let capacity = (weights.iter().sum::<f64>() / 2.0).floor().max(1.0);

    MilpProblem {
        num_variables: items,
        num_constraints: 1,
        column_starts: (0..=items).collect(),
        row_indices: vec![0; items],
        values: weights,
        variable_lower: vec![0.0; items],
        variable_upper: vec![1.0; items],
        is_integer: vec![true; items],
        objective: values,
        row_sense: vec![RowSense::LessEqual],
        row_rhs: vec![capacity],
        row_range: vec![0.0],
        sense: ObjectiveSense::Maximize,
    }
}

fn build_config(cli: &Cli) -> SolveConfig {
    let mut config = SolveConfig::new()
        .with_random_seed(engine_seed(cli.seed))
        .with_first_feasible(cli.first_feasible);
    if let Some(seconds) = cli.time_limit {
        config = config.with_time_limit(seconds);
    }
    config
}

fn engine_seed(seed: u64) -> i32 {
    (seed % (i32::MAX as u64 + 1)) as i32
}

fn solve_record(run_id: &str, cli: &Cli, repetition: u32, outcome: &SolveOutcome) -> SolveRecord {
    SolveRecord {
        schema_version: SCHEMA_VERSION,
        run_id: run_id.to_string(),
        items: cli.items,
        seed: cli.seed,
        repetition,
        status: outcome.status.to_string(),
        objective_value: outcome.has_solution().then_some(outcome.objective_value),
        solve_time_ms: outcome.solve_time_seconds * 1000.0,
        node_count: outcome.node_count,
        mip_gap: outcome.mip_gap.is_finite().then_some(outcome.mip_gap),
    }
}

fn objectives_bit_identical(outcomes: &[SolveOutcome]) -> bool {
    let Some(first) = outcomes.first() else {
        return true;
    };
    let reference = first.objective_value.to_bits();
    outcomes.iter().all(|outcome| {
        outcome.status == first.status && outcome.objective_value.to_bits() == reference
    })
}

fn print_summary(records: &[SolveRecord]) {
    println!(
        "{:<5} {:<24} {:>14} {:>10} {:>8} {:>10}",
        "rep", "status", "objective", "time_ms", "nodes", "gap"
    );
    for record in records {
        println!(
            "{:<5} {:<24} {:>14} {:>10.3} {:>8} {:>10}",
            record.repetition,
            record.status,
            format_option_f64(record.objective_value),
            record.solve_time_ms,
            record.node_count,
            format_option_f64(record.mip_gap),
        );
    }
}

fn format_option_f64(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |inner| format!("{:.6}", inner))
}

fn append_records_jsonl(
    path: &Path,
    records: &[SolveRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn build_run_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .as_millis();
    Ok(format!("solve_{}", millis))
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
