use std::io::{BufRead, BufWriter, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use silt_core::Policy;

#[derive(Parser)]
#[command(name = "silt", about = "Stream-curation driver: pipe (S, T) pairs through a policy")]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the deterministic cross-validation battery as "S T" lines
    Generate {
        /// Largest buffer-size exponent to cover (sizes 2^0 .. 2^max-exp)
        #[arg(long, default_value_t = 20)]
        max_exp: u32,

        /// Exhaustive times per buffer size
        #[arg(long, default_value_t = 4096)]
        times: u64,
    },

    /// Run one operation of one policy over "S T" lines from stdin
    Run {
        /// Curation policy
        policy: PolicyArg,

        /// Operation to apply per input line
        operation: Operation,

        /// Emit one JSON object per line instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Steady,
    Stretched,
    Tilted,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Steady => Policy::Steady,
            PolicyArg::Stretched => Policy::Stretched,
            PolicyArg::Tilted => Policy::Tilted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Operation {
    /// has_ingest_capacity(S, T) -> true/false
    HasCapacity,
    /// get_ingest_capacity(S) -> bound or "unbounded"
    Capacity,
    /// assign_storage_site(S, T) -> site or "-" when dropped
    Assign,
    /// lookup_ingest_times(S, T) -> S space-separated times, "-" when empty
    Lookup,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { max_exp, times } => cmd_generate(max_exp, times),
        Commands::Run {
            policy,
            operation,
            json,
        } => cmd_run(policy.into(), operation, json),
    }
}

fn cmd_generate(max_exp: u32, times: u64) -> Result<()> {
    let cases = silt_core::generate_cases(max_exp, times);
    tracing::debug!("emitting {} battery cases", cases.len());
    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    for (s, t) in cases {
        writeln!(out, "{s} {t}")?;
    }
    out.flush().context("failed to write battery cases")
}

fn cmd_run(policy: Policy, operation: Operation, json: bool) -> Result<()> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    let mut lines = 0u64;

    for (number, line) in stdin.lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let (s, t) = parse_case(&line).with_context(|| format!("input line {}", number + 1))?;
        run_one(policy, operation, s, t, json, &mut out)
            .with_context(|| format!("input line {}: S={s} T={t}", number + 1))?;
        lines += 1;
    }

    tracing::debug!("processed {lines} lines with {policy}");
    out.flush().context("failed to write results")
}

/// Parse an "S T" line; the capacity operation also accepts a bare "S".
fn parse_case(line: &str) -> Result<(u64, u64)> {
    let mut fields = line.split_whitespace();
    let s = fields
        .next()
        .context("empty input line")?
        .parse::<u64>()
        .context("buffer size is not an integer")?;
    let t = match fields.next() {
        Some(field) => field.parse::<u64>().context("time is not an integer")?,
        None => 0,
    };
    if fields.next().is_some() {
        bail!("expected at most two fields per line");
    }
    Ok((s, t))
}

fn run_one(
    policy: Policy,
    operation: Operation,
    s: u64,
    t: u64,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match operation {
        Operation::HasCapacity => {
            let has = policy.has_ingest_capacity(s, t);
            if json {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({"s": s, "t": t, "has_capacity": has})
                )?;
            } else {
                writeln!(out, "{has}")?;
            }
        }
        Operation::Capacity => {
            let capacity = policy.get_ingest_capacity(s);
            if json {
                writeln!(out, "{}", serde_json::json!({"s": s, "capacity": capacity}))?;
            } else {
                match capacity {
                    Some(bound) => writeln!(out, "{bound}")?,
                    None => writeln!(out, "unbounded")?,
                }
            }
        }
        Operation::Assign => {
            if !policy.has_ingest_capacity(s, t) {
                bail!("no ingest capacity");
            }
            let site = policy.assign_storage_site(s, t);
            if json {
                writeln!(out, "{}", serde_json::json!({"s": s, "t": t, "site": site}))?;
            } else {
                match site {
                    Some(site) => writeln!(out, "{site}")?,
                    None => writeln!(out, "-")?,
                }
            }
        }
        Operation::Lookup => {
            let times = policy.lookup_ingest_times(s, t)?;
            if json {
                writeln!(
                    out,
                    "{}",
                    serde_json::json!({"s": s, "t": t, "ingest_times": times})
                )?;
            } else {
                let row: Vec<String> = times
                    .iter()
                    .map(|v| v.map_or_else(|| "-".to_string(), |v| v.to_string()))
                    .collect();
                writeln!(out, "{}", row.join(" "))?;
            }
        }
    }
    Ok(())
}
