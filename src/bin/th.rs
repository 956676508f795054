//! Encode, decode and navigate timehashes from the command line.

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use timehash::{DomainPolicy, Encoder, Range, TimeHash};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "th")]
#[command(about = "Encode, decode and navigate variable precision timehashes")]
#[command(after_help = "DOMAIN:\n  \
    Instants are mapped onto 1970-01-01 .. 2098-01-01 UTC. Use --clamp to\n  \
    saturate out-of-range instants to the first or last code instead of failing.\n\n\
LOGGING:\n  \
    Set RUST_LOG (e.g. RUST_LOG=debug) or pass -v.")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Symbols per code (0 = default of 10)
    #[arg(short, long, global = true, env = "TIMEHASH_PRECISION", default_value = "10")]
    precision: i32,

    /// Saturate out-of-domain instants instead of rejecting them
    #[arg(long, global = true)]
    clamp: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Encode an instant (defaults to now)
    Encode {
        /// Epoch seconds
        #[arg(long, conflicts_with = "date")]
        seconds: Option<f64>,
        /// RFC 3339 date-time, e.g. 2016-05-27T01:55:57Z
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Decode a code to its center, margin and window
    Decode { code: String },
    /// Print the windows before and after a code
    Neighbors { code: String },
    /// Print the window before, the code itself, and the window after
    Expand { code: String },
    /// Move a code by N windows (negative = earlier)
    Shift {
        code: String,
        #[arg(allow_hyphen_values = true)]
        n: i64,
    },
    /// List the codes covering a span of epoch seconds, one per line
    /// (JSON strings with --json)
    Range {
        start: f64,
        end: f64,
        /// Include one extra window on each side
        #[arg(long)]
        padded: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let policy = if args.clamp {
        DomainPolicy::Clamp
    } else {
        DomainPolicy::Reject
    };
    let encoder = Encoder::new().precision(args.precision).policy(policy);

    match &args.command {
        Command::Encode { seconds, date } => {
            let code = match (seconds, date) {
                (Some(seconds), _) => encoder.encode(*seconds)?,
                (None, Some(date)) => encoder.encode_date(date)?,
                (None, None) => encoder.encode_date(&Utc::now())?,
            };
            debug!(code = %code, precision = args.precision, "encoded");
            emit(args.json, &json!({ "code": code }), &code);
        }
        Command::Decode { code } => {
            let hash = TimeHash::new(code.as_str())?;
            debug!(code = %hash, center = hash.center(), error = hash.error(), "decoded");
            let date = hash.to_datetime().map(|d| d.to_rfc3339());
            let value = json!({
                "code": hash.code(),
                "center": hash.center(),
                "error": hash.error(),
                "start": hash.start(),
                "end": hash.end(),
                "date": date,
            });
            let text = format!(
                "{:.6} +/- {:.6} s ({})",
                hash.center(),
                hash.error(),
                date.as_deref().unwrap_or("unrepresentable")
            );
            emit(args.json, &value, &text);
        }
        Command::Neighbors { code } => {
            let n = timehash::neighbors(code)?;
            emit(args.json, &json!(n), &format!("{}\n{}", n.before, n.after));
        }
        Command::Expand { code } => {
            let n = timehash::expand(code)?;
            emit(args.json, &json!(n), &n.to_array().join("\n"));
        }
        Command::Shift { code, n } => {
            let shifted = timehash::shift(code, *n)?;
            debug!(code = %code, n, shifted = %shifted, "shifted");
            emit(args.json, &json!({ "code": shifted }), &shifted);
        }
        Command::Range { start, end, padded } => {
            let mut codes = timehash::range(*start, *end, args.precision)?;
            if *padded {
                codes = codes.padded();
            }
            debug!(start, end, precision = args.precision, windows = ?codes.size_hint().1, "range");
            stream_codes(codes, args.json)?;
        }
    }
    Ok(())
}

/// Write codes as the iterator yields them; a closed pipe ends output quietly
fn stream_codes(codes: Range, as_json: bool) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    match write_codes(&mut out, codes, as_json) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_codes(out: &mut impl Write, codes: Range, as_json: bool) -> io::Result<()> {
    for code in codes {
        if as_json {
            writeln!(out, "{}", json!(code))?;
        } else {
            writeln!(out, "{code}")?;
        }
    }
    out.flush()
}

fn emit(as_json: bool, value: &serde_json::Value, text: &str) {
    if as_json {
        println!("{value}");
    } else {
        println!("{text}");
    }
}
