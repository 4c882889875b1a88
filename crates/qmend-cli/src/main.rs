// qmend: correct free-text queries through the querymend pipeline.
//
// Reads queries from arguments, or from stdin (one per line) when no
// query arguments are given. Without a database URL the built-in
// country-name demo source is used.
//
// Usage:
//   qmend [OPTIONS] [QUERY...]
//
// Options:
//   -f, --format           Wrap changed tokens in the marker pair
//   -m, --mode MODE        Acceptance mode: top | threshold (default: threshold)
//   -t, --threshold N      Acceptance threshold (default: 0.3)
//   -k, --top-k N          Candidates requested per lookup (default: 5)
//       --min-len N        Minimum token length for lookup (default: 3)
//       --database-url URL Postgres URL (requires the `postgres` feature;
//                          also read from DATABASE_URL)
//   -h, --help             Print help

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Arc;

use qmend_core::{AcceptanceMode, PipelineConfig};
use qmend_pipeline::{Candidate, MemorySource, QueryMender, SuggestionSource};

struct CliOptions {
    format: bool,
    config: PipelineConfig,
    database_url: Option<String>,
    queries: Vec<String>,
}

/// Print an error message and exit with code 1.
fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn print_help() {
    println!("qmend: correct free-text queries against a fuzzy dictionary.");
    println!();
    println!("Usage: qmend [OPTIONS] [QUERY...]");
    println!();
    println!("If QUERY arguments are given, corrects each query.");
    println!("Otherwise reads queries from stdin (one per line).");
    println!();
    println!("Options:");
    println!("  -f, --format            Wrap changed tokens in the marker pair");
    println!("  -m, --mode MODE         Acceptance mode: top | threshold");
    println!("  -t, --threshold N       Acceptance threshold (default: 0.3)");
    println!("  -k, --top-k N           Candidates requested per lookup (default: 5)");
    println!("      --min-len N         Minimum token length for lookup (default: 3)");
    println!("      --database-url URL  Postgres URL (also read from DATABASE_URL)");
    println!("  -h, --help              Print this help");
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        format: false,
        config: PipelineConfig::default(),
        database_url: std::env::var("DATABASE_URL").ok(),
        queries: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value_for = |flag: &str| {
            iter.next()
                .cloned()
                .unwrap_or_else(|| fatal(&format!("{flag} requires a value")))
        };
        match arg.as_str() {
            "-f" | "--format" => options.format = true,
            "-m" | "--mode" => {
                options.config.acceptance_mode = match value_for("--mode").as_str() {
                    "top" => AcceptanceMode::TopCandidate,
                    "threshold" => AcceptanceMode::Threshold,
                    other => fatal(&format!("unknown mode {other:?} (expected top | threshold)")),
                };
            }
            "-t" | "--threshold" => {
                options.config.threshold = value_for("--threshold")
                    .parse()
                    .unwrap_or_else(|_| fatal("invalid number for --threshold"));
            }
            "-k" | "--top-k" => {
                options.config.top_k = value_for("--top-k")
                    .parse()
                    .unwrap_or_else(|_| fatal("invalid number for --top-k"));
            }
            "--min-len" => {
                options.config.min_token_length = value_for("--min-len")
                    .parse()
                    .unwrap_or_else(|_| fatal("invalid number for --min-len"));
            }
            "--database-url" => options.database_url = Some(value_for("--database-url")),
            _ if !arg.starts_with('-') => options.queries.push(arg.clone()),
            other => fatal(&format!("unknown option {other:?}")),
        }
    }

    options
}

/// Built-in demo source with a handful of country-name corrections.
fn demo_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.insert("Indi", vec![Candidate::new("India", 0.8)]);
    source.insert("apan", vec![Candidate::new("Japan", 0.8)]);
    source.insert("ussia", vec![Candidate::new("Russia", 0.75)]);
    source.insert("merica", vec![Candidate::new("America", 0.7)]);
    source
}

async fn build_source(database_url: Option<&str>) -> Arc<dyn SuggestionSource> {
    match database_url {
        #[cfg(feature = "postgres")]
        Some(url) => {
            let source = qmend_pipeline::postgres::PgSource::connect(url)
                .await
                .unwrap_or_else(|e| fatal(&e.to_string()));
            Arc::new(source)
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => fatal("a database URL was given but qmend was built without the `postgres` feature"),
        None => Arc::new(demo_source()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let options = parse_args(&args);
    let source = build_source(options.database_url.as_deref()).await;
    let mender = QueryMender::new(source, options.config.clone());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let queries: Vec<String> = if options.queries.is_empty() {
        let stdin = io::stdin();
        stdin
            .lock()
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        options.queries.clone()
    };

    for query in &queries {
        match mender.correct(query, options.format).await {
            Ok(corrected) => {
                let _ = writeln!(out, "{corrected}");
            }
            Err(e) => fatal(&e.to_string()),
        }
    }
}
