use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use trace_propagation::config::{load_config, TracerConfig};
use trace_propagation::observability::logging::init_logging;
use trace_propagation::propagation::HttpHeadersCarrier;
use trace_propagation::{TraceContext, Tracer};

#[derive(Parser)]
#[command(name = "propagate-cli")]
#[command(about = "Inject, extract and send trace contexts", long_about = None)]
struct Cli {
    /// TOML configuration file selecting the wire field names.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headers carrying a trace context
    Inject {
        #[arg(long)]
        trace_id: u64,
        #[arg(long)]
        span_id: u64,
        /// Baggage item as key=value (repeatable)
        #[arg(long = "baggage", value_parser = parse_pair)]
        baggage: Vec<(String, String)>,
    },
    /// Rebuild a trace context from headers
    Extract {
        /// Header as 'name: value' (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Start a new trace and send it with a GET request
    Send {
        url: String,
        /// Baggage item as key=value (repeatable)
        #[arg(long = "baggage", value_parser = parse_pair)]
        baggage: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TracerConfig::default(),
    };
    init_logging(&config.observability)?;
    let tracer = Tracer::from_config(&config.propagation);

    match cli.command {
        Commands::Inject { trace_id, span_id, baggage } => {
            let ctx = TraceContext::new(trace_id, span_id);
            for (key, value) in baggage {
                ctx.set_baggage_item(key, value);
            }
            let mut headers = HeaderMap::new();
            tracer.inject(&ctx, &mut HttpHeadersCarrier(&mut headers))?;
            print_headers(&headers);
        }
        Commands::Extract { headers: pairs } => {
            let mut headers = HeaderMap::new();
            for (name, value) in pairs {
                headers.append(
                    HeaderName::from_bytes(name.as_bytes())?,
                    HeaderValue::from_str(&value)?,
                );
            }
            let ctx = tracer.extract(&HttpHeadersCarrier(&headers))?;
            println!("{}", serde_json::to_string_pretty(&ctx.snapshot())?);
        }
        Commands::Send { url, baggage } => {
            let span = tracer.start_span("cli.send");
            for (key, value) in baggage {
                span.set_baggage_item(key, value);
            }
            let mut headers = HeaderMap::new();
            tracer.inject(span.context(), &mut HttpHeadersCarrier(&mut headers))?;
            tracing::info!(trace_id = span.trace_id(), span_id = span.span_id(), url = %url, "Sending traced request");

            let res = reqwest::Client::new().get(&url).headers(headers).send().await?;
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: server returned status {}", status);
            }
            println!("{}", res.text().await?);
        }
    }

    Ok(())
}

fn print_headers(headers: &HeaderMap) {
    for (name, value) in headers {
        println!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {s:?}"))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected 'name: value', got {s:?}"))
}
