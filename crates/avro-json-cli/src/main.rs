use std::fs::{self, File};
use std::io::{Read, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NonFiniteArg {
    Reject,
    String,
}

#[derive(Parser, Debug)]
#[command(
    name = "avro-json-cli",
    about = "Encode a JSON datum as Avro JSON under a schema",
    version
)]
struct Args {
    /// Schema file (.avsc)
    #[arg(short, long)]
    schema: PathBuf,

    /// Pretty-print the output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Spaces per level when pretty-printing
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// How NaN and infinities are written
    #[arg(long, value_enum, default_value_t = NonFiniteArg::Reject)]
    non_finite: NonFiniteArg,

    /// Escape non-ASCII characters
    #[arg(long, default_value_t = false)]
    ascii: bool,

    /// Input datum file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let schema_text = fs::read_to_string(&args.schema)
        .with_context(|| format!("reading schema {}", args.schema.display()))?;
    let schema = avro_json::Schema::parse_str(&schema_text)
        .with_context(|| format!("parsing schema {}", args.schema.display()))?;
    debug!(schema = %schema, "loaded schema");

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path)?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    let datum: serde_json::Value = serde_json::from_str(&buf).context("parsing input datum")?;

    let non_finite = match args.non_finite {
        NonFiniteArg::Reject => avro_json::NonFinite::Reject,
        NonFiniteArg::String => avro_json::NonFinite::AsString,
    };
    let options = avro_json::Options {
        non_finite,
        indent: args.pretty.then_some(args.indent),
        ascii_only: args.ascii,
    };

    let out = avro_json::encode_json_datum(&schema, &datum, &options)?;
    println!("{}", out);

    Ok(())
}
