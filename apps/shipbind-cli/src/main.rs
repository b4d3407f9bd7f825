//! shipbind - parse a carrier XML document and print it back.
//!
//! The document is bound with the bundled carrier schemas, re-exported to
//! stdout (as XML, or as JSON with `--json`), and any schema warnings are
//! written to stderr.
//!
//! # Usage
//!
//! ```text
//! shipbind rate-request.xml
//! shipbind --root-type RateCalculatorResponse --compact reply.xml
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SHIPBIND_USE_CAPTURED_PREFIXES` | `true` | Re-use the source's namespace prefixes |
//! | `SHIPBIND_SOURCE_LINES` | `true` | Report source lines in warnings |
//! | `SHIPBIND_PRETTY_PRINT` | `true` | Indent the output |
//! | `SHIPBIND_XML_DECLARATION` | `true` | Start the output with an XML declaration |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use shipbind_core::ShipBindConfig;
use shipbind_xml::{BuildOptions, Collector, ExportOptions, ParsedDocument, TypeRegistry, XmlError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Root type used when the document's root tag is not a known element.
const DEFAULT_ROOT_TYPE: &str = "RateCalculatorRequest";

const SEPARATOR: &str = "--------------------------------------------------";

#[derive(Debug, Parser)]
#[command(name = "shipbind")]
#[command(about = "Parse carrier XML with the bundled schemas and print it back")]
#[command(version)]
struct Cli {
    /// XML document to parse
    file: PathBuf,

    /// Bind the root element as this type instead of looking up its tag
    #[arg(long, value_name = "TYPE")]
    root_type: Option<String>,

    /// Print without indentation
    #[arg(long)]
    compact: bool,

    /// Omit the XML declaration
    #[arg(long)]
    no_declaration: bool,

    /// Ignore the namespace prefixes of the source document
    #[arg(long)]
    no_captured_prefixes: bool,

    /// Print the typed tree as JSON instead of XML
    #[arg(long)]
    json: bool,

    /// Do not print warnings
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn export_options(&self, config: &ShipBindConfig) -> ExportOptions {
        let mut options = ExportOptions::from(config);
        options.pretty &= !self.compact;
        options.xml_declaration &= !self.no_declaration;
        options.use_captured_prefixes &= !self.no_captured_prefixes;
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ShipBindConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    let registry = shipbind_schemas::registry();
    let document = parse(&cli.file, cli.root_type.as_deref(), &registry, &config)?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        let json = shipbind_xml::to_json(&document.root);
        serde_json::to_writer_pretty(&mut stdout, &json).context("failed to write JSON")?;
        writeln!(stdout)?;
    } else {
        document
            .export(&mut stdout, &cli.export_options(&config))
            .context("failed to export document")?;
    }
    stdout.flush()?;

    if !cli.quiet {
        write_warnings(&document.diagnostics, io::stderr().lock())?;
    }
    Ok(())
}

/// Parses `path`, falling back to the default root type for unknown roots.
fn parse(
    path: &Path,
    root_type: Option<&str>,
    registry: &TypeRegistry,
    config: &ShipBindConfig,
) -> Result<ParsedDocument> {
    let options = BuildOptions::from(config);
    let parsed = match root_type {
        Some(root_type) => shipbind_xml::parse_file_as(path, root_type, registry, &options),
        None => match shipbind_xml::parse_file(path, registry, &options) {
            Err(XmlError::UnknownElement { tag, .. }) => {
                debug!(%tag, fallback = DEFAULT_ROOT_TYPE, "unknown root element");
                shipbind_xml::parse_file_as(path, DEFAULT_ROOT_TYPE, registry, &options)
            }
            other => other,
        },
    };
    parsed.with_context(|| format!("failed to parse {}", path.display()))
}

fn write_warnings<W: Write>(diagnostics: &Collector, mut writer: W) -> io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{SEPARATOR}")?;
    writeln!(writer, "----- Warnings -- count: {} -----", diagnostics.len())?;
    diagnostics.write_messages(&mut writer)?;
    writeln!(writer, "{SEPARATOR}")
}

/// Initialize the tracing subscriber, writing to stderr.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    Ok(())
}
