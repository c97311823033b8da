use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use glossa_protocol::{Derivation, Dictionary};
use glossa_realizer::{log, LogEntry, Lexicon, Realizer, RenderConfig};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Compiles glossa lexicons and renders notation files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON lexicon to an rkyv binary
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Render a notation file, one sentence per line
    Render {
        /// JSON or compiled lexicon; the bundled one when omitted
        #[arg(short, long, value_name = "FILE")]
        lexicon: Option<PathBuf>,

        /// RenderConfig as JSON
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print sentences, log and derivations as JSON
        #[arg(long)]
        json: bool,

        /// Fail sentences whose verbs carry undeclared roles
        #[arg(long)]
        strict: bool,

        #[arg(value_name = "NOTATION_FILE")]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    sentences: Vec<&'a str>,
    log: Vec<LogEntry>,
    derivations: Vec<&'a Derivation>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Render { lexicon, config, json, strict, input } => {
            render(lexicon.as_deref(), config.as_deref(), json, strict, &input)
        }
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    println!("📖 Reading JSON from {:?}...", input);
    let input_data = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;

    // 1. Parse and check for duplicate entries before writing anything
    let dict: Dictionary = serde_json::from_str(&input_data)?;
    Lexicon::from_dictionary(dict.clone())?;

    println!("⚙️  Compiling lexicon version {} with {} entries...", dict.version, dict.entries.len());

    // 2. Serialize to rkyv
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&dict)
        .map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    // 3. The archive must load back before it is written
    Lexicon::from_archive(&bytes)?;
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    println!("✅ Success! Binary written to {:?}", output);
    Ok(())
}

fn load_lexicon(path: Option<&Path>) -> anyhow::Result<Lexicon> {
    let Some(path) = path else {
        return Ok(Lexicon::builtin()?);
    };
    let lexicon = if path.extension().is_some_and(|ext| ext == "json") {
        Lexicon::from_json(&fs::read_to_string(path)?)?
    } else {
        Lexicon::from_archive(&fs::read(path)?)?
    };
    info!(path = %path.display(), entries = lexicon.len(), version = lexicon.version(), "lexicon loaded");
    Ok(lexicon)
}

fn render(
    lexicon: Option<&Path>,
    config: Option<&Path>,
    json: bool,
    strict: bool,
    input: &Path,
) -> anyhow::Result<()> {
    let lexicon = load_lexicon(lexicon)?;
    let mut config = match config {
        Some(path) => RenderConfig::from_json(&fs::read_to_string(path)?)?,
        None => RenderConfig::default(),
    };
    config.strict |= strict;

    let source = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let sentences = glossa_notation::parse_document(&source)?;
    info!(count = sentences.len(), "rendering");

    let rendered = Realizer::with_config(&lexicon, config).render_all(&sentences);

    if json {
        let derivations: Vec<&Derivation> = rendered.iter().map(|r| &r.derivation).collect();
        let report = Report {
            sentences: rendered.iter().map(|r| r.text.as_str()).collect(),
            log: derivations.iter().flat_map(|d| log::project(d)).collect(),
            derivations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for sentence in &rendered {
            println!("{}", sentence.text);
        }
    }
    Ok(())
}
