use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use corpus::{load_corpus_with, Corpus, Document, InputFormat, LoadOptions, StemAlgorithm, TextNormalizer};
use tracing_subscriber::{EnvFilter, fmt};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corpus-loader")]
#[command(about = "Load a product corpus and normalize it for search indexing", long_about = None)]
struct Cli {
    /// Stopword list (one word per line) replacing the built-in English list.
    /// Falls back to CORPUS_STOPWORDS.
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,
    /// Stemming algorithm
    #[arg(long, global = true, value_enum, default_value_t = Stemmer::Porter)]
    stemmer: Stemmer,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON/JSONL file into a corpus
    Load {
        /// Input file
        #[arg(long)]
        input: PathBuf,
        /// Write the normalized corpus as JSON ("-" for stdout)
        #[arg(long)]
        output: Option<String>,
        /// Only write the first N documents (by pid)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Auto)]
        format: Format,
    },
    /// Print the normalized form of each argument
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Records,
    Jsonl,
}

#[derive(Clone, Copy, ValueEnum)]
enum Stemmer {
    Porter,
    Snowball,
}

impl From<Stemmer> for StemAlgorithm {
    fn from(s: Stemmer) -> Self {
        match s {
            Stemmer::Porter => StemAlgorithm::Porter,
            Stemmer::Snowball => StemAlgorithm::Snowball,
        }
    }
}

impl From<Format> for InputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => InputFormat::Auto,
            Format::Records => InputFormat::Records,
            Format::Jsonl => InputFormat::JsonLines,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let stopwords = cli
        .stopwords
        .or_else(|| std::env::var("CORPUS_STOPWORDS").ok().map(PathBuf::from));

    match cli.command {
        Commands::Load { input, output, limit, format } => {
            let opts = LoadOptions { stopwords, format: Some(format.into()), stemmer: cli.stemmer.into() };
            let corpus = load_corpus_with(&input, &opts)?;
            println!("{} documents loaded from {}", corpus.len(), input.display());
            if let Some(output) = output {
                write_corpus(&corpus, &output, limit)?;
            }
            Ok(())
        }
        Commands::Normalize { text } => {
            let normalizer = match stopwords {
                Some(path) => TextNormalizer::from_stopword_file(path)?,
                None => TextNormalizer::english(),
            }
            .with_algorithm(cli.stemmer.into());
            for t in text {
                println!("{}", normalizer.normalize(&t));
            }
            Ok(())
        }
    }
}

fn write_corpus(corpus: &Corpus, output: &str, limit: Option<usize>) -> Result<()> {
    // sorted so dumps of the same input diff cleanly
    let docs: BTreeMap<&str, &Document> = corpus
        .iter()
        .map(|(pid, doc)| (pid.as_str(), doc))
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    let mut out: Box<dyn Write> = if output == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        let f = File::create(output).with_context(|| format!("creating {output}"))?;
        Box::new(BufWriter::new(f))
    };
    serde_json::to_writer_pretty(&mut out, &docs)?;
    writeln!(out)?;
    out.flush()?;
    tracing::info!(output, written = docs.len(), "wrote corpus");
    Ok(())
}
