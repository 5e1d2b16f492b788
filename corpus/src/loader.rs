use crate::document::{Corpus, Document};
use crate::normalizer::{StemAlgorithm, TextNormalizer};
use crate::records::{read_records, InputFormat, RawRecord};
use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Replace the built-in English stopwords with the list in this file.
    pub stopwords: Option<PathBuf>,
    /// Input layout; `None` is the same as `InputFormat::Auto`.
    pub format: Option<InputFormat>,
    pub stemmer: StemAlgorithm,
}

/// Load `path` with the English normalizer.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    load_corpus_with(path, &LoadOptions::default())
}

pub fn load_corpus_with<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<Corpus> {
    let path = path.as_ref();
    let normalizer = match &opts.stopwords {
        Some(file) => TextNormalizer::from_stopword_file(file)?,
        None => TextNormalizer::english(),
    }
    .with_algorithm(opts.stemmer);
    let records = read_records(path, opts.format.unwrap_or_default())?;
    let num_records = records.len();
    let corpus = build_corpus(records, &normalizer);
    tracing::info!(path = %path.display(), num_records, num_docs = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Normalize every record and key it by pid. Later records replace earlier ones with the same pid.
pub fn build_corpus<I>(records: I, normalizer: &TextNormalizer) -> Corpus
where
    I: IntoIterator<Item = RawRecord>,
{
    let records = records.into_iter();
    let mut corpus = Corpus::with_capacity(records.size_hint().0);
    for (row, record) in records.enumerate() {
        if record.pid.is_none() {
            tracing::warn!(row, "record has no pid, keyed under empty string");
        }
        let doc = Document::from_record(record, normalizer);
        if let Some(prev) = corpus.insert(doc) {
            tracing::debug!(row, pid = %prev.pid, "duplicate pid, replacing earlier record");
        }
    }
    corpus
}
