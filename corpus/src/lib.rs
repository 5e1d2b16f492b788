//! Load a product collection from JSON and normalize its text fields for search indexing.

pub mod document;
pub mod loader;
pub mod normalizer;
pub mod porter;
pub mod records;

pub use document::{Corpus, Document};
pub use loader::{build_corpus, load_corpus, load_corpus_with, LoadOptions};
pub use normalizer::{normalize_text, StemAlgorithm, TextNormalizer};
pub use records::{read_records, records_from_value, InputFormat, RawRecord};
