use crate::porter;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// English stopword list (NLTK `stopwords.words("english")`).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves",
    "you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
    "he","him","his","himself","she","she's","her","hers","herself",
    "it","it's","its","itself","they","them","their","theirs","themselves",
    "what","which","who","whom","this","that","that'll","these","those",
    "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
    "a","an","the","and","but","if","or","because","as","until","while","of","at","by","for","with",
    "about","against","between","into","through","during","before","after","above","below",
    "to","from","up","down","in","out","on","off","over","under","again","further","then","once",
    "here","there","when","where","why","how","all","any","both","each","few","more","most","other",
    "some","such","no","nor","not","only","own","same","so","than","too","very",
    "s","t","can","will","just","don","don't","should","should've","now",
    "d","ll","m","o","re","ve","y","ain","aren","aren't","couldn","couldn't","didn","didn't",
    "doesn","doesn't","hadn","hadn't","hasn","hasn't","haven","haven't","isn","isn't","ma",
    "mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't","shouldn","shouldn't",
    "wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
];

lazy_static! {
    // ASCII punctuation: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
    static ref PUNCT: Regex = Regex::new(r"[[:punct:]]").expect("valid regex");
    static ref DEFAULT: TextNormalizer = TextNormalizer::english();
}

/// Suffix-stripping algorithm applied to each surviving token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StemAlgorithm {
    /// Porter (1980) with NLTK's extensions: "quickly" -> "quickli".
    #[default]
    Porter,
    /// Snowball English (Porter2): "quickly" -> "quick".
    Snowball,
}

enum WordStemmer {
    Porter,
    Snowball(Stemmer),
}

impl WordStemmer {
    fn new(algorithm: StemAlgorithm) -> Self {
        match algorithm {
            StemAlgorithm::Porter => WordStemmer::Porter,
            StemAlgorithm::Snowball => WordStemmer::Snowball(Stemmer::create(Algorithm::English)),
        }
    }

    fn algorithm(&self) -> StemAlgorithm {
        match self {
            WordStemmer::Porter => StemAlgorithm::Porter,
            WordStemmer::Snowball(_) => StemAlgorithm::Snowball,
        }
    }

    fn stem(&self, token: &str) -> String {
        match self {
            WordStemmer::Porter => porter::stem(token),
            WordStemmer::Snowball(stemmer) => stemmer.stem(token).into_owned(),
        }
    }
}

/// Lowercases, strips punctuation, drops stopwords and stems what is left.
///
/// Holds the stopword set and stemmer so they are built once and shared by
/// every call. Immutable after construction.
pub struct TextNormalizer {
    stopwords: HashSet<String>,
    stemmer: WordStemmer,
}

impl TextNormalizer {
    /// Normalizer with the built-in English stopword list and the Porter stemmer.
    pub fn english() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().copied())
    }

    pub fn with_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stopwords, stemmer: WordStemmer::new(StemAlgorithm::default()) }
    }

    pub fn with_algorithm(mut self, algorithm: StemAlgorithm) -> Self {
        self.stemmer = WordStemmer::new(algorithm);
        self
    }

    pub fn algorithm(&self) -> StemAlgorithm { self.stemmer.algorithm() }

    /// Load stopwords from a file with one word per line. Lines starting with `#` are skipped.
    pub fn from_stopword_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading stopword list {}", path.display()))?;
        let words = content.lines().filter(|l| !l.trim_start().starts_with('#'));
        let normalizer = Self::with_stopwords(words);
        tracing::debug!(path = %path.display(), stopwords = normalizer.stopword_count(), "loaded stopword list");
        Ok(normalizer)
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    pub fn stopword_count(&self) -> usize { self.stopwords.len() }

    /// Stemmed, stopword-free tokens of `text` in their original order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = PUNCT.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .map(|token| self.stemmer.stem(token))
            .collect()
    }

    /// Normalize `text` into a single space separated string of stems.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }

    /// Absent text normalizes to the empty string.
    pub fn normalize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self { Self::english() }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stopwords", &self.stopwords.len())
            .field("algorithm", &self.algorithm())
            .finish_non_exhaustive()
    }
}

/// Normalize with the shared English normalizer.
pub fn normalize_text(text: &str) -> String {
    DEFAULT.normalize(text)
}
