use crate::normalizer::TextNormalizer;
use crate::records::RawRecord;
use serde::Serialize;
use std::collections::hash_map;
use std::collections::HashMap;

/// A product ready for indexing. `title` and `description` hold normalized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub pid: String,
    pub title: String,
    pub description: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product_details: Option<serde_json::Value>,
    pub seller: Option<String>,
    pub out_of_stock: Option<bool>,
    pub selling_price: Option<String>,
    pub discount: Option<String>,
    pub actual_price: Option<String>,
    pub average_rating: Option<f64>,
    pub url: Option<String>,
}

impl Document {
    /// Build a document from a raw record, normalizing its title and description.
    /// A missing pid becomes the empty string.
    pub fn from_record(record: RawRecord, normalizer: &TextNormalizer) -> Self {
        Self {
            pid: record.pid.unwrap_or_default(),
            title: normalizer.normalize_opt(record.title.as_deref()),
            description: normalizer.normalize_opt(record.description.as_deref()),
            brand: record.brand,
            category: record.category,
            sub_category: record.sub_category,
            product_details: record.product_details,
            seller: record.seller,
            out_of_stock: record.out_of_stock,
            selling_price: record.selling_price,
            discount: record.discount,
            actual_price: record.actual_price,
            average_rating: record.average_rating,
            url: record.url,
        }
    }

    pub fn selling_price_value(&self) -> Option<f64> {
        self.selling_price.as_deref().and_then(leading_number)
    }

    pub fn actual_price_value(&self) -> Option<f64> {
        self.actual_price.as_deref().and_then(leading_number)
    }

    /// Percentage from text such as "69% off".
    pub fn discount_percent(&self) -> Option<f64> {
        self.discount.as_deref().and_then(leading_number)
    }
}

/// First number in `raw`, ignoring thousands separators: "₹2,999" -> 2999.0
fn leading_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let digits: String = cleaned[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

/// Documents keyed by pid. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: HashMap<String, Document>,
}

impl Corpus {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { docs: HashMap::with_capacity(n) }
    }

    /// Returns the document previously stored under the same pid, if any.
    pub(crate) fn insert(&mut self, doc: Document) -> Option<Document> {
        self.docs.insert(doc.pid.clone(), doc)
    }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn get(&self, pid: &str) -> Option<&Document> { self.docs.get(pid) }

    pub fn contains(&self, pid: &str) -> bool { self.docs.contains_key(pid) }

    pub fn pids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Document> { self.docs.iter() }

    pub fn into_inner(self) -> HashMap<String, Document> { self.docs }
}

impl IntoIterator for Corpus {
    type Item = (String, Document);
    type IntoIter = hash_map::IntoIter<String, Document>;

    fn into_iter(self) -> Self::IntoIter { self.docs.into_iter() }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = (&'a String, &'a Document);
    type IntoIter = hash_map::Iter<'a, String, Document>;

    fn into_iter(self) -> Self::IntoIter { self.docs.iter() }
}
