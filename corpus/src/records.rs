use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One row of the input table. Every field is optional and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "text_like")]
    pub pid: Option<String>,
    #[serde(default, deserialize_with = "text_like")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text_like")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text_like")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "text_like")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text_like")]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub product_details: Option<Value>,
    #[serde(default, deserialize_with = "text_like")]
    pub seller: Option<String>,
    #[serde(default, deserialize_with = "bool_like")]
    pub out_of_stock: Option<bool>,
    #[serde(default, deserialize_with = "price_like")]
    pub selling_price: Option<String>,
    #[serde(default, deserialize_with = "price_like")]
    pub discount: Option<String>,
    #[serde(default, deserialize_with = "price_like")]
    pub actual_price: Option<String>,
    #[serde(default, deserialize_with = "number_like")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "text_like")]
    pub url: Option<String>,
}

/// Layout of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Pick from the file extension: `.jsonl`/`.ndjson` are JSON Lines, anything else is JSON.
    #[default]
    Auto,
    /// A JSON array of records, or a column-oriented object `{"field": {"row": value}}`.
    Records,
    /// One JSON record per line.
    JsonLines,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => match path.extension().and_then(|s| s.to_str()) {
                Some("jsonl") | Some("ndjson") => InputFormat::JsonLines,
                _ => InputFormat::Records,
            },
            other => other,
        }
    }
}

/// Read every record of `path`. Any unparsable record fails the whole read.
pub fn read_records(path: &Path, format: InputFormat) -> Result<Vec<RawRecord>> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(f);
    match format.resolve(path) {
        InputFormat::JsonLines => read_json_lines(reader, path),
        _ => {
            let json: Value = serde_json::from_reader(reader)
                .with_context(|| format!("parsing JSON in {}", path.display()))?;
            records_from_value(json).with_context(|| format!("reading records from {}", path.display()))
        }
    }
}

fn read_json_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let record: RawRecord = serde_json::from_str(&line)
            .with_context(|| format!("line {} of {}", i + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

/// Turn a parsed JSON document into records.
pub fn records_from_value(json: Value) -> Result<Vec<RawRecord>> {
    let rows = match json {
        Value::Array(arr) => arr,
        Value::Object(map) if map.values().all(Value::is_object) => columns_to_rows(map),
        Value::Object(_) => bail!("object is not column-oriented: every value must be an object keyed by row"),
        other => bail!("expected an array of records, found {}", kind(&other)),
    };
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| serde_json::from_value::<RawRecord>(row).with_context(|| format!("record {i}")))
        .collect()
}

// {"pid": {"0": "a", "1": "b"}, "title": {"0": ..}} -> [{"pid": "a", ..}, {"pid": "b", ..}]
fn columns_to_rows(columns: Map<String, Value>) -> Vec<Value> {
    let mut rows: HashMap<String, Map<String, Value>> = HashMap::new();
    for (field, cells) in columns {
        if let Value::Object(cells) = cells {
            for (row, value) in cells {
                rows.entry(row).or_default().insert(field.clone(), value);
            }
        }
    }
    let mut rows: Vec<(String, Map<String, Value>)> = rows.into_iter().collect();
    rows.sort_by(|a, b| row_order(&a.0, &b.0));
    rows.into_iter().map(|(_, row)| Value::Object(row)).collect()
}

/// Numeric row labels in numeric order, then the rest lexicographically.
fn row_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// Strings are kept verbatim; numbers and booleans are rendered as text.
fn text_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

// Like `text_like`, but blank text counts as absent.
fn price_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(text_like(d)?.filter(|s| !s.trim().is_empty()))
}

fn bool_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(x) if x == 0.0 => Some(false),
            Some(x) if x == 1.0 => Some(true),
            _ => None,
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn number_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let n = match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|x| x.is_finite()))
}
