use corpus::{load_corpus, load_corpus_with, InputFormat, LoadOptions, StemAlgorithm};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const RECORDS: &str = r#"[
  {
    "_id": "fa8e22d6",
    "pid": "TKPFCZ9EA7H5FYZH",
    "title": "Solid Women Multicolor Track Pants",
    "description": "Yorker trackpants made from 100% rich combed cotton giving it a rich look.",
    "brand": "York",
    "category": "Clothing and Accessories",
    "sub_category": "Bottomwear",
    "product_details": [{"Style Code": "1005COMBO2"}, {"Closure": "Elastic"}],
    "seller": "Shyam Enterprises",
    "out_of_stock": false,
    "selling_price": "921",
    "discount": "69% off",
    "actual_price": "2,999",
    "average_rating": "3.9",
    "url": "https://www.flipkart.com/p/itmd2c76aadce459"
  },
  {"pid": "p1", "title": "The Running Shoes!!", "description": ""}
]"#;

#[test]
fn it_loads_a_record_array() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "data.json", RECORDS);
    let corpus = load_corpus(&path).unwrap();
    assert_eq!(corpus.len(), 2);

    let shoes = corpus.get("p1").unwrap();
    assert_eq!(shoes.title, "run shoe");
    assert_eq!(shoes.description, "");
    assert_eq!(shoes.brand, None);
    assert_eq!(shoes.out_of_stock, None);

    let pants = corpus.get("TKPFCZ9EA7H5FYZH").unwrap();
    assert_eq!(pants.title, "solid women multicolor track pant");
    assert_eq!(pants.brand.as_deref(), Some("York"));
    assert_eq!(pants.out_of_stock, Some(false));
    assert_eq!(pants.average_rating, Some(3.9));
    assert_eq!(pants.actual_price_value(), Some(2999.0));
    assert_eq!(pants.discount_percent(), Some(69.0));
    assert!(pants.product_details.as_ref().unwrap().is_array());
}

#[test]
fn duplicate_pids_keep_the_last_record() {
    let dir = tempdir().unwrap();
    let path = write(
        &dir,
        "dup.json",
        r#"[{"pid": "a", "title": "first"}, {"pid": "b"}, {"pid": "a", "title": "Second Jackets", "brand": "Z"}]"#,
    );
    let corpus = load_corpus(&path).unwrap();
    assert_eq!(corpus.len(), 2);
    let a = corpus.get("a").unwrap();
    assert_eq!(a.title, "second jacket");
    assert_eq!(a.brand.as_deref(), Some("Z"));
}

#[test]
fn column_oriented_and_json_lines_match_records() {
    let dir = tempdir().unwrap();
    let columns = write(
        &dir,
        "columns.json",
        r#"{"pid": {"0": "p1", "1": "p2"}, "title": {"0": "The Running Shoes!!", "1": "Cotton Shirts"}, "brand": {"1": "Nike"}}"#,
    );
    let lines = write(
        &dir,
        "rows.jsonl",
        "{\"pid\": \"p1\", \"title\": \"The Running Shoes!!\"}\n\n{\"pid\": \"p2\", \"title\": \"Cotton Shirts\", \"brand\": \"Nike\"}\n",
    );
    let records = write(
        &dir,
        "rows.json",
        r#"[{"pid": "p1", "title": "The Running Shoes!!"}, {"pid": "p2", "title": "Cotton Shirts", "brand": "Nike"}]"#,
    );

    let expected = load_corpus(&records).unwrap().into_inner();
    assert_eq!(load_corpus(&columns).unwrap().into_inner(), expected);
    assert_eq!(load_corpus(&lines).unwrap().into_inner(), expected);
    assert_eq!(expected["p2"].title, "cotton shirt");
}

#[test]
fn forced_format_overrides_extension() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "rows.txt", "{\"pid\": \"x\"}\n{\"pid\": \"y\"}\n");
    assert!(load_corpus(&path).is_err());
    let opts = LoadOptions { format: Some(InputFormat::JsonLines), ..Default::default() };
    assert_eq!(load_corpus_with(&path, &opts).unwrap().len(), 2);
}

#[test]
fn custom_stopwords_apply_to_titles() {
    let dir = tempdir().unwrap();
    let stop = write(&dir, "stop.txt", "solid\nwomen\n");
    let data = write(&dir, "data.json", r#"[{"pid": "a", "title": "Solid Women The Pants"}]"#);
    let opts = LoadOptions { stopwords: Some(stop), ..Default::default() };
    let corpus = load_corpus_with(&data, &opts).unwrap();
    assert_eq!(corpus.get("a").unwrap().title, "the pant");
}

#[test]
fn malformed_input_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    let broken = write(&dir, "broken.json", r#"[{"pid": "a"}, {"pid": "b""#);
    assert!(load_corpus(&broken).is_err());

    let scalar = write(&dir, "scalar.json", "42");
    assert!(load_corpus(&scalar).is_err());

    let bad_line = write(&dir, "bad.jsonl", "{\"pid\": \"a\"}\nnot json\n");
    let err = load_corpus(&bad_line).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));

    assert!(load_corpus(dir.path().join("missing.json")).is_err());
}

#[test]
fn missing_stopword_file_fails_the_load() {
    let dir = tempdir().unwrap();
    let data = write(&dir, "data.json", RECORDS);
    let opts = LoadOptions { stopwords: Some(dir.path().join("nope.txt")), ..Default::default() };
    assert!(load_corpus_with(&data, &opts).is_err());
}

#[test]
fn stemmer_choice_reaches_the_documents() {
    let dir = tempdir().unwrap();
    let data = write(&dir, "data.json", r#"[{"pid": "a", "title": "Quickly Drying Towels", "selling_price": ""}]"#);

    let porter = load_corpus(&data).unwrap();
    assert_eq!(porter.get("a").unwrap().title, "quickli dri towel");
    assert_eq!(porter.get("a").unwrap().selling_price, None);

    let opts = LoadOptions { stemmer: StemAlgorithm::Snowball, ..Default::default() };
    let snowball = load_corpus_with(&data, &opts).unwrap();
    assert_eq!(snowball.get("a").unwrap().title, "quick dri towel");
}
