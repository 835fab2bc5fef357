//! WordNet provider tests against a dictionary written to a temp directory.

use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;
use wordpos::app::{self, Action, Request};
use wordpos::engine::Command;
use wordpos::input::InputSource;
use wordpos::lexicon::{connect, Category, LexicalProvider, LexiconSource, RandomQuery};
use wordpos::output::OutputMode;

const HEADER: &str = "  1 This software and database is being provided to you, the LICENSEE, by\n";

/// Writes `data.<suffix>` and `index.<suffix>` with real byte offsets.
///
/// Each synset line starts with an 8-character placeholder offset.
fn write_pos(dir: &Path, category: Category, synsets: &[(&str, &str)]) {
    let mut data = String::from(HEADER);
    let mut offsets: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &(lemma, line) in synsets {
        let offset = data.len();
        data.push_str(&format!("{offset:08}{}  \n", &line[8..]));
        offsets.entry(lemma).or_default().push(offset);
    }

    let mut index = String::from(HEADER);
    for (lemma, offs) in &offsets {
        let listed: Vec<String> = offs.iter().map(|o| format!("{o:08}")).collect();
        index.push_str(&format!(
            "{lemma} {} {} 1 @ {} 0 {}  \n",
            category.pos_letter(),
            offs.len(),
            offs.len(),
            listed.join(" ")
        ));
    }

    let suffix = category.file_suffix();
    std::fs::write(dir.join(format!("data.{suffix}")), data).unwrap();
    std::fs::write(dir.join(format!("index.{suffix}")), index).unwrap();
}

fn dictionary() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_pos(
        dir.path(),
        Category::Noun,
        &[
            ("bank", "XXXXXXXX 17 n 01 bank 0 000 | sloping land (especially the slope beside a body of water)"),
            ("bank", "XXXXXXXX 14 n 02 depository_financial_institution 0 bank 0 000 | a financial institution that accepts deposits"),
            ("fox", "XXXXXXXX 05 n 01 fox 0 000 | alert carnivorous mammal with pointed muzzle and ears and a bushy tail"),
            ("ice_cream", "XXXXXXXX 13 n 02 ice_cream 0 icecream 0 000 | frozen dessert; \"she had ice cream for dessert\""),
        ],
    );
    write_pos(
        dir.path(),
        Category::Verb,
        &[("bank", "XXXXXXXX 40 v 01 bank 0 000 | do business with a bank")],
    );
    write_pos(
        dir.path(),
        Category::Adjective,
        &[("quick", "XXXXXXXX 00 a 01 quick(a) 0 000 | accomplished rapidly")],
    );
    write_pos(
        dir.path(),
        Category::Adverb,
        &[("quickly", "XXXXXXXX 02 r 01 quickly 0 000 | with rapid movements")],
    );
    dir
}

#[tokio::test]
async fn test_lookup_reads_synsets_at_offsets() {
    let dir = dictionary();
    let provider = connect(&LexiconSource::WordNet(dir.path().to_path_buf()))
        .await
        .unwrap();

    let senses = provider.lookup(Category::Noun, "Bank").await.unwrap();
    assert_eq!(senses.len(), 2);
    assert_eq!(senses[0].def, "sloping land (especially the slope beside a body of water)");
    assert_eq!(
        senses[1].synonyms,
        vec!["depository_financial_institution", "bank"]
    );

    let senses = provider.lookup(Category::Noun, "ice cream").await.unwrap();
    assert_eq!(senses[0].exp, vec!["she had ice cream for dessert"]);

    let senses = provider.lookup(Category::Adjective, "quick").await.unwrap();
    assert_eq!(senses[0].synonyms, vec!["quick"]);
}

#[tokio::test]
async fn test_missing_file_fails_to_open() {
    let dir = dictionary();
    std::fs::remove_file(dir.path().join("data.adv")).unwrap();
    let err = connect(&LexiconSource::WordNet(dir.path().to_path_buf()))
        .await
        .err()
        .unwrap();
    assert_eq!(err.category(), "Provider Error");
    assert!(err.to_string().contains("data.adv"));
}

#[tokio::test]
async fn test_random_prefix_across_categories() {
    let dir = dictionary();
    let provider = connect(&LexiconSource::WordNet(dir.path().to_path_buf()))
        .await
        .unwrap();

    let mut words = provider
        .lookup_random(None, &RandomQuery::new("qu", 5))
        .await
        .unwrap();
    words.sort();
    assert_eq!(words, vec!["quick", "quickly"]);
}

#[tokio::test]
async fn test_get_and_def_end_to_end() {
    let dir = dictionary();
    let provider = connect(&LexiconSource::WordNet(dir.path().to_path_buf()))
        .await
        .unwrap();

    let mut request = Request::new(
        Action::Lookup(Command::Get),
        InputSource::Args(vec!["the quick fox banked".into()]),
    );
    request.mode = OutputMode::Brief;
    let out = app::execute(&request, provider.as_ref()).await.unwrap();
    assert_eq!(out, "fox \nquick \n");

    let request = Request::new(
        Action::Lookup(Command::Def),
        InputSource::Args(vec!["bank".into()]),
    );
    let out = app::execute(&request, provider.as_ref()).await.unwrap();
    assert_eq!(
        out,
        "bank\n  n: sloping land (especially the slope beside a body of water)\n  n: a financial institution that accepts deposits\n  v: do business with a bank\n\n"
    );
}

#[tokio::test]
async fn test_def_over_thousands_of_words_keeps_every_definition() {
    let dir = tempfile::tempdir().unwrap();
    let synsets: Vec<(String, String)> = (0..3000)
        .map(|i| {
            let lemma = format!("lemma{i:04}");
            let line = format!("XXXXXXXX 05 n 01 {lemma} 0 000 | gloss of {lemma}");
            (lemma, line)
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = synsets
        .iter()
        .map(|(lemma, line)| (lemma.as_str(), line.as_str()))
        .collect();
    write_pos(dir.path(), Category::Noun, &borrowed);
    for category in [Category::Adjective, Category::Verb, Category::Adverb] {
        write_pos(dir.path(), category, &[]);
    }

    let provider = connect(&LexiconSource::WordNet(dir.path().to_path_buf()))
        .await
        .unwrap();
    let words: Vec<String> = synsets.iter().map(|(lemma, _)| lemma.clone()).collect();
    let mut request = Request::new(Action::Lookup(Command::Def), InputSource::Args(words));
    request.mode = OutputMode::Json;

    let out = app::execute(&request, provider.as_ref()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let defined = value
        .as_object()
        .unwrap()
        .values()
        .filter(|senses| !senses.as_array().unwrap().is_empty())
        .count();
    assert_eq!(defined, 3000);
    assert_eq!(value["lemma2999"][0]["def"], "gloss of lemma2999");
}
