//! Fan-out and aggregation tests through the public library API.

use pretty_assertions::assert_eq;
use std::time::Duration;
use wordpos::app::{self, Action, Request};
use wordpos::engine::{compute_plan, run, Command, PlanOptions, ResultMap, RunOptions};
use wordpos::input::InputSource;
use wordpos::lexicon::{Category, FailingProvider, MemoryProvider};
use wordpos::output::OutputMode;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn key_names(results: &ResultMap) -> Vec<&str> {
    results.keys().map(|k| k.as_str()).collect()
}

#[tokio::test]
async fn test_get_groups_words_by_category() {
    let provider = MemoryProvider::sample();
    let plan = compute_plan(
        Command::Get,
        &[Category::Noun, Category::Verb],
        &words(&["dog", "run", "happy"]),
        &PlanOptions::default(),
    );
    assert_eq!(plan.expected_count, 2);

    let results = run(&plan, &provider, &RunOptions::default()).await.unwrap();
    assert_eq!(key_names(&results), vec!["Noun", "Verb"]);
    assert_eq!(results.count("Noun"), 2);
    assert_eq!(results.count("Verb"), 2);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_slow_first_call_keeps_plan_order() {
    let provider = MemoryProvider::sample().with_latency("Noun", Duration::from_millis(40));
    let plan = compute_plan(
        Command::Get,
        &[],
        &words(&["dog", "quick", "happy", "quickly"]),
        &PlanOptions::default(),
    );

    let results = run(&plan, &provider, &RunOptions::default()).await.unwrap();
    assert_eq!(key_names(&results), vec!["Noun", "Adjective", "Verb", "Adverb"]);
    assert_eq!(results.count("Noun"), 1);
    assert_eq!(results.count("Adjective"), 2);
    assert_eq!(results.count("Verb"), 1);
    assert_eq!(results.count("Adverb"), 2);
}

#[tokio::test]
async fn test_provider_failures_still_complete() {
    let plan = compute_plan(
        Command::Def,
        &[],
        &words(&["bank", "dog"]),
        &PlanOptions::default(),
    );
    let results = run(&plan, &FailingProvider, &RunOptions::default())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_timeout_drops_slow_word_only() {
    let provider = MemoryProvider::sample().with_latency("bank", Duration::from_secs(30));
    let plan = compute_plan(
        Command::Def,
        &[],
        &words(&["bank", "fox"]),
        &PlanOptions::default(),
    );
    let options = RunOptions {
        call_timeout: Some(Duration::from_millis(20)),
    };

    let results = run(&plan, &provider, &options).await.unwrap();
    assert!(!results.contains_key("bank"));
    assert_eq!(results.count("fox"), 1);
}

#[tokio::test]
async fn test_def_with_category_flags_json() {
    let mut request = Request::new(Action::Lookup(Command::Def), InputSource::Args(words(&["dog"])));
    request.categories = vec![Category::Verb];
    request.mode = OutputMode::Json;

    let out = app::execute(&request, &MemoryProvider::sample()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let senses = value["dog"].as_array().unwrap();
    assert_eq!(senses.len(), 1);
    assert_eq!(senses[0]["pos"], "v");
    assert_eq!(senses[0]["lemma"], "dog");
}

#[tokio::test]
async fn test_rand_per_category_samples() {
    let provider = MemoryProvider::sample();
    let mut request = Request::new(Action::Lookup(Command::Rand), InputSource::Empty);
    request.categories = vec![Category::Adjective, Category::Adverb];
    request.plan_options = PlanOptions { random_count: 2 };
    request.mode = OutputMode::Json;

    let out = app::execute(&request, &provider).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["Adjective"].as_array().unwrap().len(), 2);
    assert_eq!(value["Adverb"].as_array().unwrap().len(), 2);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_rand_count_reports_parsed_words_only() {
    let mut request = Request::new(Action::Lookup(Command::Rand), InputSource::Args(words(&["qu"])));
    request.mode = OutputMode::Count;

    let out = app::execute(&request, &MemoryProvider::sample()).await.unwrap();
    assert_eq!(out, "1");
}
