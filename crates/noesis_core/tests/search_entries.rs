use noesis_core::{
    search_entries, CoreConfig, EntryDraft, InMemoryKvStore, LandmarkCatalog, MemoryStore,
};

fn seeded_store() -> MemoryStore<InMemoryKvStore> {
    let mut store = MemoryStore::open(
        InMemoryKvStore::new(),
        LandmarkCatalog::builtin().clone(),
        &CoreConfig::default(),
        Some("searcher"),
    );
    store
        .add_entry(
            "finance-vault",
            EntryDraft::titled("Quarterly budget")
                .with_text("no project here")
                .with_tags(["Finance"]),
        )
        .unwrap();
    store
        .add_entry(
            "business-tower",
            EntryDraft::titled("Other")
                .with_link("https://example.com/Roadmap")
                .with_tags(["planning"]),
        )
        .unwrap();
    store
        .add_entry("business-tower", EntryDraft::titled("My PROJECT"))
        .unwrap();
    store
}

fn titles<'a>(entries: &[&'a noesis_core::Entry]) -> Vec<&'a str> {
    entries.iter().map(|entry| entry.title.as_str()).collect()
}

#[test]
fn blank_query_and_tag_return_whole_collection_in_order() {
    let store = seeded_store();
    let results = store.search_entries("", "");
    assert_eq!(
        titles(&results),
        vec!["My PROJECT", "Other", "Quarterly budget"]
    );
}

#[test]
fn query_matches_title_and_text_case_insensitively() {
    let store = seeded_store();
    let results = store.search_entries("proj", "");
    assert_eq!(titles(&results), vec!["My PROJECT", "Quarterly budget"]);
}

#[test]
fn query_matches_link_and_tag_substrings() {
    let store = seeded_store();
    assert_eq!(titles(&store.search_entries("roadmap", "")), vec!["Other"]);
    assert_eq!(titles(&store.search_entries("plan", "")), vec!["Other"]);
}

#[test]
fn tag_filter_alone_requires_exact_tag() {
    let store = seeded_store();
    assert_eq!(
        titles(&store.search_entries("", "finance")),
        vec!["Quarterly budget"]
    );
    assert!(store.search_entries("", "fin").is_empty());
}

#[test]
fn query_and_tag_must_both_match() {
    let store = seeded_store();
    assert_eq!(
        titles(&store.search_entries("project", "FINANCE")),
        vec!["Quarterly budget"]
    );
    assert!(store.search_entries("roadmap", "finance").is_empty());
}

#[test]
fn free_function_matches_store_method() {
    let store = seeded_store();
    let direct = search_entries(store.entries(), "proj", "");
    assert_eq!(direct, store.search_entries("proj", ""));
}

#[test]
fn project_query_skips_entries_without_the_substring() {
    let mut store = MemoryStore::open(
        InMemoryKvStore::new(),
        LandmarkCatalog::builtin().clone(),
        &CoreConfig::default(),
        None,
    );
    store
        .add_entry("business-tower", EntryDraft::titled("Other").with_text("no match"))
        .unwrap();
    store
        .add_entry("business-tower", EntryDraft::titled("My project").with_text(""))
        .unwrap();

    assert_eq!(titles(&store.search_entries("proj", "")), vec!["My project"]);
}
