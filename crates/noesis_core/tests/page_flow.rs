use noesis_core::{
    ActiveModal, Category, CoreConfig, DeleteOutcome, EntryType, FormError, InMemoryKvStore,
    LandmarkCatalog, MemoryPage, MemoryStore,
};

fn open_page(config: &CoreConfig) -> MemoryPage<InMemoryKvStore> {
    let store = MemoryStore::open(
        InMemoryKvStore::new(),
        LandmarkCatalog::builtin().clone(),
        config,
        Some("page-user"),
    );
    MemoryPage::new(store, config)
}

fn create_tagged_entry(
    page: &mut MemoryPage<InMemoryKvStore>,
    landmark: &str,
    title: &str,
    tags: &str,
) -> String {
    page.begin_create(landmark);
    let form = page.form_mut().unwrap();
    form.title = title.to_string();
    form.text = format!("{title} body");
    form.set_tags_from_input(tags);
    page.save_form().unwrap().id
}

fn create_text_entry(
    page: &mut MemoryPage<InMemoryKvStore>,
    landmark: &str,
    title: &str,
) -> String {
    page.begin_create(landmark);
    let form = page.form_mut().unwrap();
    form.title = title.to_string();
    form.text = format!("{title} body");
    page.save_form().unwrap().id
}

#[test]
fn select_landmark_opens_pavilion() {
    let mut page = open_page(&CoreConfig::default());
    page.select_landmark("career-summit");

    assert_eq!(page.modal(), &ActiveModal::Pavilion("career-summit".to_string()));
    assert_eq!(page.store().selected_landmark(), Some("career-summit"));
}

#[test]
fn create_flow_validates_then_saves_and_returns_to_pavilion() {
    let mut page = open_page(&CoreConfig::default());
    page.select_landmark("health-garden");
    page.begin_create("health-garden");

    let err = page.save_form().unwrap_err();
    assert!(matches!(err, FormError::BlankTitle));
    assert!(matches!(page.modal(), ActiveModal::EntryForm(_)));

    {
        let form = page.form_mut().unwrap();
        form.title = "  Evening walk  ".to_string();
        form.kind = EntryType::Sketch;
    }
    let err = page.save_form().unwrap_err();
    assert!(matches!(err, FormError::MissingContent(EntryType::Sketch)));

    {
        let form = page.form_mut().unwrap();
        form.sketch_note = "loop around the park".to_string();
        form.set_tags_from_input("walk, habits");
    }
    let saved = page.save_form().unwrap();

    assert_eq!(saved.title, "Evening walk");
    assert_eq!(saved.category, Category::Health);
    assert_eq!(saved.tags, vec!["walk", "habits"]);
    assert_eq!(page.modal(), &ActiveModal::Pavilion("health-garden".to_string()));
    assert_eq!(page.selected_entries().len(), 1);
}

#[test]
fn edit_flow_prefills_and_updates_in_place() {
    let mut page = open_page(&CoreConfig::default());
    let older = create_text_entry(&mut page, "finance-vault", "Budget");
    let newer = create_text_entry(&mut page, "finance-vault", "Savings");

    page.begin_edit(&older).unwrap();
    assert_eq!(page.editing_entry(), Some(&older));
    {
        let form = page.form_mut().unwrap();
        assert_eq!(form.title, "Budget");
        form.title = "Budget 2027".to_string();
    }
    let saved = page.save_form().unwrap();

    assert_eq!(saved.id, older);
    let ids: Vec<_> = page.store().entries().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(page.store().entries()[1].title, "Budget 2027");
}

#[test]
fn begin_edit_unknown_entry_fails_and_save_without_form_fails() {
    let mut page = open_page(&CoreConfig::default());
    assert!(matches!(
        page.begin_edit("nope"),
        Err(FormError::EntryNotFound(id)) if id == "nope"
    ));
    assert!(matches!(page.save_form(), Err(FormError::NoActiveForm)));
}

#[test]
fn deleting_edited_entry_closes_its_form() {
    let mut page = open_page(&CoreConfig::default());
    let id = create_text_entry(&mut page, "career-summit", "Portfolio");

    page.begin_edit(&id).unwrap();
    assert_eq!(page.delete_entry(&id).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(page.modal(), &ActiveModal::Pavilion("career-summit".to_string()));
    assert!(page.store().entries().is_empty());
}

#[test]
fn cancel_form_discards_input() {
    let mut page = open_page(&CoreConfig::default());
    page.select_landmark("open-archive");
    page.begin_create("open-archive");
    page.form_mut().unwrap().title = "draft".to_string();

    page.cancel_form();
    assert_eq!(page.modal(), &ActiveModal::Pavilion("open-archive".to_string()));
    assert!(page.store().entries().is_empty());

    page.close_modal();
    assert_eq!(page.modal(), &ActiveModal::Closed);
}

#[test]
fn category_filter_limits_tiles_and_tiles_carry_counts() {
    let mut page = open_page(&CoreConfig::default());
    create_text_entry(&mut page, "finance-vault", "a");
    create_text_entry(&mut page, "finance-vault", "b");

    assert_eq!(page.category_filter(), None);
    assert_eq!(page.visible_landmarks().len(), 8);

    page.set_category_filter(Some(Category::Finance));
    assert_eq!(page.category_filter(), Some(Category::Finance));
    let tiles = page.visible_landmarks();
    assert_eq!(tiles.len(), 1);
    assert_eq!(tiles[0].landmark.id, "finance-vault");
    assert_eq!(tiles[0].entry_count, 2);
}

#[test]
fn search_state_drives_results() {
    let mut page = open_page(&CoreConfig::default());
    create_text_entry(&mut page, "finance-vault", "Budget");
    create_text_entry(&mut page, "health-garden", "Run");

    page.set_search_query("budg");
    let titles: Vec<_> = page.search_results().iter().map(|e| e.title.clone()).collect();
    assert_eq!(titles, vec!["Budget"]);

    page.set_search_query("");
    assert_eq!(page.search_query(), "");
    assert_eq!(page.search_results().len(), 2);
}

#[test]
fn tag_filter_alone_and_with_query_narrows_results() {
    let mut page = open_page(&CoreConfig::default());
    let budget = create_tagged_entry(&mut page, "finance-vault", "Budget", "money, plan");
    let run = create_tagged_entry(&mut page, "health-garden", "Run plan", "health");
    let taxes = create_tagged_entry(&mut page, "finance-vault", "Taxes", "money");

    page.set_tag_filter("Money");
    assert_eq!(page.tag_filter(), "Money");
    assert_eq!(page.search_query(), "");
    let ids: Vec<_> = page.search_results().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![taxes, budget.clone()]);

    page.set_tag_filter("mon");
    assert!(page.search_results().is_empty());

    page.set_tag_filter("money");
    page.set_search_query("budg");
    let ids: Vec<_> = page.search_results().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![budget.clone()]);

    page.set_tag_filter("");
    page.set_search_query("plan");
    let ids: Vec<_> = page.search_results().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![run.clone(), budget]);

    page.set_tag_filter("health");
    let ids: Vec<_> = page.search_results().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec![run]);
}

#[test]
fn saved_entries_persist_after_page_teardown() {
    let config = CoreConfig::default();
    let mut page = open_page(&config);
    let id = create_text_entry(&mut page, "communication-square", "Call mom");

    let backend = page.into_store().into_backend();
    let reopened = MemoryStore::open(
        backend,
        LandmarkCatalog::builtin().clone(),
        &config,
        Some("page-user"),
    );
    assert_eq!(reopened.entries().len(), 1);
    assert_eq!(reopened.entry(&id).unwrap().title, "Call mom");
}

#[test]
fn spotlight_respects_configured_size() {
    let config = CoreConfig {
        spotlight_size: 2,
        ..CoreConfig::default()
    };
    let mut page = open_page(&config);
    for title in ["one", "two", "three"] {
        create_text_entry(&mut page, "business-tower", title);
    }

    let titles: Vec<_> = page.spotlight().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "two"]);
}
