//! Integration tests for the load → filter → clean → project → render pipeline.

use unelements::model::{Category, CategorySelection, Element, ElementCollection, MetadataSelection};
use unelements::render::{render, RenderConfig, NO_METADATA_LINE};
use unelements::select::{filter, project};
use unelements::{clean, load_bytes, render_elements};

const SAMPLE: &str = r#"[
    {
        "type": "Title",
        "element_id": "a1",
        "text": "Quarterly “Results”",
        "metadata": {"filename": "q3.pdf", "page_number": 1, "languages": ["eng"]}
    },
    {
        "type": "NarrativeText",
        "element_id": "a2",
        "text": "Revenue grew   12%\nyear over year — a record.",
        "metadata": {"filename": "q3.pdf", "page_number": 1, "parent_id": "a1"}
    },
    {
        "type": "Table",
        "element_id": "a3",
        "text": "Q1 | Q2 | Q3",
        "metadata": {"filename": "q3.pdf", "page_number": 2}
    },
    {
        "type": "Image",
        "element_id": "a4",
        "metadata": {"filename": "q3.pdf", "page_number": 2}
    },
    {
        "type": "CompositeElement",
        "element_id": "a5",
        "text": "Unknown kind"
    },
    {
        "type": "NarrativeText",
        "element_id": "a6",
        "text": "Café expenses fell.",
        "metadata": {"filename": "q3.pdf", "page_number": 3}
    }
]"#;

fn sample() -> ElementCollection {
    load_bytes(SAMPLE.as_bytes()).unwrap()
}

fn selections() -> Vec<CategorySelection> {
    vec![
        CategorySelection::all(),
        CategorySelection::none(),
        CategorySelection::new([Category::NarrativeText]),
        CategorySelection::new([Category::Image, Category::Title]),
        CategorySelection::new([Category::Footer]),
    ]
}

#[test]
fn test_filter_members_and_order() {
    let elements = sample();
    for allowed in selections() {
        let kept = filter(elements.clone(), &allowed);
        assert!(kept.iter().all(|e| allowed.matches(e.category)));

        // Kept elements appear in the same relative order as the input
        let mut positions = kept
            .iter()
            .map(|k| elements.iter().position(|e| e == k).unwrap());
        let mut last = None;
        for pos in positions.by_ref() {
            assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
        }
    }
}

#[test]
fn test_filter_empty_selection_is_empty() {
    assert!(filter(sample(), &CategorySelection::none()).is_empty());
}

#[test]
fn test_unknown_category_never_kept() {
    let kept = filter(sample(), &CategorySelection::all());
    assert_eq!(kept.len(), 5);
    assert!(kept.iter().all(|e| e.text.as_deref() != Some("Unknown kind")));
}

#[test]
fn test_clean_idempotent_on_collection() {
    let mut once = sample();
    clean(&mut once);
    let mut twice = once.clone();
    clean(&mut twice);
    assert_eq!(once, twice);

    let texts: Vec<_> = once.iter().filter_map(|e| e.text.as_deref()).collect();
    assert_eq!(texts[0], "Quarterly \"Results\"");
    assert_eq!(texts[1], "Revenue grew 12% year over year - a record.");
    assert_eq!(texts[4], "Cafe expenses fell.");
}

#[test]
fn test_project_subset_and_passthrough() {
    let elements = sample();
    let fields = MetadataSelection::new(["page_number", "parent_id"]);
    for (element, projected) in elements.iter().zip(project(elements.as_slice(), &fields)) {
        assert!(projected.keys().all(|k| fields.contains(k)));
        for (key, value) in &projected {
            assert_eq!(element.metadata.get(key), Some(value));
        }
    }

    let all = project(elements.as_slice(), &MetadataSelection::default());
    for (element, projected) in elements.iter().zip(&all) {
        assert_eq!(&element.metadata, projected);
    }
}

#[test]
fn test_text_only_render_has_no_metadata() {
    let config = RenderConfig::new()
        .with_text_only(true)
        .with_metadata(MetadataSelection::new(["filename", "page_number"]));
    let output = render_elements(sample(), &config);

    assert!(!output.contains("q3.pdf"));
    assert!(!output.contains("filename"));
    assert!(!output.contains("#####"));
    assert!(output.contains("\n\nNo text available\n\n"));
}

#[test]
fn test_annotated_empty_selection_shows_none() {
    let output = render_elements(sample(), &RenderConfig::default());

    assert_eq!(output.matches(NO_METADATA_LINE).count(), 5);
    assert!(!output.contains("Metadata (Selected):"));
    assert!(!output.contains("page_number:"));
    assert!(!output.contains("filename:"));
}

#[test]
fn test_annotated_selected_fields_with_placeholder() {
    let config = RenderConfig::new()
        .with_categories(CategorySelection::new([Category::Title, Category::NarrativeText]))
        .with_metadata(MetadataSelection::new(["parent_id", "languages"]));
    let output = render_elements(sample(), &config);

    let expected_title = format!(
        "##### Title #####\n\nMetadata (Selected):\nparent_id: N/A\nlanguages: [\"eng\"]\n\nQuarterly \"Results\"\n{}",
        "-".repeat(80)
    );
    assert!(output.starts_with(&expected_title));
    assert!(output.contains("parent_id: a1\nlanguages: N/A\n"));
}

#[test]
fn test_title_scenario() {
    let data = br#"[
        {"type": "Title", "text": "Hello   World", "metadata": {}},
        {"type": "Table", "text": "x", "metadata": {}}
    ]"#;
    let elements = load_bytes(data).unwrap();
    let config = RenderConfig::new().with_categories(vec![Category::Title]);

    let kept = filter(elements.clone(), &config.categories);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept.get(0).unwrap().category, Some(Category::Title));

    let output = render_elements(elements, &config);
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "##### Title #####",
            "",
            "Selected Metadata: None",
            "",
            "Hello World",
            &"-".repeat(80),
        ]
    );
}

#[test]
fn test_text_only_scenario() {
    let data = br#"[
        {"type": "Title", "text": "Hello   World"},
        {"type": "Table", "text": "A  B"}
    ]"#;
    let config = RenderConfig::new()
        .with_categories(vec![Category::Title, Category::Table])
        .with_text_only(true);
    let output = render_elements(load_bytes(data).unwrap(), &config);
    assert_eq!(output, "Hello World\n\nA B");
}

#[test]
fn test_curly_quote_scenario() {
    let mut elements: ElementCollection =
        vec![Element::with_text(Category::NarrativeText, "  \u{201c}Hello\u{201d}  \n")].into();
    clean(&mut elements);
    assert_eq!(elements.get(0).unwrap().text.as_deref(), Some("\"Hello\""));
}

#[test]
fn test_cleaning_disabled_keeps_raw_text() {
    let config = RenderConfig::new()
        .with_categories(vec![Category::NarrativeText])
        .with_cleaning(false)
        .with_text_only(true);
    let output = render_elements(sample(), &config);
    assert!(output.starts_with("Revenue grew   12%\nyear over year \u{2014} a record."));
}

#[test]
fn test_render_with_explicit_stages() {
    let mut kept = filter(sample(), &CategorySelection::new([Category::Image]));
    clean(&mut kept);
    let fields = MetadataSelection::new(["page_number"]);
    let projected = project(kept.as_slice(), &fields);
    let config = RenderConfig::new().with_metadata(fields);

    let output = render(kept.as_slice(), &projected, &config);
    assert!(output.starts_with("##### Image #####\n\nMetadata (Selected):\npage_number: 2\n\nNo text available\n"));
}

#[test]
fn test_inspector_on_loaded_collection() {
    let elements = sample();
    let counts = elements.category_counts();
    assert_eq!(counts[0], (Some(Category::Title), 1));
    assert_eq!(counts[1], (Some(Category::NarrativeText), 2));
    assert!(counts.contains(&(None, 1)));
    assert_eq!(
        elements.metadata_keys(),
        vec!["filename", "languages", "page_number", "parent_id"]
    );
}
