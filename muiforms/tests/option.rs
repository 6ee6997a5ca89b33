use muiforms::{resolve_selection, selected_index, SelectOption};

fn options(specs: &[(&str, bool)]) -> Vec<SelectOption> {
    specs
        .iter()
        .map(|(value, selected)| {
            let option = SelectOption::new(*value, value.to_uppercase());
            if *selected { option.selected() } else { option }
        })
        .collect()
}

// ============================================================================
// Selected index
// ============================================================================

#[test]
fn test_value_match() {
    let opts = options(&[("a", false), ("b", false), ("c", false)]);
    assert_eq!(selected_index(&opts, Some("c")), 2);
}

#[test]
fn test_no_match_falls_back_to_first() {
    let opts = options(&[("a", false), ("b", false)]);
    assert_eq!(selected_index(&opts, Some("zzz")), 0);
    assert_eq!(selected_index(&opts, None), 0);
    assert_eq!(selected_index(&[], Some("a")), 0);
}

#[test]
fn test_selected_flag_used_without_value() {
    let opts = options(&[("a", false), ("b", true), ("c", false)]);
    assert_eq!(selected_index(&opts, None), 1);
    // A value overrides the flags
    assert_eq!(selected_index(&opts, Some("c")), 2);
}

#[test]
fn test_duplicates_resolve_to_earliest() {
    let opts = options(&[("a", false), ("b", true), ("b", true), ("c", true)]);
    assert_eq!(selected_index(&opts, Some("b")), 1);
    assert_eq!(selected_index(&opts, None), 1);
}

#[test]
fn test_resolve_selection_rewrites_flags() {
    let opts = options(&[("a", true), ("b", false)]);

    let resolved = resolve_selection(&opts, Some("b"));
    assert!(!resolved[0].selected);
    assert!(resolved[1].selected);
    assert_eq!(resolved[1].label, "B");

    let untouched = resolve_selection(&opts, None);
    assert_eq!(untouched, opts);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_tuple() {
    let option: SelectOption = ("us", "United States").into();
    assert_eq!(option, SelectOption::new("us", "United States"));
    assert!(!option.selected);
}

#[test]
fn test_options_from_json() {
    let opts: Vec<SelectOption> = serde_json::from_str(
        r#"[
            {"value": "a", "label": "Apple"},
            {"value": "b", "label": "Banana", "selected": true}
        ]"#,
    )
    .unwrap();

    assert_eq!(opts.len(), 2);
    assert!(!opts[0].selected);
    assert_eq!(selected_index(&opts, None), 1);
}
