use std::io::Write;
use tempfile::NamedTempFile;
use trace_selftime::categorizer::{default_rules, load_rules, Categorizer, Matcher, Rule};

#[test]
fn test_default_rule_priority_order() {
    let rules = default_rules();
    let buckets: Vec<&str> = rules.iter().map(|r| r.bucket.as_str()).collect();
    assert_eq!(
        buckets,
        vec![
            "stylelayout",
            "stylelayout",
            "paint",
            "compositing",
            "v8",
            "v8",
            "parsing",
            "loading",
            "ipc",
            "compositing",
            "gpu",
            "blink",
            "other",
            "unknown task",
        ]
    );
}

#[test]
fn test_name_rules_beat_category_rules() {
    let categorizer = Categorizer::default();

    // Matches both "name contains Layout" and "category contains v8"
    assert_eq!(categorizer.categorize("Layout", "v8"), "stylelayout");
    // Matches both "category contains v8" and "category tag toplevel"
    assert_eq!(categorizer.categorize("RunMicrotasks", "toplevel,v8"), "v8");
    // Matches both "category tag blink" and "category tag toplevel"
    assert_eq!(categorizer.categorize("Task", "toplevel,blink"), "blink");
}

#[test]
fn test_toplevel_without_finer_match() {
    let categorizer = Categorizer::default();
    assert_eq!(
        categorizer.categorize("ThreadControllerImpl::RunTask", "toplevel"),
        "unknown task"
    );
}

#[test]
fn test_unmatched_goes_to_unknown() {
    let categorizer = Categorizer::default();
    assert_eq!(categorizer.categorize("Mystery", "disabled-by-default-foo"), "unknown");
    assert_eq!(categorizer.categorize("", ""), "unknown");
}

#[test]
fn test_custom_rules_first_match_wins() {
    let categorizer = Categorizer::new(vec![
        Rule::new(Matcher::CategoryTag("v8".to_string()), "script"),
        Rule::new(Matcher::NameContains("Compile".to_string()), "compile"),
    ]);
    assert_eq!(categorizer.categorize("V8.Compile", "v8"), "script");

    let reversed = Categorizer::new(vec![
        Rule::new(Matcher::NameContains("Compile".to_string()), "compile"),
        Rule::new(Matcher::CategoryTag("v8".to_string()), "script"),
    ]);
    assert_eq!(reversed.categorize("V8.Compile", "v8"), "compile");
}

#[test]
fn test_load_rules_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"category_tag": "v8", "bucket": "script"}},
            {{"name_contains": "Layout", "bucket": "layout"}}
        ]"#
    )
    .unwrap();

    let rules = load_rules(file.path()).unwrap();
    assert_eq!(rules.len(), 2);

    let categorizer = Categorizer::new(rules);
    assert_eq!(categorizer.categorize("Layout", "v8"), "script");
    assert_eq!(categorizer.categorize("Layout", "blink"), "layout");
}

#[test]
fn test_load_rules_rejects_empty_list() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();
    assert!(load_rules(file.path()).is_err());
}

#[test]
fn test_load_rules_rejects_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"bucket": "no matcher"}}]"#).unwrap();
    assert!(load_rules(file.path()).is_err());
}
