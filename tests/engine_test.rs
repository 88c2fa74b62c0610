//! End-to-end rule behavior through the public library API

use a11ylint::config::{LintConfig, RuleSet};
use a11ylint::models::{FileReport, Severity};
use a11ylint::rules::descriptiveness::is_self_describing;
use a11ylint::rules::{
    checkbox_label, clickable_content, clickable_label, icon_only_button, image_description,
    text_field_label, RuleContext, RuleEngine,
};
use a11ylint::syntax::{SourceFile, SourceNode, Span, SyntaxTree};
use std::path::PathBuf;

const IMAGE_FQN: &str = "androidx.compose.foundation.Image";

fn check(root: SourceNode, type_resolution: bool) -> FileReport {
    let source = SourceFile {
        path: PathBuf::from("ui/Screen.kt"),
        type_resolution,
        root,
    };
    RuleEngine::new(RuleSet::default())
        .with_workers(1)
        .check_file(&source.lower())
}

fn findings_of<'a>(report: &'a FileReport, rule_id: &str) -> Vec<&'a str> {
    report
        .findings
        .iter()
        .filter(|f| f.rule_id == rule_id)
        .map(|f| f.message.as_str())
        .collect()
}

fn clickable() -> SourceNode {
    SourceNode::modifier([SourceNode::call("clickable").content(vec![])])
}

fn clickable_box(content: Vec<SourceNode>) -> SourceNode {
    SourceNode::call("Box")
        .arg("modifier", clickable())
        .content(content)
}

fn text(value: &str) -> SourceNode {
    SourceNode::call("Text").positional(SourceNode::string(value))
}

fn semantics_modifier(description: SourceNode) -> SourceNode {
    SourceNode::modifier([SourceNode::call("semantics").content(vec![SourceNode::assign(
        SourceNode::opaque("contentDescription"),
        description,
    )])])
}

#[test]
fn clickable_with_label_passes_both_clickable_rules() {
    let root = SourceNode::call("Box")
        .arg(
            "modifier",
            SourceNode::modifier([SourceNode::call("clickable")
                .arg("onClickLabel", SourceNode::string("Open settings"))
                .content(vec![])]),
        )
        .content(vec![SourceNode::call("Spacer")]);
    let report = check(root, false);
    assert!(findings_of(&report, clickable_label::ID).is_empty());
    assert!(findings_of(&report, clickable_content::ID).is_empty());
}

#[test]
fn clickable_over_text_passes_until_text_is_removed() {
    let report = check(clickable_box(vec![text("search")]), false);
    assert!(findings_of(&report, clickable_content::ID).is_empty());
    // The plain onClickLabel rule still asks for a label
    assert_eq!(findings_of(&report, clickable_label::ID).len(), 1);

    let report = check(clickable_box(vec![SourceNode::call("Spacer")]), false);
    let messages = findings_of(&report, clickable_content::ID);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("This clickable Box is missing an accessible label"));
}

#[test]
fn extra_layout_wrapper_keeps_verdict() {
    for content in [text("search"), SourceNode::call("Spacer")] {
        let plain = SourceNode::block(vec![content.clone()]);
        let wrapped = SourceNode::block(vec![SourceNode::call("Column").content(vec![content])]);

        let verdict = |root: &SourceNode| {
            let tree = SyntaxTree::from_source(root);
            let ctx = RuleContext::new(&tree, None);
            is_self_describing(&ctx, tree.root())
        };
        assert_eq!(verdict(&plain), verdict(&wrapped));
    }
}

#[test]
fn unknown_component_counts_as_descriptive() {
    let report = check(clickable_box(vec![SourceNode::call("ProfileCard")]), false);
    assert!(findings_of(&report, clickable_content::ID).is_empty());
}

#[test]
fn text_field_label_wins_over_modifier() {
    let labeled = SourceNode::call("TextField")
        .arg("label", SourceNode::opaque("{ Text(\"Email\") }"))
        .arg("modifier", semantics_modifier(SourceNode::string("")));
    assert!(findings_of(&check(labeled, false), text_field_label::ID).is_empty());

    let bare = SourceNode::call("OutlinedTextField").arg(
        "modifier",
        semantics_modifier(SourceNode::null()),
    );
    assert_eq!(findings_of(&check(bare, false), text_field_label::ID).len(), 1);

    let described = SourceNode::call("TextField")
        .arg("modifier", semantics_modifier(SourceNode::string("Email")));
    assert!(findings_of(&check(described, false), text_field_label::ID).is_empty());
}

#[test]
fn icon_only_button_needs_a_description() {
    let button = |description: SourceNode| {
        SourceNode::call("IconButton").content(vec![SourceNode::call("Image")
            .arg("contentDescription", description)])
    };

    for empty in [SourceNode::null(), SourceNode::string("")] {
        let report = check(button(empty), false);
        assert_eq!(findings_of(&report, icon_only_button::ID).len(), 1);
    }
    let report = check(button(SourceNode::string("settings")), false);
    assert!(findings_of(&report, icon_only_button::ID).is_empty());

    // A described button covers its icon
    let root = SourceNode::call("Button")
        .arg("modifier", semantics_modifier(SourceNode::string("Settings")))
        .content(vec![SourceNode::call("Icon").arg("contentDescription", SourceNode::null())]);
    assert!(findings_of(&check(root, false), icon_only_button::ID).is_empty());
}

#[test]
fn malformed_modifiers_silence_only_their_element() {
    let root = SourceNode::call("Column").content(vec![
        SourceNode::call("Checkbox")
            .arg_missing("modifier")
            .at(Span::new(10, 30, 2, 5)),
        SourceNode::call("TextField")
            .arg(
                "modifier",
                SourceNode::modifier([SourceNode::call("semantics").content(vec![
                    SourceNode::assign_missing(SourceNode::opaque("contentDescription")),
                ])]),
            )
            .at(Span::new(40, 90, 3, 5)),
        SourceNode::call("Checkbox").at(Span::new(100, 120, 4, 5)),
        clickable_box(vec![SourceNode::call("Spacer")]),
    ]);
    let report = check(root, false);

    assert!(findings_of(&report, text_field_label::ID).is_empty());
    let checkbox_lines: Vec<u32> = report
        .findings
        .iter()
        .filter(|f| f.rule_id == checkbox_label::ID)
        .map(|f| f.span.line)
        .collect();
    assert_eq!(checkbox_lines, vec![4]);
    assert_eq!(findings_of(&report, clickable_label::ID).len(), 1);
    assert_eq!(findings_of(&report, clickable_content::ID).len(), 1);
}

#[test]
fn image_rule_is_skipped_without_resolution() {
    let root = SourceNode::call("Image").resolved_as(IMAGE_FQN);
    let report = check(root, false);
    assert!(findings_of(&report, image_description::ID).is_empty());
    assert!(report.was_skipped(image_description::ID));
}

#[test]
fn image_description_variants() {
    let image = || {
        SourceNode::call("Image")
            .resolved_as(IMAGE_FQN)
            .at(Span::new(10, 40, 3, 9))
    };

    let absent = check(image(), true);
    let empty = check(image().arg("contentDescription", SourceNode::string("")), true);
    let null = check(image().arg("contentDescription", SourceNode::null()), true);
    let present = check(image().arg("contentDescription", SourceNode::string("Logo")), true);

    let absent_msg = findings_of(&absent, image_description::ID);
    let empty_msg = findings_of(&empty, image_description::ID);
    assert_eq!(absent_msg.len(), 1);
    assert_eq!(empty_msg.len(), 1);
    assert_ne!(absent_msg[0], empty_msg[0]);
    assert!(empty_msg[0].contains("empty string"));
    assert!(absent_msg[0].contains("missing the contentDescription"));

    assert_eq!(null.findings.len(), 1);
    assert_eq!(null.findings[0].severity, Severity::Info);
    assert_eq!(absent.findings[0].span.line, 3);
    assert!(present.findings.is_empty());
    assert!(!present.was_skipped(image_description::ID));
}

#[test]
fn image_rule_ignores_lookalikes() {
    let root = SourceNode::call("Image").resolved_as("com.example.ui.Image");
    let report = check(root, true);
    assert!(findings_of(&report, image_description::ID).is_empty());
}

#[test]
fn configured_rule_set_applies_overrides() {
    let config = LintConfig::from_toml_str(
        "[rules.clickable-modifier-missing-on-click-label]\nenabled = false\n\
         [rules.clickable-element-missing-accessibility-label]\nseverity = \"info\"\n",
    )
    .expect("parse");
    let engine = RuleEngine::new(RuleSet::from_config(&config).expect("valid"));
    let source = SourceFile {
        path: PathBuf::from("ui/Screen.kt"),
        type_resolution: false,
        root: clickable_box(vec![SourceNode::call("Spacer")]),
    };
    let report = engine.check_file(&source.lower());

    assert!(findings_of(&report, clickable_label::ID).is_empty());
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].severity, Severity::Info);
}

#[test]
fn findings_keep_traversal_order_across_parallel_files() {
    let files: Vec<_> = (0..12)
        .map(|i| {
            SourceFile {
                path: PathBuf::from(format!("ui/Screen{i}.kt")),
                type_resolution: false,
                root: SourceNode::call("Column").content(vec![
                    SourceNode::call("Checkbox").at(Span::new(10, 20, 2, 5)),
                    SourceNode::call("TextField").at(Span::new(30, 40, 3, 5)),
                ]),
            }
            .lower()
        })
        .collect();

    let report = RuleEngine::new(RuleSet::default())
        .with_workers(4)
        .check_files(&files);

    assert_eq!(report.files.len(), 12);
    for (i, file) in report.files.iter().enumerate() {
        assert_eq!(file.path, PathBuf::from(format!("ui/Screen{i}.kt")));
        let lines: Vec<u32> = file.findings.iter().map(|f| f.span.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }
    assert_eq!(report.summary.warning, 24);
}
