use insta::assert_snapshot;
use notepub_core::markdown_ast::{SliceEnd, find_headings, slice_by_headings};
use notepub_core::noteref::parse;

#[test]
fn golden_find_headings_skips_code() {
    let input = include_str!("fixtures/guide.md");

    let headings = find_headings(input);
    let headings_str: Vec<String> =
        headings.iter().map(|h| format!("L{}: {}", h.level, h.title)).collect();

    assert_snapshot!(headings_str.join("\n"), @r"
    L1: Guide
    L2: Install
    L3: From Source
    L2: Usage
    L2: FAQ
    ");
}

#[test]
fn golden_install_section_keeps_subsections() {
    let input = include_str!("fixtures/guide.md");

    let slice = slice_by_headings(input, "install", SliceEnd::NextSection).unwrap();

    assert!(slice.starts_with("## Install\n"));
    assert!(slice.contains("### From Source"));
    assert!(slice.ends_with("Build it yourself.\n\n"));
}

#[test]
fn golden_only_prose_references_are_parsed() {
    let input = include_str!("fixtures/guide.md");

    let targets: Vec<String> = parse(input).note_refs().map(|r| r.target.clone()).collect();

    assert_eq!(targets, vec!["guide.usage.examples"]);
}
