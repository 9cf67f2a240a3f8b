use insta::assert_snapshot;
use notepub_core::note::{Note, NoteGraph, Vault};
use notepub_core::noteref::{CompileOptions, Destination, NoteRefCompiler, parse, resolve};
use rstest::{fixture, rstest};

fn compile(graph: &NoteGraph, dest: Destination, input: &str) -> String {
    NoteRefCompiler::new(graph, CompileOptions::new(dest)).process(input)
}

#[fixture]
fn chain() -> NoteGraph {
    NoteGraph::from_notes(
        vec![Vault::new("main", "/vaults/main")],
        vec![
            Note::new("foo", "foo", "main").with_body("# Foo\n\n((ref: [[foo.one]]))"),
            Note::new("foo.one", "foo.one", "main").with_body("# Foo.One\n\n((ref: [[foo.two]]))"),
            Note::new("foo.two", "foo.two", "main").with_body("# Foo.Two\n\nblah"),
        ],
    )
}

#[rstest]
fn recursive_chain_expands_into_html(chain: NoteGraph) {
    let out = compile(&chain, Destination::Html, "((ref:[[foo]]))");
    assert!(out.contains("# Foo.One"));
    assert!(out.contains("# Foo.Two"));
    assert!(out.contains("portal"));
    assert!(!out.contains("((ref"));
}

#[rstest]
fn native_keeps_reference_text(chain: NoteGraph) {
    let out = compile(&chain, Destination::Native, "((ref:[[foo]]))");
    assert_eq!(out, "((ref:[[foo]]))");
}

#[rstest]
#[case("((ref:[[foo]]))")]
#[case("before ((ref: [[foo.one#Foo.One]])) after")]
#[case("((ref: [[main:foo.*]]))\n\n`((ref: [[foo]]))`\n")]
#[case("no references at all\r\n")]
#[case("((ref: [[missing]])) and ((ref: [[foo.two]]))")]
fn native_compile_round_trips(chain: NoteGraph, #[case] input: &str) {
    let compiler = NoteRefCompiler::new(&chain, CompileOptions::new(Destination::Native));
    let once = compiler.compile(&parse(input));
    assert_eq!(once, input);
    assert_eq!(compiler.compile(&parse(&once)), input);
}

#[rstest]
#[case(Destination::Markdown)]
#[case(Destination::Html)]
#[case(Destination::EnhancedPreview)]
fn embedding_destinations_wrap_in_portals(chain: NoteGraph, #[case] dest: Destination) {
    let out = compile(&chain, dest, "((ref: [[foo.two]]))");
    assert!(out.starts_with("<div class=\"portal-container\""));
    assert!(out.contains("portal-text-title\">Two</span>"));
    assert!(out.contains("blah"));
    assert_eq!(out.contains("data-note-id=\"foo.two\""), dest == Destination::EnhancedPreview);
}

#[test]
fn cycle_terminates_with_link() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![
            Note::new("a", "a", "main").with_title("A").with_body("A says ((ref: [[b]]))"),
            Note::new("b", "b", "main").with_title("B").with_body("B says ((ref: [[a]]))"),
        ],
    );
    let out = compile(&graph, Destination::Markdown, "((ref: [[a]]))");

    assert!(out.contains("A says"));
    assert!(out.contains("B says [A](a.md)"));
    assert_eq!(out.matches("portal-container").count(), 2);
}

#[test]
fn self_reference_is_a_cycle_of_length_one() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![Note::new("loop", "loop", "main").with_title("Loop").with_body("x ((ref: [[loop]]))")],
    );
    let out = compile(&graph, Destination::Html, "((ref: [[loop]]))");
    assert!(out.contains("x [Loop](loop.html)"));
}

#[test]
fn wildcard_embeds_each_match_in_path_order() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![
            Note::new("d2", "daily.b", "main").with_body("second"),
            Note::new("d1", "daily.a", "main").with_body("first"),
            Note::new("d1x", "daily.a.notes", "main").with_body("too deep"),
        ],
    );
    let desc = parse("((ref: [[daily.*]]))").note_refs().next().cloned().unwrap();
    let first = resolve(&graph, &desc);
    assert_eq!(first, resolve(&graph, &desc));

    let out = compile(&graph, Destination::Markdown, "((ref: [[daily.*]]))");
    let first_at = out.find("first").unwrap();
    let second_at = out.find("second").unwrap();
    assert!(first_at < second_at);
    assert!(!out.contains("too deep"));
}

#[test]
fn anchor_range_slices_body() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![Note::new("guide", "guide", "main").with_body(
            "# Guide\n\n## Install\n\nrun it\n\n## Usage\n\nuse it\n\n## Faq\n\nask\n",
        )],
    );

    let section = compile(&graph, Destination::Markdown, "((ref: [[guide#install]]))");
    assert!(section.contains("## Install\n\nrun it"));
    assert!(!section.contains("use it"));
    assert!(section.contains("href=\"guide.md#install\""));

    let range = compile(&graph, Destination::Markdown, "((ref: [[guide#Install,#Faq]]))");
    assert!(range.contains("run it") && range.contains("use it"));
    assert!(!range.contains("ask"));

    let to_end = compile(&graph, Destination::Markdown, "((ref: [[guide#Usage:#*]]))");
    assert!(to_end.contains("use it") && to_end.contains("ask"));
    assert!(!to_end.contains("run it"));
}

#[test]
fn missing_anchor_falls_back_to_full_body() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![Note::new("guide", "guide", "main").with_body("# Guide\n\nall of it\n")],
    );
    let out = compile(&graph, Destination::Markdown, "((ref: [[guide#nowhere]]))");
    assert!(out.contains("all of it"));
}

#[test]
fn broken_reference_renders_literally() {
    let graph = NoteGraph::new(vec![Vault::new("main", "/m")]);
    let input = "see ((ref: [[nope]])) here";
    assert_eq!(compile(&graph, Destination::Html, input), input);
}

#[test]
fn references_in_code_are_not_expanded() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![Note::new("foo", "foo", "main").with_body("embedded")],
    );
    let input = "`((ref: [[foo]]))`\n\n```\n((ref: [[foo]]))\n```\n";
    assert_eq!(compile(&graph, Destination::Html, input), input);
}

#[test]
fn vault_qualified_reference_across_vaults() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m"), Vault::new("work", "/w")],
        vec![
            Note::new("foo", "foo", "main").with_body("main foo"),
            Note::new("work-foo", "foo", "work").with_body("work foo"),
        ],
    );
    let compiler = NoteRefCompiler::new(
        &graph,
        CompileOptions::new(Destination::Html).with_vault("main"),
    );

    let unqualified = compiler.process("((ref: [[foo]]))");
    assert!(unqualified.contains("main foo"));
    assert!(!unqualified.contains("portal-vault"));

    let qualified = compiler.process("((ref: [[work:foo]]))");
    assert!(qualified.contains("work foo"));
    assert!(qualified.contains("<span class=\"portal-vault\">work</span>"));
}

#[test]
fn markdown_portal_snapshot() {
    let graph = NoteGraph::from_notes(
        vec![Vault::new("main", "/m")],
        vec![Note::new("foo.bar", "foo.bar", "main").with_body("Some *bar* content.\n")],
    );
    let out = compile(&graph, Destination::Markdown, "Intro\n\n((ref: [[foo.bar]]))\n\nOutro\n");
    assert_snapshot!("markdown_portal", out);
}
