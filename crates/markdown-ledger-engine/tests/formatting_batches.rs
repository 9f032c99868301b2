//! Several formatting commands queued against one version and committed
//! together.

use markdown_ledger_engine::{Cmd, Document};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn note_formatted_in_one_batch() {
    init_logging();
    let mut doc = Document::from_bytes(b"Shopping\nmilk\neggs\nsee the list online").unwrap();
    let v = doc.current_version();

    doc.heading(v, 2, 0).unwrap();
    doc.unordered_list(v, 9).unwrap();
    doc.link(v, 27, 31, "https://example.com/list").unwrap();
    let report = doc.commit().unwrap();

    insta::assert_snapshot!(doc.flatten(), @r"
    ## Shopping
    - milk
    - eggs
    - see the [list](https://example.com/list) online
    ");
    assert_eq!(report.version, 1);
    assert_eq!(report.inserts_applied, 8);
}

#[test]
fn rule_and_quote_in_one_batch() {
    let mut doc = Document::from_bytes(b"intro\noutro\n- quoted item").unwrap();
    let v = doc.current_version();

    doc.horizontal_rule(v, 6).unwrap();
    doc.blockquote(v, 12).unwrap();
    doc.commit().unwrap();

    insta::assert_snapshot!(doc.flatten(), @r"
    intro
    ---
    outro
    > quoted item
    ");
}

#[test]
fn quote_replacing_list_marker_keeps_later_commands_in_place() {
    let mut doc = Document::from_bytes(b"1. item\nnext").unwrap();
    doc.blockquote(0, 0).unwrap();
    doc.bold(0, 8, 12).unwrap();
    doc.commit().unwrap();

    assert_eq!(doc.flatten(), "> item\n**next**");
}

#[test]
fn quote_then_rule_in_one_batch() {
    let mut doc = Document::from_bytes(b"intro\n- quoted item\noutro").unwrap();
    let v = doc.current_version();

    doc.blockquote(v, 6).unwrap();
    doc.horizontal_rule(v, 20).unwrap();
    doc.commit().unwrap();

    insta::assert_snapshot!(doc.flatten(), @r"
    intro
    > quoted item
    ---
    outro
    ");
}

#[test]
fn commands_from_collaborator() {
    let mut doc = Document::new();
    doc.apply(0, &Cmd::Insert {
        pos: 0,
        text: "alpha\nbeta".to_string(),
    })
    .unwrap();
    doc.commit().unwrap();

    // At a shared position the later command's marker reads first, so the
    // code span goes in before the list numbering.
    let cmds = [
        Cmd::Code { start: 6, end: 10 },
        Cmd::OrderedList { pos: 0 },
    ];
    for cmd in &cmds {
        doc.apply(1, cmd).unwrap();
    }
    doc.commit().unwrap();

    assert_eq!(doc.flatten(), "1. alpha\n2. `beta`");
    assert_eq!(doc.current_version(), 2);
}

#[test]
fn numbering_a_long_document_in_one_commit() {
    let text = (0..5000).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut doc = Document::from_bytes(text.as_bytes()).unwrap();
    doc.ordered_list(0, 0).unwrap();
    let report = doc.commit().unwrap();

    let content = doc.flatten();
    assert_eq!(report.inserts_applied, 5000);
    assert!(content.starts_with("1. line 0\n2. line 1\n"));
    assert!(content.ends_with("\n5000. line 4999"));
}

#[test]
fn failed_command_leaves_batch_intact() {
    let mut doc = Document::from_bytes(b"text").unwrap();
    doc.italic(0, 0, 4).unwrap();
    let queued = doc.pending().len();

    assert!(doc.heading(0, 9, 0).is_err());
    assert!(doc.link(0, 0, 4, "").is_err());
    assert_eq!(doc.pending().len(), queued);

    doc.commit().unwrap();
    assert_eq!(doc.flatten(), "*text*");
}

#[test]
fn successive_commits_use_fresh_snapshots() {
    let mut doc = Document::from_bytes(b"one\ntwo").unwrap();
    doc.unordered_list(0, 0).unwrap();
    doc.commit().unwrap();
    assert_eq!(doc.flatten(), "- one\n- two");

    // Positions now refer to the committed list.
    doc.blockquote(1, 6).unwrap();
    doc.commit().unwrap();
    assert_eq!(doc.flatten(), "- one\n> two");
}
