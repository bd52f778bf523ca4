mod harness;

use creole_engine::{formats, translate, EngineError, OutputFormat, ProcessOptions};
use harness::render;

fn resolve_var(name: u8) -> i32 {
    if name == b'Z' {
        42
    } else {
        0
    }
}

static EXPR_FORMAT: OutputFormat<'static> = OutputFormat {
    begin_par: "[%{1+2}|%{Z}|%{Q}|%{3>2}]",
    end_par: "[end]\n",
    get_var: Some(resolve_var),
    ..OutputFormat::EMPTY
};

#[test]
fn expressions_resolve_inside_fragments() {
    assert_eq!(
        render("x", ProcessOptions::NO_PRE_AND_POST, &EXPR_FORMAT),
        "[3|42|0|1]x[end]\n"
    );
}

static REPL_FORMAT: OutputFormat<'static> = OutputFormat {
    begin_par: "%%{0-3}no%%%%{3}ab%%%{s}|",
    end_par: "",
    ..OutputFormat::EMPTY
};

#[test]
fn replication_counts_and_default_font_size() {
    // a non-positive count replicates to nothing; s falls back to the
    // format's default
    assert_eq!(
        render("x", ProcessOptions::NO_PRE_AND_POST, &REPL_FORMAT),
        "ababab10|x"
    );
}

static BROKEN_FORMAT: OutputFormat<'static> = OutputFormat {
    begin_par: "%{)}|",
    end_par: "",
    ..OutputFormat::EMPTY
};

#[test]
fn malformed_expressions_degrade_to_one() {
    assert_eq!(
        render("x", ProcessOptions::NO_PRE_AND_POST, &BROKEN_FORMAT),
        "1|x"
    );
}

#[test]
fn font_size_flows_into_fragments() {
    let mut arena = vec![0u8; 1024];
    let rendered = translate(
        b"=T=\nx\n",
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &formats::HTML,
        12,
    )
    .unwrap();
    let out = String::from_utf8(rendered.slice(&arena).to_vec()).unwrap();
    assert_eq!(
        out,
        "<h1 style=\"font-size:36pt\">T</h1>\n<p style=\"font-size:12pt\">x</p>\n"
    );
}

#[test]
fn eol_sequences_are_translated() {
    let mut arena = vec![0u8; 1024];
    let rendered = translate(
        b"=T=\nx\n",
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\r\n",
        &formats::HTML,
        0,
    )
    .unwrap();
    let out = String::from_utf8(rendered.slice(&arena).to_vec()).unwrap();
    assert_eq!(out, "<h1>T</h1>\r\n<p>x</p>\r\n");
}

#[test]
fn tiny_arena_reports_not_enough_memory() {
    let mut arena = vec![0u8; 16];
    let err = translate(
        b"hello world, this will not fit",
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &formats::HTML,
        0,
    )
    .unwrap_err();
    assert_eq!(err, EngineError::NotEnoughMemory);
}

#[test]
fn wordwrap_breaks_long_text_lines() {
    let input = format!("{}aaaa\n", "aaaa ".repeat(19));
    let out = render(
        &input,
        ProcessOptions::NO_PRE_AND_POST,
        &formats::TEXT,
    );
    let expected = format!(
        "{}aaaa\n{}aaaa\n\n",
        "aaaa ".repeat(13),
        "aaaa ".repeat(5)
    );
    assert_eq!(out, expected);
}
