mod harness;

use creole_engine::{formats, ProcessOptions};
use harness::{html, html_with, render};
use test_case::test_case;

#[test_case("a **x** b", ProcessOptions::NO_BOLD; "bold")]
#[test_case("a //x// b", ProcessOptions::NO_ITALIC; "italic")]
#[test_case("a __x__ b", ProcessOptions::NO_UNDERLINE; "underline")]
#[test_case("a ##x## b", ProcessOptions::NO_MONOSPACE; "monospace")]
#[test_case("a ^^x^^ b", ProcessOptions::NO_SUB_SUPERSCRIPT; "superscript")]
#[test_case("a ,,x,, b", ProcessOptions::NO_SUB_SUPERSCRIPT; "subscript")]
fn disabled_style_markers_are_plain_text(input: &str, option: ProcessOptions) {
    let expected = format!("<p>{input}</p>\n");
    assert_eq!(html_with(&format!("{input}\n"), option), expected);
}

#[test]
fn no_link() {
    assert_eq!(
        html_with("[[x]]\n", ProcessOptions::NO_LINK),
        "<p>[[x]]</p>\n"
    );
}

#[test]
fn no_image() {
    assert_eq!(
        html_with("{{x}}\n", ProcessOptions::NO_IMAGE),
        "<p>{{x}}</p>\n"
    );
}

#[test]
fn no_table() {
    assert_eq!(
        html_with("|a|b\n", ProcessOptions::NO_TABLE),
        "<p>|a|b</p>\n"
    );
}

#[test]
fn no_horizontal_rule() {
    assert_eq!(
        html_with("----\n", ProcessOptions::NO_HRULE),
        "<p>----</p>\n"
    );
}

#[test]
fn no_escape() {
    assert_eq!(html("~x\n"), "<p>x</p>\n");
    assert_eq!(html_with("~x\n", ProcessOptions::NO_ESCAPE), "<p>~x</p>\n");
}

#[test]
fn no_h1_promotes_to_h2() {
    assert_eq!(html_with("=T=\n", ProcessOptions::NO_H1), "<h2>T</h2>\n");
}

#[test]
fn no_definition_list() {
    assert_eq!(html_with(";t\n", ProcessOptions::NO_DL), "<p>;t</p>\n");
}

#[test]
fn no_indented_paragraph() {
    assert_eq!(
        html_with(":x\n", ProcessOptions::NO_INDENTED_PAR),
        "<p>:x</p>\n"
    );
}

#[test]
fn no_plugin_leaves_brackets_alone() {
    // without the option an unknown plugin tag is swallowed whole
    assert_eq!(html("<<x>>\n"), "");
    assert_eq!(
        html_with("<<x>>\n", ProcessOptions::NO_PLUGIN),
        "<p>&lt;&lt;x&gt;&gt;</p>\n"
    );
}

#[test]
fn preamble_and_postamble_wrap_the_body() {
    let body = html("=T=\nx\n");
    let full = render("=T=\nx\n", ProcessOptions::empty(), &formats::HTML);
    assert_eq!(
        full,
        format!("<!-- generated by creole_engine -->\n<html><body>\n{body}</body></html>\n")
    );
}
