mod harness;

use creole_engine::{formats, Interwiki, OutputFormat, ProcessOptions};
use harness::{html, html_with, render};
use test_case::test_case;

#[test_case("**b**", "<p><b>b</b></p>\n"; "bold")]
#[test_case("//i//", "<p><i>i</i></p>\n"; "italic")]
#[test_case("__u__", "<p><u>u</u></p>\n"; "underline")]
#[test_case("^^s^^", "<p><sup>s</sup></p>\n"; "superscript")]
#[test_case(",,s,,", "<p><sub>s</sub></p>\n"; "subscript")]
#[test_case("##m##", "<p><tt>m</tt></p>\n"; "monospace")]
fn basic_styles(input: &str, expected: &str) {
    assert_eq!(html(input), expected);
}

#[test]
fn mis_nested_styles_are_repaired() {
    let out = html("**bold //both** italic//");
    assert_eq!(out, "<p><b>bold <i>both</i></b><i> italic</i></p>\n");
}

#[test]
fn unterminated_styles_close_at_paragraph_end() {
    assert_eq!(html("**open\n\nnext\n"), "<p><b>open</b></p>\n<p>next</p>\n");
}

#[test]
fn unmatched_closers_are_plain_text() {
    assert_eq!(html("a]]b\n"), "<p>a]]b</p>\n");
}

#[test]
fn link_with_separator_and_text() {
    assert_eq!(
        html("[[http://x/ | click]]"),
        "<p><a href=\"http://x/\">click</a></p>\n"
    );
}

#[test]
fn link_without_text_renders_target_as_text() {
    assert_eq!(
        html("[[http://x/]]"),
        "<p><a href=\"http://x/\">http://x/</a></p>\n"
    );
}

#[test]
fn image_with_alt_text() {
    assert_eq!(
        html("{{pic.png|alt}}"),
        "<p><img src=\"pic.png\" alt=\"alt\" /></p>\n"
    );
}

#[test]
fn styles_inside_image_alt_text_are_ignored() {
    // the HTML format suppresses style markup inside alt text
    assert_eq!(
        html("{{pic.png|a **b**}}"),
        "<p><img src=\"pic.png\" alt=\"a b\" /></p>\n"
    );
}

#[test]
fn image_inside_link() {
    assert_eq!(
        html("[[http://x/|{{i.png|go}}]]"),
        "<p><a href=\"http://x/\"><img src=\"i.png\" alt=\"go\" /></a></p>\n"
    );
}

#[test]
fn url_slash_does_not_toggle_italic() {
    // the // of a scheme inside running text is not an italic marker
    assert_eq!(
        html("see http://example.com/x now\n"),
        "<p>see http://example.com/x now</p>\n"
    );
}

#[test]
fn inline_verbatim_protects_markup() {
    assert_eq!(html("a {{{**raw**}}} b\n"), "<p>a **raw** b</p>\n");
}

#[test]
fn inline_verbatim_as_monospace() {
    assert_eq!(
        html_with("a {{{raw}}} b\n", ProcessOptions::VERBATIM_MONO),
        "<p>a <tt>raw</tt> b</p>\n"
    );
}

#[test]
fn escape_character_neutralizes_markup() {
    assert_eq!(html("~*not a list\n"), "<p>*not a list</p>\n");
    // escaping is invisible for characters without markup meaning
    assert_eq!(html("a~<b\n"), html("a<b\n"));
    // breaking the first marker of a pair leaves both as plain text
    assert_eq!(html("x ~// y\n"), "<p>x // y</p>\n");
}

#[test]
fn html_specials_are_encoded() {
    assert_eq!(html("a<b&c\n"), "<p>a&lt;b&amp;c</p>\n");
}

#[test]
fn multibyte_text_passes_through() {
    assert_eq!(html("héllo €\n"), "<p>héllo €</p>\n");
}

static WIKIS: [Interwiki<'static>; 2] = [
    Interwiki {
        alias: "Wiki:",
        url_prefix: "http://wiki.example.org/",
    },
    Interwiki {
        alias: "WikiDe:",
        url_prefix: "http://de.example.org/",
    },
];

#[test]
fn interwiki_expands_longest_alias() {
    let format = OutputFormat {
        interwikis: &WIKIS,
        ..formats::HTML
    };
    let out = render("[[Wiki:Page|p]]", ProcessOptions::NO_PRE_AND_POST, &format);
    assert_eq!(out, "<p><a href=\"http://wiki.example.org/Page\">p</a></p>\n");
    let out = render(
        "[[WikiDe:Seite|s]]",
        ProcessOptions::NO_PRE_AND_POST,
        &format,
    );
    assert_eq!(out, "<p><a href=\"http://de.example.org/Seite\">s</a></p>\n");
}
