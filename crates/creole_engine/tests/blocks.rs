mod harness;

use harness::{html, html_with, text};
use creole_engine::ProcessOptions;

#[test]
fn heading_and_paragraph() {
    assert_eq!(html("=Title=\nHello.\n"), "<h1>Title</h1>\n<p>Hello.</p>\n");
}

#[test]
fn heading_levels_and_trailing_markers() {
    assert_eq!(html("==Sub==\n"), "<h2>Sub</h2>\n");
    assert_eq!(html("== Sub == \nx\n"), "<h2>Sub</h2>\n<p>x</p>\n");
    // no closing run at all
    assert_eq!(html("===Three\n"), "<h3>Three</h3>\n");
    // deeper than the format's maximum is clamped
    assert_eq!(html("======Deep\n"), "<h4>Deep</h4>\n");
}

#[test]
fn a_lone_equals_inside_a_paragraph_is_text() {
    assert_eq!(html("a = b\n"), "<p>a = b</p>\n");
}

#[test]
fn paragraphs_split_on_blank_lines() {
    assert_eq!(html("one\ntwo\n\nthree\n"), "<p>one two</p>\n<p>three</p>\n");
}

#[test]
fn nested_unordered_lists() {
    let out = html("*a\n**b\n*c\n");
    assert_eq!(
        out,
        "<ul>\n<li>a</li>\n  <ul>\n  <li>b</li>\n    </ul>\n    <li>c</li>\n  </ul>\n  "
    );
    assert_eq!(out.matches("<li").count(), 3);
    assert_eq!(out.matches("</li>").count(), 3);
    assert_eq!(out.matches("<ul>").count(), 2);
    assert_eq!(out.matches("</ul>").count(), 2);
}

#[test]
fn ordered_list_items_count_up() {
    let out = text("#one\n#two\n");
    assert!(out.starts_with("1. one"));
    assert!(out.contains("2. two"));
}

#[test]
fn incompatible_marker_is_plain_text() {
    // a `#` line under an open `*` list does not start a numbered list
    let out = html("*a\n#b\n");
    assert!(!out.contains("<ol>"));
    assert!(out.contains("#b"));
}

#[test]
fn definition_list_on_two_lines() {
    assert_eq!(
        html(";term\n:def\n"),
        "<dl>\n<dt>term</dt>\n  <dd>def</dd>\n  </dl>\n  "
    );
}

#[test]
fn definition_list_inline() {
    assert_eq!(
        html(";t:d\n"),
        "<dl>\n<dt>t</dt>\n  <dd>d</dd>\n  </dl>\n  "
    );
}

#[test]
fn indented_paragraph() {
    assert_eq!(
        html(":text\n"),
        "<div style=\"margin-left:2em\">\n<p>text</p>\n  </div>\n  "
    );
}

#[test]
fn simple_table() {
    assert_eq!(
        html("|=A|=B\n|a|b\n"),
        "<table>\n  <tr><th>A</th>\n  <th>B</th>\n  </tr>\n  <tr><td>a</td>\n  <td>b</td>\n  </tr>\n  </table>\n  "
    );
}

#[test]
fn table_cell_trailing_spaces_are_dropped() {
    let out = html("|a   |b\n");
    assert!(out.contains("<td>a</td>"));
}

#[test]
fn preformatted_block_keeps_inner_fence_text() {
    assert_eq!(
        html("{{{\nabc }}} def\n}}}\n"),
        "<pre>\nabc }}} def\n</pre>\n"
    );
}

#[test]
fn preformatted_leading_space_hides_a_fence_line() {
    // a line reading `}}}` can live inside the block with a leading space
    assert_eq!(html("{{{\n }}}\n}}}\n"), "<pre>\n}}}\n</pre>\n");
}

#[test]
fn preformatted_expands_tabs_to_four_columns() {
    assert_eq!(html("{{{\na\tb\n}}}\n"), "<pre>\na   b\n</pre>\n");
}

#[test]
fn preformatted_encodes_characters() {
    assert_eq!(html("{{{\n<x>\n}}}\n"), "<pre>\n&lt;x&gt;\n</pre>\n");
}

#[test]
fn horizontal_rule() {
    assert_eq!(html("----\n"), "<hr />\n");
    assert_eq!(html("--------\n"), "<hr />\n");
}

#[test]
fn line_break_inside_paragraph() {
    assert_eq!(html("a\\\\b\n"), "<p>a<br />b</p>\n");
}

#[test]
fn multiline_paragraphs_can_be_disabled() {
    assert_eq!(html("a\nb\n"), "<p>a b</p>\n");
    assert_eq!(
        html_with("a\nb\n", ProcessOptions::NO_MULTILINE_PAR),
        "<p>a</p>\n<p>b</p>\n"
    );
}

#[test]
fn heading_numbering() {
    assert_eq!(
        html_with("=A=\n=B=\n", ProcessOptions::H1_NUM),
        "<h1>1. A</h1>\n<h1>2. B</h1>\n"
    );
}

#[test]
fn cross_reference_anchors() {
    assert_eq!(
        html_with("=T=\n", ProcessOptions::XREF),
        "<h1><a name=\"h1\">T</a></h1>\n"
    );
}
