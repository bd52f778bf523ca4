use creole_engine::{
    formats, translate, AutoconvertFn, Context, EngineError, EngineResult, OutputFormat, Plugin,
    PluginCall, PluginOptions, ProcessOptions,
};
use creole_plugins::{
    convert_camel_case, convert_url, CALENDAR, RAW, REVERSE, ROT13, TOC, UPPERCASE,
};

fn echo_slot(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    ctx.write_text(call.name)?;
    ctx.write_text(b":")?;
    ctx.write_text(call.body)
}

/// Placeholder-form test plugin: `<<<slot ...>>>` echoes its name and body.
const SLOT: Plugin = Plugin {
    name: "slot",
    options: PluginOptions::TRIPLE_ANGLE_BRACKETS,
    run: echo_slot,
};

fn echo_name(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    ctx.write_text(call.name)
}

/// Prefix-matching test plugin.
const ECHO: Plugin = Plugin {
    name: "echo",
    options: PluginOptions::PARTIAL_NAME,
    run: echo_name,
};

static TABLE: [Plugin; 8] = [REVERSE, ROT13, UPPERCASE, RAW, CALENDAR, TOC, SLOT, ECHO];

static AUTOCONVERTS: [AutoconvertFn; 2] = [convert_url, convert_camel_case];

fn render(input: &str, options: ProcessOptions, format: &OutputFormat) -> String {
    let mut size = (2 * input.len()).max(256);
    loop {
        let mut arena = vec![0u8; size];
        match translate(input.as_bytes(), &mut arena, options, "\n", format, 0) {
            Ok(rendered) => {
                return String::from_utf8(rendered.slice(&arena).to_vec()).unwrap();
            }
            Err(EngineError::NotEnoughMemory) => size *= 2,
            Err(err) => panic!("translation failed: {err}"),
        }
    }
}

fn html(input: &str) -> String {
    html_with(input, ProcessOptions::empty())
}

fn html_with(input: &str, options: ProcessOptions) -> String {
    let format = OutputFormat {
        plugins: &TABLE,
        ..formats::HTML
    };
    render(input, options | ProcessOptions::NO_PRE_AND_POST, &format)
}

fn html_autolink(input: &str) -> String {
    let format = OutputFormat {
        autoconverts: &AUTOCONVERTS,
        ..formats::HTML
    };
    render(input, ProcessOptions::NO_PRE_AND_POST, &format)
}

#[test]
fn reverse_output_is_reparsed_as_markup() {
    assert_eq!(html("<<reverse **A**>>"), "<p><b>A</b></p>\n");
}

#[test]
fn reverse_actually_reverses() {
    assert_eq!(html("<<reverse abc>>"), "<p>cba</p>\n");
}

#[test]
fn rot13_inside_a_paragraph() {
    assert_eq!(html("x <<rot13 Uryyb>> y\n"), "<p>x Hello y</p>\n");
}

#[test]
fn uppercase_block_form() {
    // opener and closer stand alone on their lines; the body spans lines
    assert_eq!(html("<<\nuppercase\nabc\ndef\n>>\n"), "<p>ABC DEF</p>\n");
}

#[test]
fn inline_body_may_span_lines() {
    assert_eq!(html("<<uppercase\nabc\ndef>>\n"), "<p>ABC DEF</p>\n");
}

#[test]
fn raw_bypasses_the_character_encoder() {
    assert_eq!(html("<<raw <b> & text>>\n"), "<p><b> & text</p>\n");
}

#[test]
fn placeholder_form_uses_triple_brackets() {
    assert_eq!(html("<<<slot x>>>"), "<p>slot:x</p>\n");
    // the triple-bracket entry is invisible to the double-bracket form
    assert_eq!(html("<<slot x>>"), "");
}

#[test]
fn partial_names_match_by_prefix() {
    assert_eq!(html("<<echoXYZ body>>"), "<p>echoXYZ</p>\n");
}

#[test]
fn unknown_plugins_are_swallowed() {
    assert_eq!(html("<<nope x>>\n"), "");
}

#[test]
fn calendar_renders_a_table() {
    let out = html("<<calendar 2008 3>>\n");
    assert!(out.contains("<table>"), "no table in {out}");
    assert!(out.contains("<th>Mon</th>"));
    // March 2008 starts on a Saturday: exactly five leading empty cells
    assert_eq!(out.matches("<td></td>").count(), 5, "wrong weekday offset in {out}");
    assert!(out.contains("<td>1</td>"));
    assert!(out.contains("<td>31</td>"));
    assert!(out.contains("</table>"));
    // between-paragraph: no stray paragraph is opened for the plugin
    assert!(!out.contains("<p></p>"));
}

#[test]
fn toc_lists_headings_with_matching_anchors() {
    let out = html_with(
        "<<toc 1 2 Contents>>\n=A=\n==B==\n",
        ProcessOptions::XREF,
    );
    assert_eq!(
        out,
        "<h2>Contents</h2>\n<p>\n&nbsp;<a href=\"#h22\">A</a><br />\n\
         &nbsp;&nbsp;<a href=\"#h27\">B</a><br />\n</p>\n\
         <h1><a name=\"h22\">A</a></h1>\n<h2><a name=\"h27\">B</a></h2>\n"
    );
}

#[test]
fn urls_become_links() {
    assert_eq!(
        html_autolink("see http://x.org/a, done\n"),
        "<p>see <a href=\"http://x.org/a\">http://x.org/a</a>, done</p>\n"
    );
}

#[test]
fn camel_case_words_become_links() {
    // the emitted link markup is itself protected from reconversion
    assert_eq!(
        html_autolink("a WikiWord here\n"),
        "<p>a <a href=\"WikiWord\">WikiWord</a> here</p>\n"
    );
}

#[test]
fn plain_words_are_left_alone() {
    assert_eq!(html_autolink("just words\n"), "<p>just words</p>\n");
}
