use crate::bytes::is_eol;
use crate::context::Context;
use crate::error::EngineResult;
use crate::format::{OutputFormat, WordwrapPermission};

/// Escape table for round-trip output: characters that would read back as
/// markup, paired with the preceding output byte that makes them dangerous
/// (`\n` for a line start, 0 for anywhere).
static ESCAPE_DICT: [(u8, u8); 21] = [
    // first character of a line
    (b'*', b'\n'),
    (b'#', b'\n'),
    (b';', b'\n'),
    (b':', b'\n'),
    (b'=', b'\n'),
    (b'-', b'\n'),
    // doubled characters
    (b'*', b'*'),
    (b'/', b'/'),
    (b'#', b'#'),
    (b'_', b'_'),
    (b'^', b'^'),
    (b',', b','),
    (b'[', b'['),
    (b']', b']'),
    (b'{', b'{'),
    (b'}', b'}'),
    (b'<', b'<'),
    (b'>', b'>'),
    (b'\\', b'\\'),
    // anywhere
    (b'~', 0),
    (b'|', 0),
];

/// Escapes only what would be re-read as markup, judged against the output
/// produced so far.
fn encode_char_creole(ch: &[u8], ctx: &mut Context) -> EngineResult<()> {
    let output = ctx.output();
    let prev = match output.last() {
        None => b'\n',
        Some(&last) if is_eol(last) => b'\n',
        Some(&last) => last,
    };
    for &(c, context_byte) in &ESCAPE_DICT {
        if ch[0] == c && (context_byte == 0 || prev == context_byte) {
            return ctx.write_text(&[b'~', c]);
        }
    }
    ctx.write_text(ch)
}

/// No line breaks right before a character that would become line-start
/// markup.
fn wordwrap_check_creole(text: &[u8], at: usize) -> WordwrapPermission {
    if text[at] == b' '
        && at + 1 < text.len()
        && text[at + 1] != b'*'
        && text[at + 1] != b'#'
        && text[at + 1] != b'|'
        && text[at + 1] != b'='
    {
        WordwrapPermission::ReplaceChar
    } else {
        WordwrapPermission::No
    }
}

/// Round-trip output: the source markup language itself, normalized.
pub static CREOLE: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 0,
    def_font_size: 10,
    ctrl_char: b'%',
    begin_doc: "",
    end_doc: "",
    max_heading_level: 6,
    begin_heading: "%%{l}=%%",
    end_heading: "%%{l}=%%\n",
    begin_par: "",
    end_par: "\n\n",
    line_break: "\\\\",
    begin_pre: "{{{\n",
    end_pre: "}}}\n\n",
    begin_pre_line: "",
    end_pre_line: "\n",
    begin_ul: "",
    end_ul: "%%{l=1}\n%%",
    begin_ul_item: "%L ",
    end_ul_item: "\n",
    begin_ol: "",
    end_ol: "%%{l=1}\n%%",
    begin_ol_item: "%L ",
    end_ol_item: "\n",
    begin_dl: "",
    end_dl: "%%{l=1}\n%%",
    begin_dt: "%L ",
    end_dt: "\n",
    empty_dt: None,
    begin_dd: "%L ",
    end_dd: "\n",
    begin_indented: "",
    end_indented: "%%{l=1}\n%%",
    begin_indented_par: "%%{l}:%% ",
    end_indented_par: "\n",
    begin_table: "",
    end_table: "\n",
    begin_table_row: "",
    end_table_row: "\n",
    begin_table_hcell: "|=",
    end_table_hcell: "",
    begin_table_cell: "|",
    end_table_cell: "",
    hor_rule: "----\n\n",
    begin_bold: "**",
    end_bold: "**",
    begin_italic: "//",
    end_italic: "//",
    begin_underline: "__",
    end_underline: "__",
    begin_superscript: "^^",
    end_superscript: "^^",
    begin_subscript: ",,",
    end_subscript: ",,",
    begin_code: "##",
    end_code: "##",
    begin_link: "[[",
    end_link: "]]",
    sep_link: Some("|"),
    link_after_sep: false,
    begin_image: "{{",
    end_image: "}}",
    sep_image: Some("|"),
    image_after_sep: false,
    no_style_in_alt: false,
    interwikis: &[],
    encode_url: None,
    encode_char: Some(encode_char_creole),
    encode_char_pre: None,
    text_width: Some(70),
    wordwrap_permitted: Some(wordwrap_check_creole),
    plugins: &[],
    autoconverts: &[],
    get_var: None,
};
