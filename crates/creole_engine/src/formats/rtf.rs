use crate::bytes::char_len;
use crate::context::Context;
use crate::error::EngineResult;
use crate::format::{OutputFormat, WordwrapPermission};

/// Escapes RTF specials and writes multibyte characters as signed-decimal
/// `\uN?` control words with an ANSI fallback of `?`.
fn encode_char_rtf(ch: &[u8], ctx: &mut Context) -> EngineResult<()> {
    if ch[0] & 0x80 == 0 {
        if matches!(ch[0], b'\\' | b'{' | b'}') {
            ctx.push_raw(b'\\')?;
        }
        return ctx.push_raw(ch[0]);
    }
    let code: i32 = if ch.len() == 2 && ch[0] & 0xe0 == 0xc0 {
        (((ch[0] & 0x1f) as i32) << 6) | (ch[1] & 0x3f) as i32
    } else if ch.len() == 3 && ch[0] & 0xf0 == 0xe0 {
        (((ch[0] & 0x0f) as i32) << 12) | (((ch[1] & 0x3f) as i32) << 6) | (ch[2] & 0x3f) as i32
    } else {
        // stray byte, ignore
        return Ok(());
    };
    // RTF wants the UCS-16 value as a signed 16-bit decimal
    let signed = if code >= 32768 { code - 65536 } else { code };
    ctx.write_text(format!("\\u{signed}?").as_bytes())
}

fn encode_url_rtf(url: &[u8], ctx: &mut Context) -> EngineResult<()> {
    let mut i = 0;
    while i < url.len() {
        let len = char_len(&url[i..]);
        encode_char_rtf(&url[i..i + len], ctx)?;
        i += len;
    }
    Ok(())
}

/// Break after spaces, keeping the space.
fn wordwrap_check_rtf(text: &[u8], at: usize) -> WordwrapPermission {
    if text[at] == b' ' {
        WordwrapPermission::Insert
    } else {
        WordwrapPermission::No
    }
}

/// RTF output.
pub static RTF: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 0,
    def_font_size: 10,
    ctrl_char: b'%',
    begin_doc: "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0\\froman Times;}{\\f1\\fswiss Helvetica;}{\\f2\\fmodern Courier;}}\n",
    end_doc: "\n}\n",
    max_heading_level: 4,
    begin_heading: "{\\pard\\sb%{500-100*l}\\li60\\sa40%%{l=1}\\qc%%\\f1\\fs%{l=1&3*s|l=2&5*s/2|l=3&2*s|3*s/2}%%{l!2}\\b%% %%{i>0}%{i}. %%",
    end_heading: "\\par}\n",
    begin_par: "{\\pard\\sb80\\li60\\qj\\fi160\\f0\\fs%{2*s} ",
    end_par: "\\par}\n",
    line_break: "\\line ",
    begin_pre: "{\\pard\\sb80\\li160\\f2\\fs%{2*s} ",
    end_pre: "}\n",
    begin_pre_line: "",
    end_pre_line: "\\par\n",
    begin_ul: "",
    end_ul: "",
    begin_ul_item: "{\\pard\\sb80\\li%{60+100*l}\\qj\\fi160\\f0\\fs%{2*s} * ",
    end_ul_item: "\\par}\n",
    begin_ol: "",
    end_ol: "",
    begin_ol_item: "{\\pard\\sb80\\li%{60+100*l}\\qj\\fi160\\f0\\fs%{2*s} %{i}",
    end_ol_item: "\\par}\n",
    begin_dl: "",
    end_dl: "",
    begin_dt: "{\\pard\\sb80\\li%{60+100*l}\\qj\\f0\\fs%{2*s}\\i ",
    end_dt: "\\par}\n",
    empty_dt: None,
    begin_dd: "{\\pard\\sb80\\qj\\fi160\\f0\\fs%{2*s}\\li320 ",
    end_dd: "\\par}\n",
    begin_indented: "",
    end_indented: "",
    begin_indented_par: "{\\pard\\sb80\\li%{60+100*l}\\qj\\fi160\\f0\\fs%{2*s} ",
    end_indented_par: "\\par}\n",
    begin_table: "{\\par\\li60 ",
    end_table: "\\pard}\n",
    begin_table_row: "\\trowd\\trautofit1 ",
    end_table_row: "\\row\n",
    begin_table_hcell: "\\pard\\intbl\\sb80\\qc\\fi160\\f0\\fs%{2*s} {\\b ",
    end_table_hcell: "}\\cell\n",
    begin_table_cell: "\\pard\\intbl\\sb80\\qj\\fi160\\f0\\fs%{2*s} ",
    end_table_cell: "\\cell\n",
    hor_rule: "\\hrule\n",
    begin_bold: "{\\b ",
    end_bold: "}",
    begin_italic: "{\\i ",
    end_italic: "}",
    begin_underline: "{\\ul ",
    end_underline: "}",
    begin_superscript: "{\\super ",
    end_superscript: "}",
    begin_subscript: "{\\sub ",
    end_subscript: "}",
    begin_code: "{\\f2 ",
    end_code: "}",
    begin_link: "{\\field{\\*\\fldinst{HYPERLINK \"",
    end_link: "}}",
    sep_link: Some("\"}}{\\fldrslt "),
    link_after_sep: false,
    begin_image: "",
    end_image: "",
    sep_image: None,
    image_after_sep: false,
    no_style_in_alt: false,
    interwikis: &[],
    encode_url: Some(encode_url_rtf),
    encode_char: Some(encode_char_rtf),
    encode_char_pre: Some(encode_char_rtf),
    text_width: Some(70),
    wordwrap_permitted: Some(wordwrap_check_rtf),
    plugins: &[],
    autoconverts: &[],
    get_var: None,
};
