use super::encode_with_dict;
use crate::context::Context;
use crate::error::EngineResult;
use crate::format::OutputFormat;

/// Character substitutions for HTML or XML.
static HTML_CHAR_DICT: [(u8, &str); 4] = [
    (b'<', "&lt;"),
    (b'>', "&gt;"),
    (b'"', "&quot;"),
    (b'&', "&amp;"),
];

fn encode_char_html(ch: &[u8], ctx: &mut Context) -> EngineResult<()> {
    encode_with_dict(&HTML_CHAR_DICT, ch, ctx)
}

/// HTML output.
pub static HTML: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 2,
    def_font_size: 0,
    ctrl_char: b'%',
    begin_doc: "<!-- generated by creole_engine -->\n<html><body>\n",
    end_doc: "</body></html>\n",
    max_heading_level: 4,
    begin_heading: "<h%{l}%%{s>0} style=\"font-size:%{l=1&3*s|l=2&2*s|l=3&3*s/2|5*s/4}pt\"%%>%%{x}<a name=\"h%{o}\">%%%%{i>0}%{i}. %%",
    end_heading: "%%{x}</a>%%</h%{l}>\n",
    begin_par: "<p%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_par: "</p>\n",
    line_break: "<br />",
    begin_pre: "<pre%%{s>0} style=\"font-size:%{s}pt\"%%>\n",
    end_pre: "</pre>\n",
    begin_pre_line: "",
    end_pre_line: "\n",
    begin_ul: "<ul>\n",
    end_ul: "</ul>\n",
    begin_ul_item: "<li%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_ul_item: "</li>\n",
    begin_ol: "<ol>\n",
    end_ol: "</ol>\n",
    begin_ol_item: "<li%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_ol_item: "</li>\n",
    begin_dl: "<dl>\n",
    end_dl: "</dl>\n",
    begin_dt: "<dt%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_dt: "</dt>\n",
    empty_dt: None,
    begin_dd: "<dd%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_dd: "</dd>\n",
    begin_indented: "<div style=\"margin-left:2em%%{s>0}; font-size:%{s}pt%%\">\n",
    end_indented: "</div>\n",
    begin_indented_par: "<p%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_indented_par: "</p>\n",
    begin_table: "<table>\n",
    end_table: "</table>\n",
    begin_table_row: "<tr>",
    end_table_row: "</tr>\n",
    begin_table_hcell: "<th%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_table_hcell: "</th>\n",
    begin_table_cell: "<td%%{s>0} style=\"font-size:%{s}pt\"%%>",
    end_table_cell: "</td>\n",
    hor_rule: "<hr />\n",
    begin_bold: "<b>",
    end_bold: "</b>",
    begin_italic: "<i>",
    end_italic: "</i>",
    begin_underline: "<u>",
    end_underline: "</u>",
    begin_superscript: "<sup>",
    end_superscript: "</sup>",
    begin_subscript: "<sub>",
    end_subscript: "</sub>",
    begin_code: "<tt>",
    end_code: "</tt>",
    begin_link: "<a href=\"",
    end_link: "</a>",
    sep_link: Some("\">"),
    link_after_sep: false,
    begin_image: "<img src=\"",
    end_image: "\" />",
    sep_image: Some("\" alt=\""),
    image_after_sep: false,
    no_style_in_alt: true,
    interwikis: &[],
    encode_url: None,
    encode_char: Some(encode_char_html),
    encode_char_pre: Some(encode_char_html),
    text_width: Some(70),
    wordwrap_permitted: None,
    plugins: &[],
    autoconverts: &[],
    get_var: None,
};
