use super::encode_with_dict;
use crate::context::Context;
use crate::error::EngineResult;
use crate::format::OutputFormat;

/// Character substitutions for LaTeX.
static LATEX_CHAR_DICT: [(u8, &str); 11] = [
    (b'#', "\\#"),
    (b'^', "$\\,\\hat{}\\,$"),
    (b'~', "$\\,\\tilde{}\\,$"),
    (b'\\', "$\\backslash$"),
    (b'|', "$|$"),
    (b'\'', "\'{}"),
    (b'`', "`{}"),
    (b'<', "$<$"),
    (b'>', "$>$"),
    (b'{', "\\{"),
    (b'}', "\\}"),
];

fn encode_char_latex(ch: &[u8], ctx: &mut Context) -> EngineResult<()> {
    encode_with_dict(&LATEX_CHAR_DICT, ch, ctx)
}

/// LaTeX output.
pub static LATEX: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 2,
    def_font_size: 10,
    ctrl_char: b'%',
    begin_doc: "\\documentclass[%{s}pt]{article}\n\\usepackage{hyperref}\n\\begin{document}\n",
    end_doc: "\n\\end{document}\n",
    max_heading_level: 4,
    begin_heading: "\n\\%%{l>3&2|l-1}sub%%section%%{l>3|i<1}*%%{",
    end_heading: "}\n",
    begin_par: "\n",
    end_par: "\n",
    line_break: "\\\\",
    begin_pre: "\n\\begin{verbatim}\n",
    end_pre: "\\end{verbatim}\n",
    begin_pre_line: "",
    end_pre_line: "\n",
    begin_ul: "\\begin{itemize}\n",
    end_ul: "\\end{itemize}\n",
    begin_ul_item: "\\item ",
    end_ul_item: "\n",
    begin_ol: "\\begin{itemize}\n",
    end_ol: "\\end{itemize}\n",
    begin_ol_item: "\\item[%{i}] ",
    end_ol_item: "\n",
    begin_dl: "\\begin{itemize}\n",
    end_dl: "\\end{itemize}\n",
    begin_dt: "\\item[] {\\bf ",
    end_dt: "} \\hspace{1em} ",
    empty_dt: None,
    begin_dd: "\n",
    end_dd: "\n",
    begin_indented: "\\begin{itemize}\n",
    end_indented: "\\end{itemize}\n",
    begin_indented_par: "\\item[] ",
    end_indented_par: "\n",
    begin_table: "\\begin{tabular}{llllllllllllllll}\n",
    end_table: "\\end{tabular}\n",
    begin_table_row: "",
    end_table_row: "\\\\\n",
    begin_table_hcell: "{\\bf ",
    end_table_hcell: "} & ",
    begin_table_cell: "",
    end_table_cell: " & ",
    hor_rule: "",
    begin_bold: "{\\bfseries ",
    end_bold: "}",
    begin_italic: "{\\itshape ",
    end_italic: "}",
    begin_underline: "\\underline{",
    end_underline: "}",
    begin_superscript: "\\textsuperscript{",
    end_superscript: "}",
    begin_subscript: "\\ensuremath{_{\\mbox{",
    end_subscript: "}}}",
    begin_code: "{\\ttfamily ",
    end_code: "}",
    begin_link: "\\href{",
    end_link: "}",
    sep_link: Some("}{"),
    link_after_sep: false,
    begin_image: "",
    end_image: "",
    sep_image: None,
    image_after_sep: false,
    no_style_in_alt: false,
    interwikis: &[],
    encode_url: None,
    encode_char: Some(encode_char_latex),
    encode_char_pre: None,
    text_width: Some(70),
    wordwrap_permitted: None,
    plugins: &[],
    autoconverts: &[],
    get_var: None,
};
