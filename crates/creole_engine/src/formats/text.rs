use crate::format::OutputFormat;

const TEXT_BASE: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 3,
    def_font_size: 10,
    ctrl_char: b'%',
    begin_doc: "",
    end_doc: "",
    max_heading_level: 4,
    begin_heading: "%%{4-l} %%%%{i>0}%{i}. %%",
    end_heading: "\n\n",
    begin_par: "",
    end_par: "\n\n",
    line_break: "\n",
    begin_pre: "",
    end_pre: "\n",
    begin_pre_line: "",
    end_pre_line: "\n",
    begin_ul: "",
    end_ul: "%%{l=1}\n%%",
    begin_ul_item: "%%{3*l-2} %%- ",
    end_ul_item: "\n",
    begin_ol: "",
    end_ol: "%%{l=1}\n%%",
    begin_ol_item: "%%{3*l-3} %%%{i}. ",
    end_ol_item: "\n",
    begin_dl: "",
    end_dl: "%%{l=1}\n%%",
    begin_dt: "%%{3*l-3} %%",
    end_dt: "\n",
    empty_dt: None,
    begin_dd: "%%{3*l-1} %%",
    end_dd: "\n",
    begin_indented: "",
    end_indented: "%%{l=1}\n%%",
    begin_indented_par: "%%{3*l} %%",
    end_indented_par: "\n",
    begin_table: "",
    end_table: "\n",
    begin_table_row: "",
    end_table_row: "\n",
    begin_table_hcell: "",
    end_table_hcell: "\t",
    begin_table_cell: "",
    end_table_cell: "\t",
    hor_rule: "%%{10}-%%\n\n",
    begin_bold: "",
    end_bold: "",
    begin_italic: "",
    end_italic: "",
    begin_underline: "",
    end_underline: "",
    begin_superscript: "",
    end_superscript: "",
    begin_subscript: "",
    end_subscript: "",
    begin_code: "",
    end_code: "",
    begin_link: "",
    end_link: "",
    sep_link: None,
    link_after_sep: false,
    begin_image: "",
    end_image: "",
    sep_image: None,
    image_after_sep: false,
    no_style_in_alt: false,
    interwikis: &[],
    encode_url: None,
    encode_char: None,
    encode_char_pre: None,
    text_width: Some(70),
    wordwrap_permitted: None,
    plugins: &[],
    autoconverts: &[],
    get_var: None,
};

/// Plain text output.
pub static TEXT: OutputFormat<'static> = TEXT_BASE;

/// Plain text output with fewer blank lines.
pub static TEXT_COMPACT: OutputFormat<'static> = OutputFormat {
    begin_heading: "%%{p>0}\n%%%%{4-l} %%%%{i>0}%{i}. %%",
    end_heading: "\n",
    end_par: "\n",
    end_pre: "",
    end_ul: "%%{l=1}%%",
    end_ol: "%%{l=1}%%",
    end_dl: "%%{l=1}%%",
    end_indented: "%%{l=1}%%",
    end_table: "",
    hor_rule: "%%{10}-%%\n",
    ..TEXT_BASE
};
