use crate::format::OutputFormat;

/// man page output.
pub static MAN: OutputFormat<'static> = OutputFormat {
    space: " ",
    indent_spaces: 0,
    def_font_size: 10,
    ctrl_char: b'%',
    begin_doc: ".TH title 1\n",
    end_doc: "",
    max_heading_level: 2,
    begin_heading: "%%{l=1}.SH%%%%{l>1}.SS%% ",
    end_heading: "\n",
    begin_par: ".P\n",
    end_par: "\n",
    line_break: "",
    begin_pre: "",
    end_pre: "",
    begin_pre_line: " ",
    end_pre_line: "\n",
    begin_ul: "",
    end_ul: "",
    begin_ul_item: ".IP *\n",
    end_ul_item: "\n",
    begin_ol: "",
    end_ol: "",
    begin_ol_item: ".IP %{i}\n",
    end_ol_item: "\n",
    begin_dl: "",
    end_dl: "",
    begin_dt: ".IP ",
    end_dt: "\n",
    empty_dt: None,
    begin_dd: "",
    end_dd: "\n",
    begin_indented: "",
    end_indented: "",
    begin_indented_par: "\n.P\n",
    end_indented_par: "\n",
    begin_table: "",
    end_table: "",
    begin_table_row: "",
    end_table_row: "\n",
    begin_table_hcell: "",
    end_table_hcell: " ",
    begin_table_cell: "",
    end_table_cell: " ",
    hor_rule: "\n",
    begin_bold: "\n.B ",
    end_bold: "\n",
    begin_italic: "\n.I ",
    end_italic: "\n",
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
