use bitflags::bitflags;

bitflags! {
    /// Options that change how the input is parsed and rendered.
    #[repr(transparent)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProcessOptions: u32 {
        /// Skip the document preamble and postamble.
        const NO_PRE_AND_POST = 1;
        /// Replace heading level 1 with level 2.
        const NO_H1 = 1 << 2;
        /// Number level-1 headings.
        const H1_NUM = 1 << 3;
        /// Number level-2 headings.
        const H2_NUM = 1 << 4;
        /// Disable definition lists.
        const NO_DL = 1 << 5;
        /// Disable indented paragraphs.
        const NO_INDENTED_PAR = 1 << 6;
        /// Treat every line break as a paragraph separator.
        const NO_MULTILINE_PAR = 1 << 7;
        /// Disable the `~` escape character.
        const NO_ESCAPE = 1 << 8;
        /// Disable horizontal rules.
        const NO_HRULE = 1 << 9;
        /// Disable hypertext links.
        const NO_LINK = 1 << 10;
        /// Disable images.
        const NO_IMAGE = 1 << 11;
        /// Disable tables.
        const NO_TABLE = 1 << 12;
        /// Disable underline spans.
        const NO_UNDERLINE = 1 << 13;
        /// Disable monospace spans.
        const NO_MONOSPACE = 1 << 14;
        /// Disable superscript and subscript spans.
        const NO_SUB_SUPERSCRIPT = 1 << 15;
        /// Disable bold spans.
        const NO_BOLD = 1 << 16;
        /// Disable italic spans.
        const NO_ITALIC = 1 << 17;
        /// Disable plugins and autoconverts.
        const NO_PLUGIN = 1 << 18;
        /// Render inline verbatim in monospace.
        const VERBATIM_MONO = 1 << 20;
        /// Give headings hyperlink target labels (the `x` template variable).
        const XREF = 1 << 21;
    }
}

bitflags! {
    /// Per-entry options in a format's plugin table.
    #[repr(transparent)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PluginOptions: u32 {
        /// The table name only has to match the beginning of the word
        /// following `<<`; otherwise the whole word must match.
        const PARTIAL_NAME = 1;
        /// The plugin's output is markup that must be parsed again.
        const REPARSE_OUTPUT = 1 << 1;
        /// The plugin runs outside any paragraph or list, closing and
        /// reopening as needed.
        const BETWEEN_PAR = 1 << 2;
        /// The plugin uses the triple-angle-bracket placeholder form.
        const TRIPLE_ANGLE_BRACKETS = 1 << 3;
    }
}
