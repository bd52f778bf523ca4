//! Output format descriptors.
//!
//! An [`OutputFormat`] is a plain value that fully parameterizes a target:
//! every fragment string emitted at a parser event, the templating control
//! character, and the per-character / per-URL encoder callbacks. Descriptors
//! carry no per-translation state, so the bundled ones are `static` values
//! shared freely across translations. Stateful callbacks (the division,
//! paragraph, span, and character hooks) live on the [`Hooks`] trait instead
//! and are passed per translation.

use crate::context::Context;
use crate::error::EngineResult;
use crate::options::PluginOptions;

/// Encodes one character into the output. `ch` holds the full UTF-8 byte
/// sequence of a single character; the engine advances the source cursor.
pub type EncodeCharFn = fn(ch: &[u8], ctx: &mut Context<'_>) -> EngineResult<()>;

/// Encodes a link target into the output (percent-escaping, hex quoting...).
pub type EncodeUrlFn = fn(url: &[u8], ctx: &mut Context<'_>) -> EngineResult<()>;

/// Decides whether the output may be broken at byte `break_at` of `text`.
pub type WordwrapCheckFn = fn(text: &[u8], break_at: usize) -> WordwrapPermission;

/// Resolves a single-uppercase-letter template variable to its value.
pub type GetVarFn = fn(name: u8) -> i32;

/// Offered the source at `cursor` before each token; returns `Ok(true)` after
/// consuming input and emitting replacement text through `ctx`, in which case
/// the emitted text is reparsed as markup.
pub type AutoconvertFn =
    fn(src: &[u8], cursor: &mut usize, ctx: &mut Context<'_>) -> EngineResult<bool>;

/// A plugin callback. Emits replacement text through `ctx`; whether that text
/// is reparsed is controlled by the table entry's options.
pub type PluginFn = fn(call: &PluginCall<'_>, ctx: &mut Context<'_>) -> EngineResult<()>;

/// Arguments handed to a plugin callback.
#[derive(Debug, Clone, Copy)]
pub struct PluginCall<'c> {
    /// The identifier that followed `<<` (or `<<<`).
    pub name: &'c [u8],
    /// The body between the name and the closing bracket, trailing
    /// end-of-line removed for block plugins.
    pub body: &'c [u8],
    /// The source buffer currently being read. Lets document-level plugins
    /// (such as a table of contents) run a nested translation of the input.
    pub source: &'c [u8],
}

/// Entry in a format's plugin table.
#[derive(Debug, Clone, Copy)]
pub struct Plugin {
    pub name: &'static str,
    pub options: PluginOptions,
    pub run: PluginFn,
}

/// A named alias expanded at the front of matching link targets.
#[derive(Debug, Clone, Copy)]
pub struct Interwiki<'a> {
    /// Alias text, including the trailing colon if any.
    pub alias: &'a str,
    /// URL fragment the alias is replaced with.
    pub url_prefix: &'a str,
}

/// What kind of line break is allowed at a wordwrap candidate point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordwrapPermission {
    /// No break permitted here.
    No,
    /// The break replaces the character at this position (typically a space).
    ReplaceChar,
    /// The break is inserted before the character at this position.
    Insert,
}

/// `level` value hooks receive for paragraph-level constructs.
pub const HOOK_LEVEL_PAR: i32 = 0;
/// `level` value hooks receive for inline spans.
pub const HOOK_LEVEL_SPAN: i32 = -1;

/// Per-translation construct callbacks.
///
/// Every method receives the source offset of the construct relative to the
/// original input (buffer swaps are compensated for) and the live context, so
/// a hook may inject text into the output stream. All methods default to
/// no-ops; implementors override what they need. Errors abort the
/// translation.
#[allow(unused_variables)]
pub trait Hooks {
    /// Called between whole constructs: heading-delimited sections, whole
    /// lists, and whole tables.
    fn division(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        src_index: usize,
        ctx: &mut Context,
    ) -> EngineResult<()> {
        Ok(())
    }

    /// Called for each paragraph-like unit: paragraphs, headings,
    /// preformatted blocks, list items, table cells, horizontal rules.
    fn paragraph(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        src_index: usize,
        ctx: &mut Context,
    ) -> EngineResult<()> {
        Ok(())
    }

    /// Called for each inline style span, link, and image.
    fn span(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        src_index: usize,
        ctx: &mut Context,
    ) -> EngineResult<()> {
        Ok(())
    }

    /// Called before each plain character is added to the output.
    fn character(&mut self, src_index: usize, ctx: &mut Context) -> EngineResult<()> {
        Ok(())
    }
}

/// The hook set used when the caller does not supply one.
pub struct NoHooks;

impl Hooks for NoHooks {}

/// Static description of an output target.
///
/// Fragment strings may contain template control sequences (see the crate
/// docs): `C{expr}` for a decimal substitution, `CC{expr}body CC` for a
/// replicated string, and `CL` for the current list-nesting signature, where
/// `C` is `ctrl_char`. Embedded `\n` is translated to the configured
/// end-of-line sequence followed by the current indentation.
#[derive(Debug, Clone, Copy)]
pub struct OutputFormat<'a> {
    /// One space, as rendered between words.
    pub space: &'a str,
    /// Spaces per level used to indent list continuation lines; 0 to rely on
    /// the target markup.
    pub indent_spaces: usize,
    /// Default font size in points, used when the caller passes none.
    pub def_font_size: i32,
    /// Control character for template expressions (usually `%`).
    pub ctrl_char: u8,
    /// Document preamble.
    pub begin_doc: &'a str,
    /// Document postamble.
    pub end_doc: &'a str,
    /// Highest heading level; deeper headings are clamped.
    pub max_heading_level: i32,
    pub begin_heading: &'a str,
    pub end_heading: &'a str,
    pub begin_par: &'a str,
    pub end_par: &'a str,
    /// Forced line break inside a paragraph.
    pub line_break: &'a str,
    pub begin_pre: &'a str,
    pub end_pre: &'a str,
    pub begin_pre_line: &'a str,
    pub end_pre_line: &'a str,
    pub begin_ul: &'a str,
    pub end_ul: &'a str,
    pub begin_ul_item: &'a str,
    pub end_ul_item: &'a str,
    pub begin_ol: &'a str,
    pub end_ol: &'a str,
    pub begin_ol_item: &'a str,
    pub end_ol_item: &'a str,
    pub begin_dl: &'a str,
    pub end_dl: &'a str,
    pub begin_dt: &'a str,
    pub end_dt: &'a str,
    /// Written before `begin_dd` when the definition does not follow a title.
    pub empty_dt: Option<&'a str>,
    pub begin_dd: &'a str,
    pub end_dd: &'a str,
    pub begin_indented: &'a str,
    pub end_indented: &'a str,
    pub begin_indented_par: &'a str,
    pub end_indented_par: &'a str,
    pub begin_table: &'a str,
    pub end_table: &'a str,
    pub begin_table_row: &'a str,
    pub end_table_row: &'a str,
    pub begin_table_hcell: &'a str,
    pub end_table_hcell: &'a str,
    pub begin_table_cell: &'a str,
    pub end_table_cell: &'a str,
    pub hor_rule: &'a str,
    pub begin_bold: &'a str,
    pub end_bold: &'a str,
    pub begin_italic: &'a str,
    pub end_italic: &'a str,
    pub begin_underline: &'a str,
    pub end_underline: &'a str,
    pub begin_superscript: &'a str,
    pub end_superscript: &'a str,
    pub begin_subscript: &'a str,
    pub end_subscript: &'a str,
    pub begin_code: &'a str,
    pub end_code: &'a str,
    pub begin_link: &'a str,
    pub end_link: &'a str,
    /// Separator between link target and link text; `None` disables link
    /// target emission entirely.
    pub sep_link: Option<&'a str>,
    /// True if the target is written after `sep_link`, false if before.
    pub link_after_sep: bool,
    pub begin_image: &'a str,
    pub end_image: &'a str,
    pub sep_image: Option<&'a str>,
    pub image_after_sep: bool,
    /// True if style markup is ignored inside image alt text.
    pub no_style_in_alt: bool,
    pub interwikis: &'a [Interwiki<'a>],
    /// Link target encoder; targets are copied verbatim when absent. Not
    /// applied to interwiki URL prefixes.
    pub encode_url: Option<EncodeUrlFn>,
    /// Character encoder everywhere except preformatted blocks.
    pub encode_char: Option<EncodeCharFn>,
    /// Character encoder inside preformatted blocks.
    pub encode_char_pre: Option<EncodeCharFn>,
    /// Soft wordwrap column, or `None` for no wrapping.
    pub text_width: Option<usize>,
    /// Break-point predicate; when absent, lines break at the last blank.
    pub wordwrap_permitted: Option<WordwrapCheckFn>,
    pub plugins: &'a [Plugin],
    pub autoconverts: &'a [AutoconvertFn],
    /// Resolver for single-uppercase-letter template variables.
    pub get_var: Option<GetVarFn>,
}

impl OutputFormat<'static> {
    /// A descriptor with empty fragments and no callbacks. Custom formats
    /// start from this with struct update syntax, overriding what they need.
    pub const EMPTY: OutputFormat<'static> = OutputFormat {
        space: "",
        indent_spaces: 0,
        def_font_size: 10,
        ctrl_char: b'%',
        begin_doc: "",
        end_doc: "",
        max_heading_level: 4,
        begin_heading: "",
        end_heading: "",
        begin_par: "",
        end_par: "",
        line_break: "",
        begin_pre: "",
        end_pre: "",
        begin_pre_line: "",
        end_pre_line: "",
        begin_ul: "",
        end_ul: "",
        begin_ul_item: "",
        end_ul_item: "",
        begin_ol: "",
        end_ol: "",
        begin_ol_item: "",
        end_ol_item: "",
        begin_dl: "",
        end_dl: "",
        begin_dt: "",
        end_dt: "",
        empty_dt: None,
        begin_dd: "",
        end_dd: "",
        begin_indented: "",
        end_indented: "",
        begin_indented_par: "",
        end_indented_par: "",
        begin_table: "",
        end_table: "",
        begin_table_row: "",
        end_table_row: "",
        begin_table_hcell: "",
        end_table_hcell: "",
        begin_table_cell: "",
        end_table_cell: "",
        hor_rule: "",
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
        text_width: None,
        wordwrap_permitted: None,
        plugins: &[],
        autoconverts: &[],
        get_var: None,
    };
}
