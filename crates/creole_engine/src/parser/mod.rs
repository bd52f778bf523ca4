//! The paragraph/block state machine and the translation driver.
//!
//! One [`Engine`] lives for exactly one translation: it owns the source half
//! of the arena, the emitter [`Context`] (which owns the destination half),
//! the style stack, and the heading bookkeeping. The main loop reads one
//! token at a time, offers autoconverts a chance first, and dispatches on
//! the current block state.

use crate::bytes::{char_len, is_eol, skip_blanks};
use crate::context::{Context, ListSlot};
use crate::error::{EngineError, EngineResult};
use crate::format::{Hooks, NoHooks, OutputFormat, HOOK_LEVEL_PAR};
use crate::lexer::{next_token, LexContext, Style, Token, STYLE_COUNT};
use crate::options::ProcessOptions;

mod blocks;
mod plugins;
mod spans;

pub(crate) use blocks::MAX_NUMBERED_HEADING_LEVELS;

/// Parser block states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Initial state, and between paragraphs.
    BetweenPar,
    Par,
    ParAfterEol,
    Pre,
    PreAfterEol,
    Heading,
}

/// Where the formatted output landed inside the caller's arena.
#[derive(Debug, Clone, Copy)]
pub struct Rendered {
    /// Byte offset of the output within the arena.
    pub offset: usize,
    /// Output length in bytes, excluding the trailing zero byte.
    pub len: usize,
    /// Output length in UCS-16 code units, assuming UTF-8 content.
    pub ucs16_len: usize,
}

impl Rendered {
    /// Borrows the output bytes out of the arena the translation ran in.
    pub fn slice<'b>(&self, arena: &'b [u8]) -> &'b [u8] {
        &arena[self.offset..self.offset + self.len]
    }
}

/// Tab stops in preformatted blocks.
const TAB_WIDTH: usize = 4;

pub(crate) struct Engine<'a, 'h> {
    /// The source half of the arena; `ctx` owns the destination half.
    pub(crate) src: &'a mut [u8],
    pub(crate) ctx: Context<'a>,
    pub(crate) hooks: &'h mut dyn Hooks,
    pub(crate) state: State,
    pub(crate) style_stack: [Style; STYLE_COUNT],
    pub(crate) style_nesting: usize,
    pub(crate) heading_num: [i32; MAX_NUMBERED_HEADING_LEVELS],
    /// Bit `l-1` set while inside a section at heading level `l`.
    pub(crate) heading_flags: u32,
    /// Level of the heading currently or most recently open.
    pub(crate) heading_level: i32,
    /// Prefix of the destination already mirrored back into the source,
    /// maintained by the buffer-swap protocol.
    pub(crate) common_len: usize,
    /// Source bytes below this offset are never offered to autoconverts or
    /// plugins, which stops self-triggering expansions.
    pub(crate) no_auto_or_plugin_len: usize,
    /// True while the destination occupies the upper half of the arena.
    pub(crate) dest_is_upper: bool,
}

/// Translates `input` into `arena`, returning where the output landed.
///
/// The arena is split into two half-buffers (source and destination); the
/// input must fit in one half, and `NotEnoughMemory` asks the caller to
/// retry with a larger arena. The output is always followed by a zero byte.
pub fn translate(
    input: &[u8],
    arena: &mut [u8],
    options: ProcessOptions,
    eol: &str,
    format: &OutputFormat,
    font_size: i32,
) -> EngineResult<Rendered> {
    translate_with_hooks(input, arena, options, eol, format, font_size, &mut NoHooks)
}

/// [`translate`], with construct hooks invoked along the way.
pub fn translate_with_hooks(
    input: &[u8],
    arena: &mut [u8],
    options: ProcessOptions,
    eol: &str,
    format: &OutputFormat,
    font_size: i32,
    hooks: &mut dyn Hooks,
) -> EngineResult<Rendered> {
    let half = arena.len() / 2;
    if input.len() > half {
        return Err(EngineError::NotEnoughMemory);
    }
    let (src_half, dest_half) = arena.split_at_mut(half);
    src_half[..input.len()].copy_from_slice(input);

    let mut ctx = Context::new(
        &mut dest_half[..half],
        format,
        eol.as_bytes(),
        options,
        font_size,
    );
    ctx.src_len = input.len();

    let mut engine = Engine {
        src: src_half,
        ctx,
        hooks,
        state: State::BetweenPar,
        style_stack: [Style::Bold; STYLE_COUNT],
        style_nesting: 0,
        heading_num: [0; MAX_NUMBERED_HEADING_LEVELS],
        heading_flags: 0,
        heading_level: 0,
        common_len: 0,
        no_auto_or_plugin_len: 0,
        dest_is_upper: true,
    };
    engine.run()?;

    if engine.ctx.dest_len + 1 >= engine.ctx.buf_size {
        return Err(EngineError::NotEnoughMemory);
    }
    engine.ctx.dest[engine.ctx.dest_len] = 0;

    Ok(Rendered {
        offset: if engine.dest_is_upper { half } else { 0 },
        len: engine.ctx.dest_len,
        ucs16_len: engine.ctx.dest_len_ucs16,
    })
}

impl<'a, 'h> Engine<'a, 'h> {
    fn run(&mut self) -> EngineResult<()> {
        if !self.ctx.options.contains(ProcessOptions::NO_PRE_AND_POST) {
            self.ctx.write_fragment(self.ctx.format.begin_doc)?;
        }

        let mut i0 = 0usize;
        while self.ctx.src_index < self.ctx.src_len {
            // worst-case room for the token about to be processed
            if self.ctx.dest_len + 2 >= self.ctx.buf_size {
                return Err(EngineError::NotEnoughMemory);
            }

            self.try_autoconverts()?;

            i0 = self.ctx.src_index;
            let heading_level0 = self.heading_level;
            let cx = LexContext {
                state: self.state,
                verbatim: self.style_nesting > 0
                    && self.style_stack[self.style_nesting - 1] == Style::Verbatim,
                nesting: self.ctx.nesting,
                list_num: &self.ctx.list_num,
                style_stack: &self.style_stack[..self.style_nesting],
                options: self.ctx.options,
                max_heading_level: self.ctx.format.max_heading_level,
                heading_level: self.heading_level,
            };
            let Some(token) = next_token(
                &self.src[..self.ctx.src_len],
                &mut self.ctx.src_index,
                &cx,
            ) else {
                // nothing more on the line: ignore
                break;
            };
            if let Token::Heading(level) = token {
                self.heading_level = level;
            }

            match self.state {
                State::BetweenPar => self.on_between_par(token, i0, heading_level0)?,
                State::Par => self.on_par(token, i0)?,
                State::ParAfterEol => self.on_par_after_eol(token, i0, heading_level0)?,
                State::Pre | State::PreAfterEol => self.on_pre(token, i0)?,
                State::Heading => self.on_heading(token, i0)?,
            }
        }

        // end of input: flush whatever is still open
        match self.state {
            State::Par | State::ParAfterEol => {
                self.flush_style_tags(i0)?;
                self.add_end_par(true)?;
            }
            State::Pre => {
                self.ctx.write_fragment(self.ctx.format.end_pre)?;
                self.hook_par(HOOK_LEVEL_PAR, 0, false, "{{{", i0)?;
            }
            State::Heading => {
                self.ctx.level = self.heading_level;
                self.flush_style_tags(i0)?;
                self.ctx.write_fragment(self.ctx.format.end_heading)?;
                self.ctx.check_wordwrap()?;
                let level = self.ctx.level;
                self.hook_par(level, 0, false, "=", i0)?;
                self.ctx.level = 0;
            }
            _ => {}
        }

        if !self.ctx.options.contains(ProcessOptions::NO_PRE_AND_POST) {
            self.ctx.write_fragment(self.ctx.format.end_doc)?;
        }
        Ok(())
    }

    // ---- state handlers -------------------------------------------------

    fn on_between_par(&mut self, token: Token, i0: usize, heading_level0: i32) -> EngineResult<()> {
        match token {
            Token::Char => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "p", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_par)?;
                self.hook_char(i0)?;
                self.emit_source_char(false)?;
                self.ctx.check_wordwrap()?;
                self.state = State::Par;
            }
            Token::Space | Token::Tab | Token::Eol => {}
            Token::Heading(level) => {
                self.close_sections_above(level, heading_level0, i0)?;
                self.begin_heading(level, i0)?;
            }
            Token::LineBreak => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "p", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_par)?;
                self.ctx.write_fragment(self.ctx.format.line_break)?;
                self.state = State::Par;
            }
            Token::PreFence => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "{{{", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_pre)?;
                self.ctx.write_fragment(self.ctx.format.begin_pre_line)?;
                self.state = State::PreAfterEol;
                self.skip_one_eol();
            }
            Token::ListItem(item_nesting) => {
                // open every missing outer list
                self.ctx.nesting = 0;
                while self.ctx.nesting < item_nesting {
                    self.open_list_level(item_nesting, i0)?;
                }
                skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
                self.ctx.current_indent = self.ctx.nesting * self.ctx.format.indent_spaces;
                self.begin_list_item(i0)?;
                self.state = State::Par;
            }
            Token::TableCell | Token::TableHeadingCell => {
                let heading_cell = token == Token::TableHeadingCell;
                self.ctx.list_num[self.ctx.nesting] = if heading_cell {
                    ListSlot::TableHeadingCell
                } else {
                    ListSlot::TableCell
                };
                self.ctx.nesting += 1;
                self.ctx.current_indent = self.ctx.nesting * self.ctx.format.indent_spaces;
                self.state = State::Par;
                self.ctx.level = self.ctx.nesting as i32 - 1;
                self.hook_div(HOOK_LEVEL_PAR, 0, true, "|", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_table)?;
                self.ctx.write_fragment(self.ctx.format.begin_table_row)?;
                let marker = if heading_cell { "|=" } else { "|" };
                self.hook_par(HOOK_LEVEL_PAR, 0, true, marker, i0)?;
                self.ctx.write_fragment(if heading_cell {
                    self.ctx.format.begin_table_hcell
                } else {
                    self.ctx.format.begin_table_cell
                })?;
                self.ctx.level = 0;
            }
            Token::HorizontalRule => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "----", i0)?;
                self.ctx.write_fragment(self.ctx.format.hor_rule)?;
                self.hook_par(HOOK_LEVEL_PAR, 0, false, "----", i0)?;
            }
            Token::Style(style) => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "p", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_par)?;
                self.process_style_tag(style, i0)?;
                self.state = State::Par;
            }
            Token::LinkBegin | Token::ImageBegin => {
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "p", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_par)?;
                self.add_link_begin(token == Token::ImageBegin, i0)?;
                self.state = State::Par;
            }
            Token::Plugin { block, placeholder } => {
                let found = self.find_plugin(placeholder);
                if found.is_some_and(|p| !p.options.contains(crate::options::PluginOptions::BETWEEN_PAR)) {
                    // the plugin output belongs to a fresh paragraph
                    self.hook_par(HOOK_LEVEL_PAR, 0, true, "p", i0)?;
                    self.ctx.write_fragment(self.ctx.format.begin_par)?;
                    self.state = State::Par;
                }
                let dest_len0 = self.ctx.dest_len;
                let reparse = self.add_plugin(block, placeholder)?;
                if reparse {
                    self.swap_buffers(dest_len0)?;
                }
            }
            Token::Definition | Token::LinkEnd | Token::ImageEnd => {
                // should never occur between paragraphs
                return Err(EngineError::Internal);
            }
        }
        Ok(())
    }

    fn on_par(&mut self, token: Token, i0: usize) -> EngineResult<()> {
        match token {
            Token::Char => {
                self.hook_char(i0)?;
                self.emit_source_char(false)?;
                self.ctx.check_wordwrap()?;
            }
            Token::Space | Token::Tab => {
                skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
                // a single space, unless the line ends here
                if self.ctx.src_index < self.ctx.src_len
                    && !is_eol(self.src[self.ctx.src_index])
                {
                    self.ctx.write_fragment(self.ctx.format.space)?;
                    self.ctx.check_wordwrap()?;
                }
            }
            Token::LineBreak => {
                self.ctx.write_fragment(self.ctx.format.line_break)?;
                self.ctx.check_wordwrap()?;
            }
            Token::Eol => {
                self.state = State::ParAfterEol;
            }
            Token::Definition => {
                self.ctx.level = self.ctx.nesting as i32;
                self.flush_style_tags(i0)?;
                self.add_end_par(false)?;
                let level = self.ctx.level;
                let item = self.ctx.item;
                self.hook_par(level, item, true, ";:", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_dd)?;
                self.ctx.check_wordwrap()?;
                self.ctx.level = 0;
                self.ctx.list_num[self.ctx.nesting - 1] = ListSlot::Definition;
            }
            Token::TableCell | Token::TableHeadingCell => {
                // spaces before the cell separator are dropped (tabs stay)
                while self.ctx.dest_len > 0 && self.ctx.dest[self.ctx.dest_len - 1] == b' ' {
                    self.ctx.dest_len -= 1;
                    self.ctx.dest_len_ucs16 -= 1;
                }
                self.ctx.level = self.ctx.nesting as i32;
                self.flush_style_tags(i0)?;
                let was_heading_cell =
                    self.ctx.list_num[self.ctx.nesting - 1] == ListSlot::TableHeadingCell;
                self.ctx.write_fragment(if was_heading_cell {
                    self.ctx.format.end_table_hcell
                } else {
                    self.ctx.format.end_table_cell
                })?;
                self.ctx.check_wordwrap()?;
                self.hook_par(
                    HOOK_LEVEL_PAR,
                    0,
                    false,
                    if was_heading_cell { "|=" } else { "|" },
                    i0,
                )?;
                self.ctx.check_wordwrap()?;
                let heading_cell = token == Token::TableHeadingCell;
                self.hook_par(
                    HOOK_LEVEL_PAR,
                    0,
                    true,
                    if heading_cell { "|=" } else { "|" },
                    i0,
                )?;
                self.ctx.write_fragment(if heading_cell {
                    self.ctx.format.begin_table_hcell
                } else {
                    self.ctx.format.begin_table_cell
                })?;
                self.ctx.check_wordwrap()?;
                self.ctx.level = 0;
                self.ctx.list_num[self.ctx.nesting - 1] = if heading_cell {
                    ListSlot::TableHeadingCell
                } else {
                    ListSlot::TableCell
                };
            }
            Token::Style(style) => {
                self.process_style_tag(style, i0)?;
            }
            Token::LinkEnd => {
                self.process_style_tag(Style::Link, i0)?;
            }
            Token::ImageEnd => {
                self.process_style_tag(Style::Image, i0)?;
            }
            Token::LinkBegin | Token::ImageBegin => {
                self.add_link_begin(token == Token::ImageBegin, i0)?;
            }
            Token::Plugin { block, placeholder } => {
                self.plugin_inside_par(block, placeholder, i0, false)?;
            }
            Token::Heading(_) | Token::ListItem(_) | Token::HorizontalRule | Token::PreFence => {
                // should never occur inside a paragraph
                return Err(EngineError::Internal);
            }
        }
        Ok(())
    }

    fn on_par_after_eol(
        &mut self,
        token: Token,
        i0: usize,
        heading_level0: i32,
    ) -> EngineResult<()> {
        match token {
            Token::Char => {
                let break_par = self.ctx.options.contains(ProcessOptions::NO_MULTILINE_PAR)
                    || (self.ctx.nesting > 0
                        && self.ctx.list_num[self.ctx.nesting - 1].is_table());
                if break_par {
                    self.flush_style_tags(i0)?;
                    self.add_end_par(true)?;
                    self.ctx.write_fragment(self.ctx.format.begin_par)?;
                    self.ctx.current_indent = 0;
                } else {
                    self.ctx.write_fragment(self.ctx.format.space)?;
                }
                self.ctx.check_wordwrap()?;
                self.hook_char(i0)?;
                self.emit_source_char(false)?;
                self.state = State::Par;
            }
            Token::Space | Token::Tab => {}
            Token::Eol => {
                // blank line: the paragraph and any open lists end
                self.flush_style_tags(i0)?;
                self.add_end_par(true)?;
                self.state = State::BetweenPar;
                self.ctx.current_indent = self.ctx.nesting * self.ctx.format.indent_spaces;
            }
            Token::Definition => {
                self.ctx.level = self.ctx.nesting as i32;
                self.flush_style_tags(i0)?;
                self.add_end_par(false)?;
                if self.ctx.list_num[self.ctx.nesting - 1] != ListSlot::DefinitionTitle {
                    // a definition with no preceding title
                    if let Some(empty_dt) = self.ctx.format.empty_dt {
                        self.ctx.write_fragment(empty_dt)?;
                        self.ctx.check_wordwrap()?;
                    }
                }
                skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
                let level = self.ctx.level;
                let item = self.ctx.item;
                self.hook_par(level, item, true, ";:", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_dd)?;
                self.ctx.check_wordwrap()?;
                self.ctx.level = 0;
                self.ctx.list_num[self.ctx.nesting - 1] = ListSlot::Definition;
                self.state = State::Par;
            }
            Token::LineBreak => {
                self.ctx.write_fragment(self.ctx.format.line_break)?;
                self.ctx.check_wordwrap()?;
            }
            Token::PreFence => {
                self.flush_style_tags(i0)?;
                self.add_end_par(true)?;
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "{{{", i0)?;
                self.ctx.write_fragment(self.ctx.format.begin_pre)?;
                self.ctx.write_fragment(self.ctx.format.begin_pre_line)?;
                self.ctx.check_wordwrap()?;
                self.state = State::PreAfterEol;
                self.ctx.current_indent = 0;
                self.skip_one_eol();
            }
            Token::Heading(level) => {
                self.flush_style_tags(i0)?;
                self.add_end_par(true)?;
                self.close_sections_above(level, heading_level0, i0)?;
                self.ctx.current_indent = 0;
                self.begin_heading(level, i0)?;
            }
            Token::ListItem(item_nesting) => {
                // end the previous item, then adjust the list depth
                self.flush_style_tags(i0)?;
                self.add_end_par(false)?;
                while self.ctx.nesting > item_nesting {
                    let closing = self.ctx.list_num[self.ctx.nesting - 1];
                    self.ctx
                        .set_context(self.ctx.nesting as i32, closing.item_number());
                    self.ctx.nesting -= 1;
                    self.ctx.write_fragment(match closing {
                        ListSlot::Unordered => self.ctx.format.end_ul,
                        ListSlot::DefinitionTitle => self.ctx.format.end_dl,
                        ListSlot::Indented => self.ctx.format.end_indented,
                        _ => self.ctx.format.end_ol,
                    })?;
                    let level = self.ctx.level;
                    let item = self.ctx.item;
                    self.hook_div(level, item, false, slot_marker_str(closing), i0)?;
                }
                self.ctx.set_context(0, 0);
                while self.ctx.nesting < item_nesting {
                    self.open_list_level(item_nesting, i0)?;
                }
                self.ctx.current_indent = self.ctx.nesting * self.ctx.format.indent_spaces;
                skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
                // a `;` item after a definition body starts a new title
                if self.ctx.list_num[self.ctx.nesting - 1] == ListSlot::Definition {
                    self.ctx.list_num[self.ctx.nesting - 1] = ListSlot::DefinitionTitle;
                }
                self.begin_list_item(i0)?;
                self.state = State::Par;
            }
            Token::TableCell | Token::TableHeadingCell => {
                self.flush_style_tags(i0)?;
                self.add_end_par(false)?;
                if self.ctx.nesting == 0 || !self.ctx.list_num[self.ctx.nesting - 1].is_table() {
                    // start a new table; at maximum depth the innermost slot
                    // is reused instead of growing the stack
                    if self.ctx.nesting < crate::context::MAX_NESTING {
                        self.ctx.nesting += 1;
                    }
                    self.ctx.level = self.ctx.nesting as i32 - 1;
                    self.hook_div(HOOK_LEVEL_PAR, 0, true, "|", i0)?;
                    self.ctx.write_fragment(self.ctx.format.begin_table)?;
                }
                self.ctx.current_indent = self.ctx.nesting * self.ctx.format.indent_spaces;
                let heading_cell = token == Token::TableHeadingCell;
                self.ctx.list_num[self.ctx.nesting - 1] = if heading_cell {
                    ListSlot::TableHeadingCell
                } else {
                    ListSlot::TableCell
                };
                self.ctx.level = self.ctx.nesting as i32 - 1;
                self.ctx.write_fragment(self.ctx.format.begin_table_row)?;
                let marker = if heading_cell { "|=" } else { "|" };
                self.hook_par(HOOK_LEVEL_PAR, 0, true, marker, i0)?;
                self.ctx.write_fragment(if heading_cell {
                    self.ctx.format.begin_table_hcell
                } else {
                    self.ctx.format.begin_table_cell
                })?;
                self.ctx.check_wordwrap()?;
                self.ctx.level = 0;
                self.state = State::Par;
            }
            Token::HorizontalRule => {
                self.flush_style_tags(i0)?;
                self.add_end_par(true)?;
                self.hook_par(HOOK_LEVEL_PAR, 0, true, "----", i0)?;
                self.ctx.write_fragment(self.ctx.format.hor_rule)?;
                self.ctx.check_wordwrap()?;
                self.hook_par(HOOK_LEVEL_PAR, 0, false, "----", i0)?;
                self.ctx.current_indent = 0;
                self.state = State::BetweenPar;
            }
            Token::Style(_) | Token::LinkEnd | Token::ImageEnd => {
                // the paragraph continues; the eol collapses to one space
                self.ctx.write_fragment(self.ctx.format.space)?;
                self.ctx.check_wordwrap()?;
                let style = match token {
                    Token::LinkEnd => Style::Link,
                    Token::ImageEnd => Style::Image,
                    Token::Style(style) => style,
                    _ => unreachable!(),
                };
                self.process_style_tag(style, i0)?;
                self.state = State::Par;
            }
            Token::LinkBegin | Token::ImageBegin => {
                self.ctx.write_fragment(self.ctx.format.space)?;
                self.add_link_begin(token == Token::ImageBegin, i0)?;
                self.state = State::Par;
            }
            Token::Plugin { block, placeholder } => {
                self.plugin_inside_par(block, placeholder, i0, true)?;
            }
        }
        Ok(())
    }

    fn on_pre(&mut self, token: Token, i0: usize) -> EngineResult<()> {
        if self.state == State::PreAfterEol {
            if token == Token::PreFence {
                self.ctx.write_fragment(self.ctx.format.end_pre)?;
                self.hook_par(HOOK_LEVEL_PAR, 0, false, "{{{", i0)?;
                self.state = State::BetweenPar;
                return Ok(());
            }
            self.ctx.write_fragment(self.ctx.format.begin_pre_line)?;
            self.state = State::Pre;

            if token == Token::Space {
                // one leading space hides a closing fence on this line
                let mut k = self.ctx.src_index;
                while k < self.ctx.src_len && self.src[k] == b' ' {
                    k += 1;
                }
                if k + 3 <= self.ctx.src_len
                    && self.src[k] == b'}'
                    && self.src[k + 1] == b'}'
                    && self.src[k + 2] == b'}'
                {
                    return Ok(());
                }
            }
        }

        match token {
            Token::Char => self.emit_source_char(true)?,
            Token::Space => self.emit_pre_space()?,
            Token::Tab => {
                // expand to the next multiple of the tab width
                loop {
                    self.emit_pre_space()?;
                    if self.ctx.col % TAB_WIDTH == 0 {
                        break;
                    }
                }
            }
            Token::Eol => {
                self.ctx.write_fragment(self.ctx.format.end_pre_line)?;
                self.state = State::PreAfterEol;
            }
            _ => {
                // should never occur in preformatted blocks
                return Err(EngineError::Internal);
            }
        }
        Ok(())
    }

    fn on_heading(&mut self, token: Token, i0: usize) -> EngineResult<()> {
        match token {
            Token::Char => {
                self.hook_char(i0)?;
                self.emit_source_char(false)?;
                self.ctx.check_wordwrap()?;
            }
            Token::Space | Token::Tab => {
                // a single space, unless the line ends here
                if self.ctx.src_index < self.ctx.src_len
                    && !is_eol(self.src[self.ctx.src_index])
                {
                    self.ctx.write_fragment(self.ctx.format.space)?;
                    self.ctx.check_wordwrap()?;
                }
            }
            Token::Heading(_) | Token::Eol => {
                if token != Token::Eol {
                    // trailing `=` run
                    skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
                }
                self.ctx.level = self.heading_level;
                self.flush_style_tags(i0)?;
                self.ctx.write_fragment(self.ctx.format.end_heading)?;
                self.ctx.check_wordwrap()?;
                let level = self.ctx.level;
                self.hook_par(level, 0, false, "=", i0)?;
                self.ctx.level = 0;
                self.state = State::BetweenPar;
            }
            Token::LineBreak => {
                self.ctx.write_fragment(self.ctx.format.line_break)?;
                self.ctx.check_wordwrap()?;
            }
            Token::Style(style) => {
                self.process_style_tag(style, i0)?;
            }
            Token::LinkEnd => {
                self.process_style_tag(Style::Link, i0)?;
            }
            Token::ImageEnd => {
                self.process_style_tag(Style::Image, i0)?;
            }
            Token::LinkBegin | Token::ImageBegin => {
                self.add_link_begin(token == Token::ImageBegin, i0)?;
            }
            Token::Plugin { block, placeholder } => {
                let dest_len0 = self.ctx.dest_len;
                let reparse = self.add_plugin(block, placeholder)?;
                if reparse {
                    self.swap_buffers(dest_len0)?;
                }
            }
            Token::ListItem(_)
            | Token::Definition
            | Token::TableCell
            | Token::TableHeadingCell
            | Token::HorizontalRule
            | Token::PreFence => {
                // should never occur in a heading
                return Err(EngineError::Internal);
            }
        }
        Ok(())
    }

    // ---- shared helpers -------------------------------------------------

    /// Emits the character whose first byte sits just before the cursor,
    /// through the paragraph or preformatted encoder.
    fn emit_source_char(&mut self, pre: bool) -> EngineResult<()> {
        let encoder = if pre {
            self.ctx.format.encode_char_pre
        } else {
            self.ctx.format.encode_char
        };
        let start = self.ctx.src_index - 1;
        match encoder {
            Some(encode) => {
                let len = char_len(&self.src[start..self.ctx.src_len]);
                encode(&self.src[start..start + len], &mut self.ctx)?;
                self.ctx.src_index = start + len;
            }
            None => {
                let b = self.src[start];
                self.ctx.push_raw(b)?;
            }
        }
        Ok(())
    }

    fn emit_pre_space(&mut self) -> EngineResult<()> {
        match self.ctx.format.encode_char_pre {
            Some(encode) => encode(b" ", &mut self.ctx),
            None => self.ctx.push_raw(b' '),
        }
    }

    /// Consumes one CR, LF, or CRLF right after a fence line.
    fn skip_one_eol(&mut self) {
        if self.ctx.src_index < self.ctx.src_len && self.src[self.ctx.src_index] == b'\r' {
            self.ctx.src_index += 1;
        }
        if self.ctx.src_index < self.ctx.src_len && self.src[self.ctx.src_index] == b'\n' {
            self.ctx.src_index += 1;
        }
    }

    // ---- hook plumbing --------------------------------------------------

    pub(crate) fn hook_div(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        src_pos: usize,
    ) -> EngineResult<()> {
        let idx = (src_pos as isize + self.ctx.src_index_offset).max(0) as usize;
        self.hooks
            .division(level, item, enter, markup, idx, &mut self.ctx)
    }

    pub(crate) fn hook_par(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        src_pos: usize,
    ) -> EngineResult<()> {
        let idx = (src_pos as isize + self.ctx.src_index_offset).max(0) as usize;
        self.hooks
            .paragraph(level, item, enter, markup, idx, &mut self.ctx)
    }

    pub(crate) fn hook_span(
        &mut self,
        enter: bool,
        markup: &str,
        src_pos: usize,
    ) -> EngineResult<()> {
        let idx = (src_pos as isize + self.ctx.src_index_offset).max(0) as usize;
        self.hooks
            .span(crate::format::HOOK_LEVEL_SPAN, 0, enter, markup, idx, &mut self.ctx)
    }

    fn hook_char(&mut self, src_pos: usize) -> EngineResult<()> {
        let idx = (src_pos as isize + self.ctx.src_index_offset).max(0) as usize;
        self.hooks.character(idx, &mut self.ctx)
    }
}

/// The source marker string reported to hooks for a list kind.
pub(crate) fn slot_marker_str(slot: ListSlot) -> &'static str {
    match slot {
        ListSlot::Unordered => "*",
        ListSlot::DefinitionTitle | ListSlot::Definition => ";",
        ListSlot::Indented => ":",
        ListSlot::TableCell | ListSlot::TableHeadingCell => "|",
        ListSlot::Ordered(_) => "#",
    }
}
