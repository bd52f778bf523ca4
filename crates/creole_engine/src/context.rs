//! The per-translation emitter state shared with every callback.
//!
//! A [`Context`] owns the destination half of the arena and everything the
//! template emitter needs: byte and UCS-16 output counters, the current
//! column and indentation, the list stack, and the fragment-expression
//! variables. The source half lives in the engine so that callbacks can
//! receive borrows of source bytes alongside a mutable context without
//! aliasing.

use crate::bytes::{is_blank, is_eol, is_first_utf8_byte};
use crate::error::{EngineError, EngineResult};
use crate::expr::eval_expression;
use crate::format::{OutputFormat, WordwrapPermission};
use crate::options::ProcessOptions;

/// Maximum nesting of lists, definition lists, and tables.
pub const MAX_NESTING: usize = 8;

/// One level of the list stack: an ordered-item counter or one of the
/// unnumbered kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListSlot {
    Ordered(i32),
    Unordered,
    DefinitionTitle,
    Definition,
    Indented,
    TableCell,
    TableHeadingCell,
}

impl ListSlot {
    pub(crate) fn is_table(self) -> bool {
        matches!(self, ListSlot::TableCell | ListSlot::TableHeadingCell)
    }

    pub(crate) fn is_definition_kind(self) -> bool {
        matches!(self, ListSlot::DefinitionTitle | ListSlot::Definition)
    }

    /// The item number exposed to fragment expressions (`i`); 0 for
    /// unnumbered kinds.
    pub(crate) fn item_number(self) -> i32 {
        match self {
            ListSlot::Ordered(n) => n,
            _ => 0,
        }
    }

    /// The source marker character this level answers to.
    pub(crate) fn marker(self) -> u8 {
        match self {
            ListSlot::Unordered => b'*',
            ListSlot::DefinitionTitle => b';',
            ListSlot::Definition | ListSlot::Indented => b':',
            _ => b'#',
        }
    }
}

/// Emitter and expression state for one translation, exposed to plugins,
/// autoconverts, encoders, and hooks.
pub struct Context<'a> {
    pub(crate) dest: &'a mut [u8],
    pub(crate) dest_len: usize,
    /// `dest_len` counted in UCS-16 code units, assuming UTF-8 content.
    pub(crate) dest_len_ucs16: usize,

    /// Read index into the source half.
    pub(crate) src_index: usize,
    /// Length of live source text in the source half.
    pub(crate) src_len: usize,
    /// Correction applied when reporting source offsets to callbacks, so
    /// they stay referenced to the original input across buffer swaps.
    pub(crate) src_index_offset: isize,

    /// Size of each half-buffer.
    pub(crate) buf_size: usize,

    /// Spaces prepended to each new output line.
    pub(crate) current_indent: usize,
    pub(crate) col: usize,

    pub(crate) list_num: [ListSlot; MAX_NESTING],
    /// Live depth of `list_num` (0 outside any list).
    pub(crate) nesting: usize,

    pub(crate) format: &'a OutputFormat<'a>,
    pub(crate) eol: &'a [u8],
    pub(crate) ctrl_char: u8,
    pub(crate) options: ProcessOptions,
    pub(crate) font_size: i32,

    /// Heading, indenting, or list level for fragment expressions (`l`).
    pub(crate) level: i32,
    /// List item number for fragment expressions (`i`).
    pub(crate) item: i32,

    /// Source range of the link or image target under construction.
    pub(crate) link_offset: usize,
    pub(crate) link_length: usize,

    /// True when headings carry cross-reference labels (`x`).
    pub(crate) xref: bool,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        dest: &'a mut [u8],
        format: &'a OutputFormat<'a>,
        eol: &'a [u8],
        options: ProcessOptions,
        font_size: i32,
    ) -> Self {
        let buf_size = dest.len();
        Context {
            dest,
            dest_len: 0,
            dest_len_ucs16: 0,
            src_index: 0,
            src_len: 0,
            src_index_offset: 0,
            buf_size,
            current_indent: 0,
            col: 0,
            list_num: [ListSlot::Ordered(0); MAX_NESTING],
            nesting: 0,
            format,
            eol,
            ctrl_char: format.ctrl_char,
            options,
            font_size: if font_size > 0 {
                font_size
            } else {
                format.def_font_size
            },
            level: 0,
            item: 0,
            link_offset: 0,
            link_length: 0,
            xref: options.contains(ProcessOptions::XREF),
        }
    }

    pub(crate) fn set_context(&mut self, level: i32, item: i32) {
        self.level = level;
        self.item = item.max(0);
    }

    // ---- template emitter ----------------------------------------------

    /// Appends `text` with end-of-line translation but no template
    /// processing. This is the raw emission entry point for plugins and
    /// autoconverts.
    pub fn write_text(&mut self, text: &[u8]) -> EngineResult<()> {
        self.add_string(text, 0)
    }

    /// Appends a fragment, resolving template control sequences with the
    /// format's control character.
    pub fn write_fragment(&mut self, fragment: &str) -> EngineResult<()> {
        self.add_string(fragment.as_bytes(), self.ctrl_char)
    }

    /// Appends a fragment using an explicit control character, for callback
    /// code that templates against a format other than the active one.
    pub fn write_fragment_with(&mut self, fragment: &str, ctrl_char: u8) -> EngineResult<()> {
        self.add_string(fragment.as_bytes(), ctrl_char)
    }

    /// Core emitter: copies `s` to the destination, translating `\n` into
    /// the end-of-line sequence plus indentation and resolving `C{expr}`,
    /// `CC{expr}body CC`, and `CL` control sequences (`C` being `ctrl`;
    /// 0 disables templating). An unterminated control sequence silently
    /// ends the fragment.
    pub(crate) fn add_string(&mut self, s: &[u8], ctrl: u8) -> EngineResult<()> {
        let len = s.len();
        let mut k = 0usize;
        while k < len {
            let extra = if s[k] == b'\n' {
                self.eol.len().saturating_sub(1) + self.current_indent
            } else {
                0
            };
            if self.dest_len + extra >= self.buf_size {
                return Err(EngineError::NotEnoughMemory);
            }
            if s[k] == b'\n' {
                for idx in 0..self.eol.len() {
                    self.dest[self.dest_len] = self.eol[idx];
                    self.dest_len += 1;
                    self.dest_len_ucs16 += 1;
                }
                k += 1;
                for _ in 0..self.current_indent {
                    self.dest[self.dest_len] = b' ';
                    self.dest_len += 1;
                    self.dest_len_ucs16 += 1;
                }
                self.col = self.current_indent;
            } else if ctrl != 0
                && k + 2 < len
                && s[k] == ctrl
                && (s[k + 1] == b'{' || (s[k + 1] == ctrl && s[k + 2] == b'{'))
            {
                let replicate = s[k + 1] == ctrl;
                if replicate {
                    k += 1;
                }
                k += 2;
                let mut expr_len = 0usize;
                while k + expr_len < len && s[k + expr_len] != b'}' {
                    expr_len += 1;
                }
                if k + expr_len >= len {
                    // unterminated expression: drop the rest, not an error
                    return Ok(());
                }
                let result = eval_expression(&s[k..k + expr_len], self);
                k += expr_len + 1;
                if replicate {
                    // body runs to the next doubled control character
                    let mut body_len = 0usize;
                    while k + body_len + 1 < len
                        && !(s[k + body_len] == ctrl && s[k + body_len + 1] == ctrl)
                    {
                        body_len += 1;
                    }
                    // render once (single-level: the body cannot contain
                    // another replication), then copy the rendered bytes
                    let rep_start = self.dest_len;
                    let ucs16_before = self.dest_len_ucs16;
                    let col_before = self.col;
                    self.add_string(&s[k..k + body_len], self.ctrl_char)?;
                    let rep_len = self.dest_len - rep_start;
                    self.dest_len = rep_start;
                    self.dest_len_ucs16 = ucs16_before;
                    self.col = col_before;

                    let count = result.min(100);
                    if count > 0 && rep_start + count as usize * rep_len > self.buf_size {
                        return Err(EngineError::NotEnoughMemory);
                    }
                    for _ in 0..count.max(0) {
                        self.dest
                            .copy_within(rep_start..rep_start + rep_len, self.dest_len);
                        for idx in self.dest_len..self.dest_len + rep_len {
                            if is_first_utf8_byte(self.dest[idx]) {
                                self.dest_len_ucs16 += 1;
                            }
                        }
                        self.dest_len += rep_len;
                        self.col += rep_len;
                    }
                    k += body_len + 2;
                } else {
                    if self.dest_len + 12 > self.buf_size {
                        return Err(EngineError::NotEnoughMemory);
                    }
                    let mut v = result as i64;
                    if v < 0 {
                        self.dest[self.dest_len] = b'-';
                        self.dest_len += 1;
                        self.dest_len_ucs16 += 1;
                        self.col += 1;
                        v = -v;
                    }
                    let mut divisor: i64 = 1_000_000_000;
                    while divisor >= 1 {
                        if v >= divisor || divisor == 1 {
                            self.dest[self.dest_len] = b'0' + ((v / divisor) % 10) as u8;
                            self.dest_len += 1;
                            self.dest_len_ucs16 += 1;
                            self.col += 1;
                        }
                        divisor /= 10;
                    }
                }
            } else if ctrl != 0 && k + 2 < len && s[k] == ctrl && s[k + 1] == b'L' {
                if self.dest_len + MAX_NESTING > self.buf_size {
                    return Err(EngineError::NotEnoughMemory);
                }
                let (markers, count) = self.list_nesting_markers();
                for &m in &markers[..count] {
                    self.dest[self.dest_len] = m;
                    self.dest_len += 1;
                    self.dest_len_ucs16 += 1;
                    self.col += 1;
                }
                k += 2;
            } else {
                if is_first_utf8_byte(s[k]) {
                    self.dest_len_ucs16 += 1;
                }
                self.dest[self.dest_len] = s[k];
                self.dest_len += 1;
                self.col += 1;
                k += 1;
            }
        }
        Ok(())
    }

    /// Appends one byte with no translation at all.
    pub(crate) fn push_raw(&mut self, b: u8) -> EngineResult<()> {
        if self.dest_len >= self.buf_size {
            return Err(EngineError::NotEnoughMemory);
        }
        self.dest[self.dest_len] = b;
        self.dest_len += 1;
        if is_first_utf8_byte(b) {
            self.dest_len_ucs16 += 1;
        }
        self.col += 1;
        Ok(())
    }

    /// Wraps the current output line if it has grown past the format's text
    /// width, inserting the end-of-line sequence plus indent spaces at the
    /// last permitted break point.
    pub(crate) fn check_wordwrap(&mut self) -> EngineResult<()> {
        let Some(width) = self.format.text_width else {
            return Ok(());
        };
        if self.col < width {
            return Ok(());
        }

        // walk back over the current line for a break point
        let mut perm = WordwrapPermission::No;
        let mut at = 0usize;
        let check = self.format.wordwrap_permitted;
        let mut idx = self.dest_len as isize - 1;
        while idx >= 0 && !is_eol(self.dest[idx as usize]) {
            let p = match check {
                Some(f) => f(&self.dest[..self.dest_len], idx as usize),
                None => {
                    if is_blank(self.dest[idx as usize]) {
                        WordwrapPermission::ReplaceChar
                    } else {
                        WordwrapPermission::No
                    }
                }
            };
            if p != WordwrapPermission::No {
                perm = p;
                at = idx as usize;
                break;
            }
            idx -= 1;
        }
        if perm == WordwrapPermission::No {
            return Ok(());
        }

        // room for the end-of-line sequence and indentation
        let dist = (self.eol.len() + self.current_indent)
            .saturating_sub(usize::from(perm == WordwrapPermission::ReplaceChar));
        if dist > 0 {
            if self.dest_len + dist > self.buf_size {
                return Err(EngineError::NotEnoughMemory);
            }
            self.dest.copy_within(at + 1..self.dest_len, at + 1 + dist);
            self.dest_len += dist;
            self.dest_len_ucs16 += dist;
        }

        let mut w = at;
        if perm == WordwrapPermission::Insert {
            // the checked character stays on this line
            w += 1;
        }
        for idx in 0..self.eol.len() {
            self.dest[w] = self.eol[idx];
            w += 1;
        }
        for _ in 0..self.current_indent {
            self.dest[w] = b' ';
            w += 1;
        }
        self.col = self.dest_len - w + self.current_indent;
        Ok(())
    }

    // ---- accessors -----------------------------------------------------

    /// The output produced so far.
    pub fn output(&self) -> &[u8] {
        &self.dest[..self.dest_len]
    }

    /// Current output length in bytes.
    pub fn output_len(&self) -> usize {
        self.dest_len
    }

    /// Current output length in UCS-16 code units, assuming UTF-8 content.
    pub fn output_len_ucs16(&self) -> usize {
        self.dest_len_ucs16
    }

    /// Current read offset, relative to the original input even after
    /// buffer swaps.
    pub fn source_offset(&self) -> usize {
        (self.src_index as isize + self.src_index_offset).max(0) as usize
    }

    /// Offset and length in the original input of the link or image target
    /// currently under construction.
    pub fn current_link(&self) -> (usize, usize) {
        (
            (self.link_offset as isize + self.src_index_offset).max(0) as usize,
            self.link_length,
        )
    }

    /// The current list nesting as the markup characters that opened it.
    pub fn current_list_nesting(&self) -> String {
        let (markers, count) = self.list_nesting_markers();
        markers[..count].iter().map(|&b| b as char).collect()
    }

    pub(crate) fn list_nesting_markers(&self) -> ([u8; MAX_NESTING], usize) {
        let mut markers = [0u8; MAX_NESTING];
        let count = (self.level.max(0) as usize).min(MAX_NESTING);
        for i in 0..count {
            markers[i] = self.list_num[i].marker();
        }
        (markers, count)
    }

    pub fn format(&self) -> &OutputFormat<'a> {
        self.format
    }

    pub fn options(&self) -> ProcessOptions {
        self.options
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn eol(&self) -> &[u8] {
        self.eol
    }

    pub fn ctrl_char(&self) -> u8 {
        self.ctrl_char
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Context;
    use crate::format::OutputFormat;
    use crate::options::ProcessOptions;

    static EMPTY_FORMAT: OutputFormat<'static> = OutputFormat::EMPTY;

    /// Runs `f` with a context over a scratch buffer; level 2, item 3,
    /// font size 12.
    pub(crate) fn with_test_context<R>(f: impl FnOnce(&mut Context) -> R) -> R {
        let mut buf = vec![0u8; 4096];
        let mut ctx = Context::new(&mut buf, &EMPTY_FORMAT, b"\n", ProcessOptions::empty(), 12);
        ctx.level = 2;
        ctx.item = 3;
        f(&mut ctx)
    }

    /// Same, but with a caller-supplied format and buffer size.
    pub(crate) fn with_format_context<R>(
        format: &'static OutputFormat<'static>,
        size: usize,
        f: impl FnOnce(&mut Context) -> R,
    ) -> R {
        let mut buf = vec![0u8; size];
        let mut ctx = Context::new(&mut buf, format, b"\n", ProcessOptions::empty(), 0);
        f(&mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{with_format_context, with_test_context};
    use super::*;

    fn emitted(f: impl FnOnce(&mut Context)) -> String {
        with_test_context(|ctx| {
            f(ctx);
            String::from_utf8_lossy(ctx.output()).into_owned()
        })
    }

    #[test]
    fn plain_copy_and_counters() {
        with_test_context(|ctx| {
            ctx.write_fragment("abc").unwrap();
            assert_eq!(ctx.output(), b"abc");
            assert_eq!(ctx.output_len_ucs16(), 3);
            assert_eq!(ctx.col, 3);
        });
    }

    #[test]
    fn newline_translates_to_eol_and_indent() {
        with_test_context(|ctx| {
            ctx.current_indent = 2;
            ctx.write_fragment("a\nb").unwrap();
            assert_eq!(ctx.output(), b"a\n  b");
            assert_eq!(ctx.col, 3);
        });
    }

    #[test]
    fn decimal_substitution() {
        assert_eq!(emitted(|c| c.write_fragment("%{2+3}pt").unwrap()), "5pt");
        assert_eq!(emitted(|c| c.write_fragment("%{0-42}").unwrap()), "-42");
        assert_eq!(emitted(|c| c.write_fragment("%{3*l-2}").unwrap()), "4");
    }

    #[test]
    fn replication_positive_count() {
        assert_eq!(emitted(|c| c.write_fragment("%%{2+3}-%%").unwrap()), "-----");
        assert_eq!(
            emitted(|c| c.write_fragment("%%{5+6>10}%{5+6}pt%%").unwrap()),
            "11pt"
        );
    }

    #[test]
    fn replication_nonpositive_is_empty() {
        assert_eq!(emitted(|c| c.write_fragment("%%{2>3}foo%%").unwrap()), "");
        assert_eq!(emitted(|c| c.write_fragment("a%%{0-5}x%%b").unwrap()), "ab");
    }

    #[test]
    fn replication_is_capped_at_100() {
        let out = emitted(|c| c.write_fragment("%%{1000}-%%").unwrap());
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn unterminated_expression_drops_rest() {
        assert_eq!(emitted(|c| c.write_fragment("ab%{1+1").unwrap()), "ab");
    }

    #[test]
    fn raw_text_ignores_control_sequences() {
        assert_eq!(
            emitted(|c| c.write_text(b"%{1+1} literal").unwrap()),
            "%{1+1} literal"
        );
    }

    #[test]
    fn ucs16_counts_first_bytes_only() {
        with_test_context(|ctx| {
            ctx.write_text("héllo €".as_bytes()).unwrap();
            assert_eq!(ctx.output_len(), 10);
            assert_eq!(ctx.output_len_ucs16(), 7);
        });
    }

    #[test]
    fn wordwrap_breaks_at_last_blank() {
        static NARROW: OutputFormat<'static> = OutputFormat {
            text_width: Some(10),
            ..OutputFormat::EMPTY
        };
        with_format_context(&NARROW, 256, |ctx| {
            ctx.write_text(b"aaaa bbbb cc").unwrap();
            ctx.check_wordwrap().unwrap();
            assert_eq!(ctx.output(), b"aaaa bbbb\ncc");
            assert_eq!(ctx.col, 2);
        });
    }

    #[test]
    fn out_of_memory_is_reported() {
        static F: OutputFormat<'static> = OutputFormat::EMPTY;
        let mut buf = vec![0u8; 4];
        let mut ctx = Context::new(&mut buf, &F, b"\n", ProcessOptions::empty(), 0);
        assert_eq!(
            ctx.write_text(b"too long"),
            Err(crate::error::EngineError::NotEnoughMemory)
        );
    }
}
