//! The style-span controller: the stack of active inline styles, the
//! mis-nesting repair rule, and link/image target emission.

use crate::bytes::{is_blank, is_eol, skip_blanks};
use crate::error::{EngineError, EngineResult};
use crate::lexer::Style;
use crate::options::ProcessOptions;
use crate::parser::Engine;

/// The source marker string reported to span hooks, or `None` for verbatim
/// (which has no hook identity).
fn style_marker(style: Style) -> Option<&'static str> {
    match style {
        Style::Bold => Some("**"),
        Style::Italic => Some("//"),
        Style::Underline => Some("__"),
        Style::Superscript => Some("^^"),
        Style::Subscript => Some(",,"),
        Style::Monospace => Some("##"),
        Style::Link => Some("[["),
        Style::Image => Some("{{"),
        Style::Verbatim => None,
    }
}

impl<'a, 'h> Engine<'a, 'h> {
    fn stack_contains(&self, style: Style) -> bool {
        self.style_stack[..self.style_nesting].contains(&style)
    }

    fn stack_position(&self, style: Style) -> Option<usize> {
        self.style_stack[..self.style_nesting]
            .iter()
            .position(|&s| s == style)
    }

    /// True when a verbatim span's begin/end fragments are suppressed: the
    /// span only renders as monospace when the option asks for it and no
    /// monospace span is already active.
    fn verbatim_is_silent(&self, style: Style) -> bool {
        style == Style::Verbatim
            && !(self.ctx.options.contains(ProcessOptions::VERBATIM_MONO)
                && !self.stack_contains(Style::Monospace))
    }

    fn begin_fragment_for(&self, style: Style) -> &'a str {
        match style {
            Style::Bold => self.ctx.format.begin_bold,
            Style::Italic => self.ctx.format.begin_italic,
            Style::Underline => self.ctx.format.begin_underline,
            Style::Superscript => self.ctx.format.begin_superscript,
            Style::Subscript => self.ctx.format.begin_subscript,
            _ => self.ctx.format.begin_code,
        }
    }

    fn end_fragment_for(&self, style: Style) -> &'a str {
        match style {
            Style::Bold => self.ctx.format.end_bold,
            Style::Italic => self.ctx.format.end_italic,
            Style::Underline => self.ctx.format.end_underline,
            Style::Superscript => self.ctx.format.end_superscript,
            Style::Subscript => self.ctx.format.end_subscript,
            Style::Link => self.ctx.format.end_link,
            Style::Image => self.ctx.format.end_image,
            _ => self.ctx.format.end_code,
        }
    }

    fn hook_span_for(&mut self, enter: bool, style: Style, i0: usize) -> EngineResult<()> {
        if let Some(marker) = style_marker(style) {
            self.hook_span(enter, marker, i0)?;
        }
        Ok(())
    }

    /// Writes the end of one span, including the deferred target of a link
    /// or image whose format puts the URL after the separator.
    fn close_span(&mut self, style: Style, i0: usize) -> EngineResult<()> {
        if style == Style::Link
            && self.ctx.format.sep_link.is_some()
            && self.ctx.format.link_after_sep
        {
            let sep = self.ctx.format.sep_link.unwrap_or_default();
            self.ctx.write_fragment(sep)?;
            self.add_link()?;
            self.ctx.check_wordwrap()?;
        } else if style == Style::Image
            && self.ctx.format.sep_image.is_some()
            && self.ctx.format.image_after_sep
        {
            let sep = self.ctx.format.sep_image.unwrap_or_default();
            self.ctx.write_fragment(sep)?;
            self.add_link()?;
            self.ctx.check_wordwrap()?;
        }

        self.ctx.write_fragment(self.end_fragment_for(style))?;
        self.ctx.check_wordwrap()?;
        self.hook_span_for(false, style, i0)
    }

    /// Handles one style marker: opens the style if it is not active, or
    /// closes it along with every style stacked above it — the mis-nesting
    /// repair. Styles closed on the way down (except links and images) are
    /// reopened afterwards so the output stays properly nested.
    pub(crate) fn process_style_tag(&mut self, style: Style, i0: usize) -> EngineResult<()> {
        if let Some(found) = self.stack_position(style) {
            // close everything above the match, then the match itself
            for j in (found..self.style_nesting).rev() {
                let closing = self.style_stack[j];
                if !self.verbatim_is_silent(closing) {
                    self.close_span(closing, i0)?;
                }
            }
            // reopen the overlapped styles; links and images stay closed
            let mut keep = found;
            for j in found + 1..self.style_nesting {
                let reopening = self.style_stack[j];
                if reopening == Style::Link || reopening == Style::Image {
                    continue;
                }
                self.hook_span_for(true, reopening, i0)?;
                self.style_stack[keep] = reopening;
                if reopening != Style::Verbatim {
                    self.ctx.write_fragment(self.begin_fragment_for(reopening))?;
                    self.ctx.check_wordwrap()?;
                }
                keep += 1;
            }
            self.style_nesting = keep;
            return Ok(());
        }

        // not active: open it, unless styles are ignored here
        if style == Style::Link
            || style == Style::Image
            || (self.ctx.format.no_style_in_alt && self.stack_contains(Style::Image))
        {
            return Ok(());
        }
        self.style_stack[self.style_nesting] = style;
        self.style_nesting += 1;

        if self.verbatim_is_silent(style) {
            return Ok(());
        }
        self.hook_span_for(true, style, i0)?;
        self.ctx.write_fragment(self.begin_fragment_for(style))?;
        self.ctx.check_wordwrap()
    }

    /// Closes every active style, in stack order. Used at paragraph ends;
    /// nothing is reopened.
    pub(crate) fn flush_style_tags(&mut self, i0: usize) -> EngineResult<()> {
        for j in (0..self.style_nesting).rev() {
            let closing = self.style_stack[j];
            if !self.verbatim_is_silent(closing) {
                self.close_span(closing, i0)?;
            }
        }
        self.style_nesting = 0;
        Ok(())
    }

    /// Parses the target of `[[` or `{{` and leaves the cursor at the link
    /// text. The target's source range is stored in the context before any
    /// text is parsed, so hooks and URL encoders can read it.
    pub(crate) fn add_link_begin(&mut self, is_image: bool, i0: usize) -> EngineResult<()> {
        // a link cannot nest in a link, nor anything in an image
        for j in 0..self.style_nesting {
            let active = self.style_stack[j];
            if (active == Style::Link && !is_image) || active == Style::Image {
                return Ok(());
            }
        }

        let src = &self.src[..self.ctx.src_len];
        skip_blanks(src, &mut self.ctx.src_index);

        // the target runs to `|`, the matching closer, or a blank line
        let closer = if is_image { b'}' } else { b']' };
        let mut j = self.ctx.src_index;
        while j < src.len() {
            let b = src[j];
            if b == b'|' {
                break;
            }
            if is_eol(b) {
                let crlf = b == b'\r' && j + 1 < src.len() && src[j + 1] == b'\n';
                if j + 1 >= src.len() || (is_eol(src[j + 1]) && !crlf) {
                    break;
                }
                j += 1;
                continue;
            }
            if b == closer && j + 1 < src.len() && src[j + 1] == closer {
                break;
            }
            j += 1;
        }

        // drop trailing blanks and line ends from the target
        let mut k = j;
        while k > self.ctx.src_index && (is_blank(src[k - 1]) || is_eol(src[k - 1])) {
            k -= 1;
        }
        if k <= self.ctx.src_index {
            // no target at all
            self.ctx.src_index = j;
            return Ok(());
        }

        self.ctx.link_offset = self.ctx.src_index;
        self.ctx.link_length = k - self.ctx.src_index;

        self.hook_span(true, if is_image { "{{" } else { "[[" }, i0)?;

        let sep = if is_image {
            self.ctx.format.sep_image
        } else {
            self.ctx.format.sep_link
        };
        if let Some(sep) = sep {
            self.ctx.write_fragment(if is_image {
                self.ctx.format.begin_image
            } else {
                self.ctx.format.begin_link
            })?;
            self.ctx.check_wordwrap()?;
            let after_sep = if is_image {
                self.ctx.format.image_after_sep
            } else {
                self.ctx.format.link_after_sep
            };
            if !after_sep {
                self.add_link()?;
                self.ctx.write_fragment(sep)?;
                self.ctx.check_wordwrap()?;
            }
        }

        // move on to the link text or alt text, if any
        if j < self.ctx.src_len && self.src[j] == b'|' {
            self.ctx.src_index = j + 1;
            skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
        }

        self.style_stack[self.style_nesting] = if is_image { Style::Image } else { Style::Link };
        self.style_nesting += 1;
        Ok(())
    }

    /// Writes the stored link target, expanding the longest matching
    /// interwiki alias and passing the remainder through the URL encoder.
    pub(crate) fn add_link(&mut self) -> EngineResult<()> {
        let mut offset = self.ctx.link_offset;
        let mut length = self.ctx.link_length;

        let mut best: Option<&crate::format::Interwiki> = None;
        for iw in self.ctx.format.interwikis {
            let alias = iw.alias.as_bytes();
            if alias.len() <= length
                && &self.src[offset..offset + alias.len()] == alias
                && best.map_or(true, |b| alias.len() > b.alias.len())
            {
                best = Some(iw);
            }
        }
        if let Some(iw) = best {
            let prefix = iw.url_prefix;
            let skip = iw.alias.len();
            self.ctx.write_fragment(prefix)?;
            self.ctx.check_wordwrap()?;
            offset += skip;
            length -= skip;
        }

        match self.ctx.format.encode_url {
            Some(encode) => encode(&self.src[offset..offset + length], &mut self.ctx)?,
            None => {
                if self.ctx.dest_len + length > self.ctx.buf_size {
                    return Err(EngineError::NotEnoughMemory);
                }
                for idx in offset..offset + length {
                    let b = self.src[idx];
                    self.ctx.dest[self.ctx.dest_len] = b;
                    self.ctx.dest_len += 1;
                    if crate::bytes::is_first_utf8_byte(b) {
                        self.ctx.dest_len_ucs16 += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
