//! Plugin and autoconvert dispatch, and the buffer-swap protocol that lets
//! emitted replacement text be parsed again.

use crate::bytes::{is_blank, is_eol, is_first_utf8_byte, skip_blanks};
use crate::error::{EngineError, EngineResult};
use crate::format::{Plugin, PluginCall};
use crate::options::{PluginOptions, ProcessOptions};
use crate::parser::{Engine, State};

impl<'a, 'h> Engine<'a, 'h> {
    /// Looks up the plugin named right after the opener, without consuming
    /// anything. The state machine needs the entry's options before it
    /// decides how to handle the surrounding paragraph.
    pub(crate) fn find_plugin(&self, placeholder: bool) -> Option<Plugin> {
        let src = &self.src[..self.ctx.src_len];
        let mut i = self.ctx.src_index;
        skip_name_lead(src, &mut i);
        let start = i;
        while i < src.len() && !is_blank(src[i]) && !is_eol(src[i]) && src[i] != b'>' {
            i += 1;
        }
        let name = &src[start..i];
        if name.is_empty() {
            return None;
        }
        self.ctx
            .format
            .plugins
            .iter()
            .find(|p| plugin_matches(p, name, placeholder))
            .copied()
    }

    /// Plugin token handling shared by the in-paragraph states. A plugin
    /// marked between-paragraph closes the current paragraph first; any
    /// other plugin continues it (after an eol, the break collapses to one
    /// space).
    pub(crate) fn plugin_inside_par(
        &mut self,
        block: bool,
        placeholder: bool,
        i0: usize,
        after_eol: bool,
    ) -> EngineResult<()> {
        let found = self.find_plugin(placeholder);
        if found.is_some_and(|p| p.options.contains(PluginOptions::BETWEEN_PAR)) {
            self.flush_style_tags(i0)?;
            self.add_end_par(true)?;
            self.state = State::BetweenPar;
        } else if after_eol {
            self.ctx.write_fragment(self.ctx.format.space)?;
            self.state = State::Par;
        }
        let dest_len0 = self.ctx.dest_len;
        let reparse = self.add_plugin(block, placeholder)?;
        if reparse {
            self.swap_buffers(dest_len0)?;
        }
        Ok(())
    }

    /// Parses a plugin tag (cursor sits right after `<<` or `<<<`), runs the
    /// matching callback, and reports whether its output must be reparsed.
    /// An unknown name consumes the tag and emits nothing.
    pub(crate) fn add_plugin(&mut self, block: bool, placeholder: bool) -> EngineResult<bool> {
        let closer_len = if placeholder { 3 } else { 2 };

        {
            let src = &self.src[..self.ctx.src_len];
            skip_name_lead(src, &mut self.ctx.src_index);
        }
        let name_start = self.ctx.src_index;
        while self.ctx.src_index < self.ctx.src_len {
            let b = self.src[self.ctx.src_index];
            if is_blank(b) || is_eol(b) || b == b'>' {
                break;
            }
            self.ctx.src_index += 1;
        }
        let name_end = self.ctx.src_index;
        skip_blanks(&self.src[..self.ctx.src_len], &mut self.ctx.src_index);
        self.skip_one_eol_bytes();

        let data_start = self.ctx.src_index;
        let data_len = if block {
            self.scan_block_body(data_start, closer_len, placeholder)
        } else {
            self.scan_inline_body(data_start, closer_len, placeholder)
        };

        self.ctx.src_index = data_start + data_len;
        if self.ctx.src_index + closer_len <= self.ctx.src_len {
            self.ctx.src_index += closer_len;
        }

        // block bodies keep their inner newlines but not the final one
        let mut trimmed = data_len;
        if trimmed > 0 && self.src[data_start + trimmed - 1] == b'\n' {
            trimmed -= 1;
        }
        if trimmed > 0 && self.src[data_start + trimmed - 1] == b'\r' {
            trimmed -= 1;
        }

        let name = &self.src[name_start..name_end];
        if name.is_empty() {
            return Ok(false);
        }
        let Some(plugin) = self
            .ctx
            .format
            .plugins
            .iter()
            .find(|p| plugin_matches(p, name, placeholder))
            .copied()
        else {
            return Ok(false);
        };

        let call = PluginCall {
            name: &self.src[name_start..name_end],
            body: &self.src[data_start..data_start + trimmed],
            source: &self.src[..self.ctx.src_len],
        };
        (plugin.run)(&call, &mut self.ctx)?;
        Ok(plugin.options.contains(PluginOptions::REPARSE_OUTPUT))
    }

    /// Body of a block plugin: everything up to a line holding only the
    /// closing brackets (and blanks). Without a closer, the body runs to the
    /// end of the input minus an unfinished closer.
    fn scan_block_body(&self, data_start: usize, closer_len: usize, placeholder: bool) -> usize {
        let hay = &self.src[data_start..self.ctx.src_len];
        // the byte before the body is the opener line's eol, so offset 0 is
        // a line start; every position after an eol byte is a candidate
        let mut ls = 0usize;
        loop {
            if ls + closer_len - 1 < hay.len()
                && hay[ls] == b'>'
                && hay[ls + 1] == b'>'
                && (!placeholder || hay[ls + 2] == b'>')
            {
                let mut j = data_start + ls + closer_len;
                skip_blanks(&self.src[..self.ctx.src_len], &mut j);
                if j >= self.ctx.src_len || is_eol(self.src[j]) {
                    return ls;
                }
            }
            match memchr::memchr2(b'\r', b'\n', &hay[ls..]) {
                Some(p) => ls += p + 1,
                None => return hay.len().saturating_sub(closer_len - 1),
            }
        }
    }

    /// Body of an inline plugin: everything up to the closing brackets on
    /// the same logical run.
    fn scan_inline_body(&self, data_start: usize, closer_len: usize, placeholder: bool) -> usize {
        let hay = &self.src[data_start..self.ctx.src_len];
        let mut p = 0usize;
        loop {
            if p + closer_len - 1 >= hay.len() {
                return hay.len().saturating_sub(closer_len - 1);
            }
            if hay[p] == b'>' && hay[p + 1] == b'>' && (!placeholder || hay[p + 2] == b'>') {
                return p;
            }
            match memchr::memchr(b'>', &hay[p + 1..]) {
                Some(q) => p += q + 1,
                None => return hay.len().saturating_sub(closer_len - 1),
            }
        }
    }

    fn skip_one_eol_bytes(&mut self) {
        if self.ctx.src_index < self.ctx.src_len && self.src[self.ctx.src_index] == b'\r' {
            self.ctx.src_index += 1;
        }
        if self.ctx.src_index < self.ctx.src_len && self.src[self.ctx.src_index] == b'\n' {
            self.ctx.src_index += 1;
        }
    }

    /// Offers the current position to each autoconvert before a token is
    /// read. The first one that consumes input wins; its output is queued
    /// for reparse and protected from further conversion.
    pub(crate) fn try_autoconverts(&mut self) -> EngineResult<()> {
        if matches!(self.state, State::Pre | State::PreAfterEol)
            || self.ctx.src_index < self.no_auto_or_plugin_len
            || self.ctx.options.contains(ProcessOptions::NO_PLUGIN)
            || self.ctx.format.autoconverts.is_empty()
        {
            return Ok(());
        }
        let converts = self.ctx.format.autoconverts;
        for &convert in converts {
            let dest_len0 = self.ctx.dest_len;
            let mut cursor = self.ctx.src_index;
            if convert(&self.src[..self.ctx.src_len], &mut cursor, &mut self.ctx)? {
                self.ctx.src_index = cursor;
                self.no_auto_or_plugin_len = self.ctx.dest_len;
                self.swap_buffers(dest_len0)?;
                break;
            }
        }
        Ok(())
    }

    /// Swaps the roles of the two half-buffers so that
    /// `dest[dest_len0..dest_len]` — text just emitted by a plugin or
    /// autoconvert — becomes the next input:
    ///
    /// 1. the unread source tail moves behind the emitted text,
    /// 2. the destination prefix already processed is mirrored back into the
    ///    old source so both halves agree up to `common_len`,
    /// 3. the halves trade places and the cursors rewind to `dest_len0`.
    ///
    /// Offsets reported to callbacks stay referenced to the original input
    /// via `src_index_offset`.
    pub(crate) fn swap_buffers(&mut self, dest_len0: usize) -> EngineResult<()> {
        let src_len = self.ctx.src_len;
        let src_idx = self.ctx.src_index;
        let dest_len = self.ctx.dest_len;

        if src_len + dest_len - src_idx > self.ctx.buf_size || dest_len0 > self.ctx.buf_size {
            return Err(EngineError::NotEnoughMemory);
        }

        // the emitted region leaves the output; its code units go with it
        let moved_ucs16 = self.ctx.dest[dest_len0..dest_len]
            .iter()
            .filter(|&&b| is_first_utf8_byte(b))
            .count();
        self.ctx.dest_len_ucs16 -= moved_ucs16;

        let tail = src_len - src_idx;
        self.ctx.dest[dest_len..dest_len + tail].copy_from_slice(&self.src[src_idx..src_len]);
        if dest_len0 > self.common_len {
            self.src[self.common_len..dest_len0]
                .copy_from_slice(&self.ctx.dest[self.common_len..dest_len0]);
        }

        self.common_len = dest_len0;
        self.ctx.src_len = src_len + dest_len - src_idx;
        self.ctx.src_index_offset -= dest_len as isize - src_idx as isize;
        self.ctx.src_index = dest_len0;
        self.ctx.dest_len = dest_len0;
        std::mem::swap(&mut self.src, &mut self.ctx.dest);
        self.dest_is_upper = !self.dest_is_upper;
        Ok(())
    }
}

/// Moves `i` to the plugin name: past blanks and, for the block form where
/// the opener stands alone on its line, past that line's end too.
fn skip_name_lead(src: &[u8], i: &mut usize) {
    skip_blanks(src, i);
    if *i < src.len() && src[*i] == b'\r' {
        *i += 1;
    }
    if *i < src.len() && src[*i] == b'\n' {
        *i += 1;
    }
    skip_blanks(src, i);
}

fn plugin_matches(plugin: &Plugin, name: &[u8], placeholder: bool) -> bool {
    placeholder == plugin.options.contains(PluginOptions::TRIPLE_ANGLE_BRACKETS)
        && name.starts_with(plugin.name.as_bytes())
        && (name.len() == plugin.name.len()
            || plugin.options.contains(PluginOptions::PARTIAL_NAME))
}
