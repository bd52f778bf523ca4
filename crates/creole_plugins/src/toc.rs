//! A table-of-contents plugin for HTML output.
//!
//! The body is `level1 level2 title`. The plugin runs a second translation
//! of the whole document against the null format, with hooks that emit an
//! anchor link for every heading in the level range; everything else
//! produces no output. The listed anchors match the `h<offset>` labels the
//! HTML format emits on headings when the cross-reference option is set.

use crate::num::parse_i32;
use creole_engine::{
    formats::NULL_SINK, translate_to_string_with_hooks, Context, EngineResult, Hooks, Plugin,
    PluginCall, PluginOptions, ProcessOptions,
};

struct TocHooks<'s> {
    /// The document being listed; heading text is copied straight out of it.
    source: &'s [u8],
    level1: i32,
    level2: i32,
    in_heading: bool,
}

impl Hooks for TocHooks<'_> {
    fn paragraph(
        &mut self,
        level: i32,
        item: i32,
        enter: bool,
        markup: &str,
        _src_index: usize,
        ctx: &mut Context,
    ) -> EngineResult<()> {
        if markup != "=" || level < self.level1 || level > self.level2 {
            return Ok(());
        }
        self.in_heading = enter;
        if enter {
            // each entry is indented by its heading depth
            for _ in 0..level {
                ctx.write_text(b"&nbsp;")?;
            }
            // the same offset the HTML format's heading anchor uses
            let anchor = ctx.source_offset();
            ctx.write_text(format!("<a href=\"#h{anchor}\">").as_bytes())?;
            if item > 0 {
                ctx.write_text(format!("{item}. ").as_bytes())?;
            }
        } else {
            ctx.write_text(b"</a><br />\n")?;
        }
        Ok(())
    }

    fn character(&mut self, src_index: usize, ctx: &mut Context) -> EngineResult<()> {
        if !self.in_heading {
            return Ok(());
        }
        if src_index < self.source.len() {
            let mut end = src_index + 1;
            while end < self.source.len() && self.source[end] & 0xc0 == 0x80 {
                end += 1;
            }
            ctx.write_text(&self.source[src_index..end])?;
        }
        Ok(())
    }
}

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    let mut pos = 0usize;
    let level1 = parse_i32(call.body, &mut pos);
    let level2 = parse_i32(call.body, &mut pos);
    if level1 < 1 {
        return Ok(());
    }
    let level2 = level2.max(level1);

    let title = {
        let rest = &call.body[pos.min(call.body.len())..];
        let start = rest
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let end = rest
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(start, |p| p + 1);
        &rest[start..end]
    };

    // the hooks need owned source text: the nested translation swaps its own
    // buffers freely
    let source = String::from_utf8_lossy(call.source).into_owned();
    let mut hooks = TocHooks {
        source: call.source,
        level1,
        level2,
        in_heading: false,
    };
    let listing = translate_to_string_with_hooks(
        &source,
        ctx.options() | ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &NULL_SINK,
        ctx.font_size(),
        &mut hooks,
    )?;

    if !title.is_empty() {
        ctx.write_fragment_with("<h2%%{s>0} style=\"font-size:%{2*s}pt\"%%>", b'%')?;
        ctx.write_text(title)?;
        ctx.write_fragment_with("</h2>\n", b'%')?;
    }
    ctx.write_fragment_with("<p%%{s>0} style=\"font-size:%{s}pt\"%%>\n", b'%')?;
    ctx.write_text(listing.as_bytes())?;
    ctx.write_fragment_with("</p>\n", b'%')?;
    Ok(())
}

/// `<<toc level1 level2 title>>` — an HTML table of contents for the whole
/// document, linking to the heading anchors of the cross-reference option.
pub const TOC: Plugin = Plugin {
    name: "toc",
    options: PluginOptions::BETWEEN_PAR,
    run,
};
