//! Automatic link recognition: bare URLs and CamelCase wiki words become
//! `[[...]]` markup without the double-bracket syntax. Both converters only
//! fire right after whitespace (or at the very start of the input), so text
//! inside existing markup is left alone.

use creole_engine::{Context, EngineResult};

/// Whitespace in the autoconvert sense, line ends included.
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Finds the word start when the cursor sits on the separator before it.
/// Returns `None` when the cursor is in the middle of running text.
fn word_start(src: &[u8], i: usize) -> Option<usize> {
    if i >= src.len() {
        None
    } else if i == 0 {
        Some(if is_separator(src[0]) { 1 } else { 0 })
    } else if is_separator(src[i]) {
        Some(i + 1)
    } else {
        None
    }
}

/// Converts a CamelCase word (a lowercase letter followed by an uppercase
/// one somewhere inside) into a link to the page of that name.
pub fn convert_camel_case(src: &[u8], cursor: &mut usize, ctx: &mut Context) -> EngineResult<bool> {
    let i = *cursor;
    let Some(start) = word_start(src, i) else {
        return Ok(false);
    };
    if start >= src.len() || !is_alpha(src[start]) {
        return Ok(false);
    }
    let mut j = 1;
    while start + j < src.len() && is_alpha(src[start + j]) {
        if src[start + j] <= b'Z' && src[start + j - 1] >= b'a' {
            // lowercase followed by uppercase: a wiki word
            while start + j < src.len() && is_alpha(src[start + j]) {
                j += 1;
            }
            ctx.write_text(&src[i..start])?;
            ctx.write_text(b"[[")?;
            ctx.write_text(&src[start..start + j])?;
            ctx.write_text(b"]]")?;
            *cursor = start + j;
            return Ok(true);
        }
        j += 1;
    }
    Ok(false)
}

static URL_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "mailto:"];

/// Punctuation that ends a sentence rather than a URL.
static TRAILING_PUNCTUATION: &[u8] = b",.?!:;'";

/// Converts a bare URL with a known scheme into a link.
pub fn convert_url(src: &[u8], cursor: &mut usize, ctx: &mut Context) -> EngineResult<bool> {
    let i = *cursor;
    let Some(start) = word_start(src, i) else {
        return Ok(false);
    };
    for prefix in URL_PREFIXES {
        let prefix = prefix.as_bytes();
        if !src[start.min(src.len())..].starts_with(prefix) {
            continue;
        }
        // the URL runs to the next blank, control character, or quote
        let mut end = start + prefix.len();
        while end < src.len() && src[end] != b'"' && src[end] > b' ' {
            end += 1;
        }
        if end == start + prefix.len() {
            // nothing more than the scheme
            continue;
        }
        let mut end = end;
        if TRAILING_PUNCTUATION.contains(&src[end - 1]) {
            end -= 1;
        }
        ctx.write_text(&src[i..start])?;
        ctx.write_text(b"[[")?;
        ctx.write_text(&src[start..end])?;
        ctx.write_text(b"]]")?;
        *cursor = end;
        return Ok(true);
    }
    Ok(false)
}
