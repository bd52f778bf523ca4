//! The context-sensitive, single-token-lookahead reader.
//!
//! Tokenization depends on the block state, the active styles, the list
//! stack, and the option mask, so each call receives a [`LexContext`]
//! snapshot. The reader consumes exactly one token from the source and
//! advances the cursor past it; plain characters are reported as
//! [`Token::Char`] with the character's first byte sitting just before the
//! updated cursor.

use crate::bytes::{is_alphanumeric, is_blank, is_eol, skip_blanks};
use crate::context::{ListSlot, MAX_NESTING};
use crate::options::ProcessOptions;
use crate::parser::State;

/// An inline style span kind. At most one `Link` and one `Image` can be
/// active at a time, bounding the style stack at nine entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Bold,
    Italic,
    Underline,
    Superscript,
    Subscript,
    Monospace,
    Verbatim,
    Link,
    Image,
}

/// Number of distinct styles; the style stack can never grow deeper.
pub(crate) const STYLE_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// Any other character; its first byte is at `cursor - 1`.
    Char,
    Space,
    Tab,
    /// CR, LF, or CRLF.
    Eol,
    /// A run of `=`; the payload is the (clamped) heading level.
    Heading(i32),
    /// Double backslash.
    LineBreak,
    /// `*`, `#`, `;`, or `:` run at the beginning of a line; the payload is
    /// the item nesting depth.
    ListItem(usize),
    /// `:` ending a definition title.
    Definition,
    /// Single pipe.
    TableCell,
    /// Double pipe (`|=`).
    TableHeadingCell,
    HorizontalRule,
    /// `{{{` or `}}}` alone on a line.
    PreFence,
    /// Any doubled style marker, including inline verbatim.
    Style(Style),
    LinkBegin,
    LinkEnd,
    ImageBegin,
    ImageEnd,
    Plugin {
        block: bool,
        placeholder: bool,
    },
}

/// Snapshot of the parser state the reader is sensitive to.
pub(crate) struct LexContext<'x> {
    pub state: State,
    /// True when the topmost active style is inline verbatim.
    pub verbatim: bool,
    pub nesting: usize,
    pub list_num: &'x [ListSlot; MAX_NESTING],
    pub style_stack: &'x [Style],
    pub options: ProcessOptions,
    pub max_heading_level: i32,
    /// Level of the heading currently open, if any.
    pub heading_level: i32,
}

impl LexContext<'_> {
    fn in_style(&self, style: Style) -> bool {
        self.style_stack.contains(&style)
    }

    fn in_pre(&self) -> bool {
        matches!(self.state, State::Pre | State::PreAfterEol)
    }
}

/// Reads one token at `*i`, advancing past it. Returns `None` when a table
/// cell marker ends the input, which terminates the translation loop.
pub(crate) fn next_token(src: &[u8], i: &mut usize, cx: &LexContext) -> Option<Token> {
    let len = src.len();

    // inside a heading, blanks before a trailing `=` run are absorbed here
    if cx.state == State::Heading && is_blank(src[*i]) {
        let mut k = *i;
        skip_blanks(src, &mut k);
        if k < len && src[k] == b'=' {
            let mut p = k + 1;
            while p < len && src[p] == b'=' {
                p += 1;
            }
            skip_blanks(src, &mut p);
            if p >= len || is_eol(src[p]) {
                *i = k;
            }
        }
    }

    match src[*i] {
        b' ' => {
            *i += 1;
            return Some(Token::Space);
        }
        b'\t' => {
            *i += 1;
            return Some(Token::Tab);
        }
        b'\r' => {
            *i += 1;
            if *i < len && src[*i] == b'\n' {
                *i += 1;
            }
            return Some(Token::Eol);
        }
        b'\n' => {
            *i += 1;
            return Some(Token::Eol);
        }
        b'\\' => {
            if !cx.verbatim
                && matches!(
                    cx.state,
                    State::Par | State::Heading | State::BetweenPar | State::ParAfterEol
                )
                && *i + 1 < len
                && src[*i + 1] == b'\\'
            {
                *i += 2;
                skip_blanks(src, i);
                return Some(Token::LineBreak);
            }
        }
        b'=' => {
            if cx.state != State::Par && !cx.in_pre() && !cx.verbatim {
                if cx.state == State::Heading {
                    // only a trailing run (blanks then eol) ends the heading
                    let mut k = *i;
                    while k < len && src[k] == b'=' {
                        k += 1;
                    }
                    skip_blanks(src, &mut k);
                    if k < len && !is_eol(src[k]) {
                        // not trailing, plain character
                    } else {
                        while *i < len && src[*i] == b'=' {
                            *i += 1;
                        }
                        return Some(Token::Heading(cx.heading_level));
                    }
                } else {
                    let mut level = 0i32;
                    while *i < len && src[*i] == b'=' {
                        *i += 1;
                        level += 1;
                    }
                    if cx.options.contains(ProcessOptions::NO_H1) && level == 1 {
                        level = 2;
                    }
                    if level > cx.max_heading_level {
                        level = cx.max_heading_level;
                    }
                    return Some(Token::Heading(level));
                }
            }
        }
        c @ (b'*' | b'#') => {
            if !cx.verbatim {
                let style_opt = if c == b'*' {
                    ProcessOptions::NO_BOLD
                } else {
                    ProcessOptions::NO_MONOSPACE
                };
                match cx.state {
                    State::Par | State::Heading => {
                        if *i + 1 < len && src[*i + 1] == c && !cx.options.contains(style_opt) {
                            *i += 2;
                            return Some(Token::Style(if c == b'*' {
                                Style::Bold
                            } else {
                                Style::Monospace
                            }));
                        }
                    }
                    State::BetweenPar | State::ParAfterEol => {
                        // a marker compatible with the open lists starts an
                        // item; a doubled marker deeper than the list stack
                        // reads as a style toggle instead
                        let top_matches = cx.nesting > 0
                            && c == if cx.list_num[0] == ListSlot::Unordered {
                                b'*'
                            } else {
                                b'#'
                            };
                        let second_ok = cx.nesting == 1
                            || *i + 1 >= len
                            || src[*i + 1] != c
                            || if c == b'*' {
                                cx.options.contains(ProcessOptions::NO_BOLD)
                                    || cx.list_num[1] == ListSlot::Unordered
                            } else {
                                cx.options.contains(ProcessOptions::NO_MONOSPACE)
                                    || matches!(cx.list_num[1], ListSlot::Ordered(_))
                            };
                        if cx.nesting == 0 || (top_matches && second_ok) {
                            let doubled = *i + 1 < len && src[*i + 1] == c;
                            if !doubled
                                || (cx.nesting > 0 && *i + 2 < len)
                                || cx.options.contains(style_opt)
                            {
                                return Some(read_list_item(src, i, cx));
                            }
                        }
                        if *i + 1 < len && src[*i + 1] == c {
                            *i += 2;
                            return Some(Token::Style(if c == b'*' {
                                Style::Bold
                            } else {
                                Style::Monospace
                            }));
                        }
                    }
                    _ => {}
                }
            }
        }
        c @ (b'/' | b'_' | b'^' | b',') => {
            // `scheme://` in running text: the slash after `:` does not
            // toggle italic when two bytes later is still non-blank
            let url_slash = c == b'/'
                && *i >= 2
                && src[*i - 1] == b':'
                && (is_alphanumeric(src[*i - 2])
                    || src[*i - 2] == b'+'
                    || src[*i - 2] == b'-'
                    || src[*i - 2] == b'.')
                && *i + 2 < len
                && !is_blank(src[*i + 2])
                && !is_eol(src[*i + 2]);
            let disabled = match c {
                b'/' => cx.options.contains(ProcessOptions::NO_ITALIC),
                b'_' => cx.options.contains(ProcessOptions::NO_UNDERLINE),
                _ => cx.options.contains(ProcessOptions::NO_SUB_SUPERSCRIPT),
            };
            if !url_slash
                && !cx.verbatim
                && !disabled
                && matches!(
                    cx.state,
                    State::Par | State::Heading | State::BetweenPar | State::ParAfterEol
                )
                && *i + 1 < len
                && src[*i + 1] == c
            {
                *i += 2;
                return Some(Token::Style(match c {
                    b'/' => Style::Italic,
                    b'^' => Style::Superscript,
                    b',' => Style::Subscript,
                    _ => Style::Underline,
                }));
            }
        }
        b';' => {
            if !cx.verbatim
                && !cx.options.contains(ProcessOptions::NO_DL)
                && matches!(cx.state, State::BetweenPar | State::ParAfterEol)
                && (cx.nesting == 0 || cx.list_num[0].is_definition_kind())
            {
                return Some(read_list_item(src, i, cx));
            }
        }
        b':' => match cx.state {
            State::Par => {
                if !cx.verbatim
                    && cx.nesting > 0
                    && cx.list_num[cx.nesting - 1] == ListSlot::DefinitionTitle
                {
                    *i += 1;
                    skip_blanks(src, i);
                    return Some(Token::Definition);
                }
            }
            State::ParAfterEol | State::BetweenPar => {
                if cx.state == State::ParAfterEol {
                    let continues = cx.nesting == 0
                        || cx.list_num[0].is_definition_kind()
                        || cx.list_num[0] == ListSlot::Indented;
                    if cx.verbatim || !continues {
                        // plain character
                        *i += 1;
                        return Some(Token::Char);
                    }
                    if cx.nesting > 0 && cx.list_num[0] != ListSlot::Indented {
                        // definition
                        return Some(read_list_item(src, i, cx));
                    }
                }
                if !cx.options.contains(ProcessOptions::NO_INDENTED_PAR) {
                    let mut item_nesting = 0usize;
                    while *i < len && src[*i] == b':' {
                        *i += 1;
                        item_nesting += 1;
                    }
                    return Some(Token::ListItem(item_nesting.min(MAX_NESTING)));
                }
            }
            _ => {}
        },
        b'|' => {
            if !cx.verbatim && !cx.options.contains(ProcessOptions::NO_TABLE) {
                let in_table_par = cx.state == State::Par
                    && cx.nesting > 0
                    && cx.list_num[cx.nesting - 1].is_table();
                if in_table_par || matches!(cx.state, State::ParAfterEol | State::BetweenPar) {
                    let token = if *i + 1 < len && src[*i + 1] == b'=' {
                        *i += 2;
                        Token::TableHeadingCell
                    } else {
                        *i += 1;
                        Token::TableCell
                    };
                    skip_blanks(src, i);
                    if cx.state == State::Par {
                        if *i >= len {
                            // nothing more on the line: ignore
                            return None;
                        }
                        if is_eol(src[*i]) {
                            *i += 1;
                            if src[*i - 1] == b'\r' && *i < len && src[*i] == b'\n' {
                                *i += 1;
                            }
                            return Some(Token::Eol);
                        }
                    }
                    return Some(token);
                }
            }
        }
        c @ (b'}' | b'{') => {
            if c == b'}'
                && !cx.options.contains(ProcessOptions::NO_IMAGE)
                && !cx.verbatim
                && *i + 1 < len
                && src[*i + 1] == b'}'
                && cx.in_style(Style::Image)
                && !cx.in_pre()
            {
                *i += 2;
                return Some(Token::ImageEnd);
            }
            if *i + 2 >= len || src[*i + 1] != c || src[*i + 2] != c {
                // not a triple; maybe an image opener
                if !cx.options.contains(ProcessOptions::NO_IMAGE)
                    && !cx.verbatim
                    && *i + 1 < len
                    && src[*i + 1] == b'{'
                    && !cx.in_style(Style::Image)
                    && !cx.in_pre()
                {
                    *i += 2;
                    return Some(Token::ImageBegin);
                }
            } else if !(c == b'}' && *i + 3 < len && src[*i + 3] == b'}') {
                // (a `}` right before `}}}` stays inside the verbatim text,
                // letting `}}}}` quote a closing fence)
                match cx.state {
                    State::Par | State::Heading => {
                        let wrong_way = if cx.verbatim { c == b'{' } else { c == b'}' };
                        if !wrong_way {
                            *i += 3;
                            return Some(Token::Style(Style::Verbatim));
                        }
                    }
                    State::BetweenPar | State::ParAfterEol => {
                        // a fence has nothing else on its line
                        let mut k = *i + 3;
                        skip_blanks(src, &mut k);
                        let token = if k < len && !is_eol(src[k]) {
                            Token::Style(Style::Verbatim)
                        } else {
                            Token::PreFence
                        };
                        *i += 3;
                        return Some(token);
                    }
                    State::PreAfterEol => {
                        if c == b'}' {
                            *i += 3;
                            return Some(Token::PreFence);
                        }
                    }
                    State::Pre => {}
                }
            }
        }
        c @ (b'[' | b']') => {
            let closing_without_link = c == b']' && !cx.in_style(Style::Link);
            if !closing_without_link
                && !cx.verbatim
                && !cx.options.contains(ProcessOptions::NO_LINK)
                && matches!(
                    cx.state,
                    State::Par | State::Heading | State::BetweenPar | State::ParAfterEol
                )
                && *i + 1 < len
                && src[*i + 1] == c
            {
                *i += 2;
                return Some(if c == b'[' {
                    Token::LinkBegin
                } else {
                    Token::LinkEnd
                });
            }
        }
        b'<' => {
            if !cx.verbatim
                && !cx.options.contains(ProcessOptions::NO_PLUGIN)
                && !cx.in_pre()
                && *i + 2 < len
                && src[*i + 1] == b'<'
            {
                let placeholder = src[*i + 2] == b'<';
                *i += if placeholder { 3 } else { 2 };
                let mut block = false;
                if matches!(cx.state, State::BetweenPar | State::ParAfterEol) {
                    // opener alone on its line selects the block form
                    let mut k = *i;
                    skip_blanks(src, &mut k);
                    if k >= len || is_eol(src[k]) {
                        block = true;
                    }
                }
                return Some(Token::Plugin { block, placeholder });
            }
        }
        b'-' => {
            if !cx.options.contains(ProcessOptions::NO_HRULE)
                && matches!(cx.state, State::BetweenPar | State::ParAfterEol)
                && *i + 3 < len
                && src[*i + 1] == b'-'
                && src[*i + 2] == b'-'
                && src[*i + 3] == b'-'
            {
                while *i < len && src[*i] == b'-' {
                    *i += 1;
                }
                return Some(Token::HorizontalRule);
            }
        }
        b'~' => {
            // escape: the next non-blank character is plain text
            if !cx.verbatim
                && !cx.options.contains(ProcessOptions::NO_ESCAPE)
                && !cx.in_pre()
                && *i + 1 < len
                && !is_eol(src[*i + 1])
                && !is_blank(src[*i + 1])
            {
                *i += 2;
                return Some(Token::Char);
            }
        }
        _ => {}
    }

    *i += 1;
    Some(Token::Char)
}

/// Reads a run of list markers that is prefix-compatible with the open list
/// stack; an incompatible marker ends the run. A trailing `:` marks a
/// definition body.
fn read_list_item(src: &[u8], i: &mut usize, cx: &LexContext) -> Token {
    let len = src.len();
    let mut item_nesting = 0usize;
    while *i < len {
        let c = src[*i];
        let is_marker =
            c == b'*' || c == b'#' || c == b';' || (c == b':' && item_nesting < cx.nesting);
        if !is_marker {
            break;
        }
        if item_nesting < cx.nesting {
            let compatible = match cx.list_num[item_nesting] {
                ListSlot::Unordered => c == b'*',
                ListSlot::DefinitionTitle | ListSlot::Definition => c == b';' || c == b':',
                _ => c == b'#',
            };
            if !compatible {
                break;
            }
        }
        *i += 1;
        item_nesting += 1;
    }
    let item_nesting = item_nesting.min(MAX_NESTING);
    if src[*i - 1] == b':' {
        Token::Definition
    } else {
        Token::ListItem(item_nesting)
    }
}
