//! A streaming translator for Creole-style wiki markup.
//!
//! The engine makes a single pass over its input and substitutes configured
//! fragment strings at each parser event; no syntax tree is ever built. The
//! target is described entirely by an [`OutputFormat`] value — bundled
//! descriptors cover HTML, RTF, LaTeX, man, plain text, a null sink, and
//! round-trip creole output — and plugins, autoconverts, and hooks extend
//! the pipeline through the same emitter the engine itself uses.
//!
//! Translation happens inside a caller-provided arena split into two
//! half-buffers, so replacement text produced by plugins can be swapped back
//! into the input and parsed again without further allocation:
//!
//! ```no_run
//! use creole_engine::{formats, translate, ProcessOptions};
//!
//! let input = b"=Title=\nHello **world**.\n";
//! let mut arena = vec![0u8; input.len() * 4];
//! let rendered = translate(
//!     input,
//!     &mut arena,
//!     ProcessOptions::empty(),
//!     "\n",
//!     &formats::HTML,
//!     0,
//! )
//! .unwrap();
//! let html = rendered.slice(&arena);
//! ```
//!
//! [`translate_to_string`] wraps the grow-and-retry loop for callers that
//! just want a `String`.

pub use context::{Context, MAX_NESTING};
pub use error::{EngineError, EngineResult};
pub use format::{
    AutoconvertFn, EncodeCharFn, EncodeUrlFn, GetVarFn, Hooks, Interwiki, NoHooks, OutputFormat,
    Plugin, PluginCall, PluginFn, WordwrapCheckFn, WordwrapPermission, HOOK_LEVEL_PAR,
    HOOK_LEVEL_SPAN,
};
pub use options::{PluginOptions, ProcessOptions};
pub use parser::{translate, translate_with_hooks, Rendered};

mod bytes;
mod context;
mod error;
mod expr;
mod format;
pub mod formats;
mod lexer;
mod options;
mod parser;

/// Arenas stop growing past this size; a translation that still does not
/// fit reports `NotEnoughMemory` to the caller.
const MAX_ARENA_SIZE: usize = 1 << 26;

/// Translates with an internally managed arena, growing it until the output
/// fits, and returns the result as an owned string.
pub fn translate_to_string(
    input: &str,
    options: ProcessOptions,
    eol: &str,
    format: &OutputFormat,
    font_size: i32,
) -> EngineResult<String> {
    translate_to_string_with_hooks(input, options, eol, format, font_size, &mut NoHooks)
}

/// [`translate_to_string`], with construct hooks invoked along the way.
pub fn translate_to_string_with_hooks(
    input: &str,
    options: ProcessOptions,
    eol: &str,
    format: &OutputFormat,
    font_size: i32,
    hooks: &mut dyn Hooks,
) -> EngineResult<String> {
    let mut size = (2 * input.len()).max(1024);
    loop {
        let mut arena = vec![0u8; size];
        match translate_with_hooks(
            input.as_bytes(),
            &mut arena,
            options,
            eol,
            format,
            font_size,
            hooks,
        ) {
            Ok(rendered) => {
                return Ok(String::from_utf8_lossy(rendered.slice(&arena)).into_owned())
            }
            Err(EngineError::NotEnoughMemory) if size < MAX_ARENA_SIZE => size *= 2,
            Err(err) => return Err(err),
        }
    }
}
