//! The bundled output-format descriptors.
//!
//! Each descriptor is a complete, static parameterization of a target; the
//! fragment strings and encoders fully determine the output, byte for byte.

use crate::context::Context;
use crate::error::EngineResult;

mod creole;
mod html;
mod latex;
mod man;
mod null;
mod rtf;
mod text;

pub use creole::CREOLE;
pub use html::HTML;
pub use latex::LATEX;
pub use man::MAN;
pub use null::NULL_SINK;
pub use rtf::RTF;
pub use text::{TEXT, TEXT_COMPACT};

/// Character encoder over a substitution table: listed characters are
/// replaced by their strings, everything else is copied unchanged.
pub(crate) fn encode_with_dict(
    dict: &[(u8, &str)],
    ch: &[u8],
    ctx: &mut Context,
) -> EngineResult<()> {
    for &(c, replacement) in dict {
        if ch[0] == c {
            return ctx.write_fragment(replacement);
        }
    }
    ctx.write_text(ch)
}
