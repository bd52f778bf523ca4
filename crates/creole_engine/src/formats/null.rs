use crate::context::Context;
use crate::error::EngineResult;
use crate::format::OutputFormat;

fn encode_char_null(_ch: &[u8], _ctx: &mut Context) -> EngineResult<()> {
    Ok(())
}

fn encode_url_null(_url: &[u8], _ctx: &mut Context) -> EngineResult<()> {
    Ok(())
}

/// No output at all. Useful with hooks that mine the parse for structure.
pub static NULL_SINK: OutputFormat<'static> = OutputFormat {
    space: "",
    encode_url: Some(encode_url_null),
    encode_char: Some(encode_char_null),
    encode_char_pre: Some(encode_char_null),
    ..OutputFormat::EMPTY
};
