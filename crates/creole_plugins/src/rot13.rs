use creole_engine::{Context, EngineResult, Plugin, PluginCall, PluginOptions};

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    for &b in call.body {
        let rotated = match b {
            b'a'..=b'm' | b'A'..=b'M' => b + 13,
            b'n'..=b'z' | b'N'..=b'Z' => b - 13,
            _ => b,
        };
        ctx.write_text(&[rotated])?;
    }
    Ok(())
}

/// `<<rot13 ...>>` — ROT-13 of the body, parsed again (rotated text can
/// spell markup).
pub const ROT13: Plugin = Plugin {
    name: "rot13",
    options: PluginOptions::REPARSE_OUTPUT,
    run,
};
