use creole_engine::{Context, EngineResult, Plugin, PluginCall, PluginOptions};

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    for &b in call.body {
        ctx.write_text(&[b.to_ascii_uppercase()])?;
    }
    Ok(())
}

/// `<<uppercase ...>>` — the body with ASCII letters uppercased, parsed
/// again.
pub const UPPERCASE: Plugin = Plugin {
    name: "uppercase",
    options: PluginOptions::REPARSE_OUTPUT,
    run,
};
