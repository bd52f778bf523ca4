use creole_engine::{Context, EngineResult, Plugin, PluginCall, PluginOptions};

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    for idx in (0..call.body.len()).rev() {
        ctx.write_text(&call.body[idx..idx + 1])?;
    }
    Ok(())
}

/// `<<reverse ...>>` — emits the body reversed byte for byte; the result is
/// parsed again, so palindromic markup survives the trip.
pub const REVERSE: Plugin = Plugin {
    name: "reverse",
    options: PluginOptions::REPARSE_OUTPUT,
    run,
};
