use creole_engine::{Context, EngineResult, Plugin, PluginCall, PluginOptions};

fn run(call: &PluginCall<'_>, ctx: &mut Context) -> EngineResult<()> {
    ctx.write_text(call.body)
}

/// `<<raw ...>>` — passes the body through untouched (end-of-line
/// translation aside), dodging both markup recognition and the character
/// encoder.
pub const RAW: Plugin = Plugin {
    name: "raw",
    options: PluginOptions::empty(),
    run,
};
