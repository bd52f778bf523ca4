use creole_engine::{
    formats, translate_with_hooks, Context, EngineResult, Hooks, ProcessOptions,
};

/// Records every hook invocation as `(kind, level, enter, markup)`;
/// character hooks record their source offset in `level`.
#[derive(Default)]
struct Recorder {
    events: Vec<(&'static str, i32, bool, String)>,
}

impl Hooks for Recorder {
    fn division(
        &mut self,
        level: i32,
        _item: i32,
        enter: bool,
        markup: &str,
        _src_index: usize,
        _ctx: &mut Context,
    ) -> EngineResult<()> {
        self.events.push(("div", level, enter, markup.into()));
        Ok(())
    }

    fn paragraph(
        &mut self,
        level: i32,
        _item: i32,
        enter: bool,
        markup: &str,
        _src_index: usize,
        _ctx: &mut Context,
    ) -> EngineResult<()> {
        self.events.push(("par", level, enter, markup.into()));
        Ok(())
    }

    fn span(
        &mut self,
        _level: i32,
        _item: i32,
        enter: bool,
        markup: &str,
        _src_index: usize,
        _ctx: &mut Context,
    ) -> EngineResult<()> {
        self.events.push(("span", 0, enter, markup.into()));
        Ok(())
    }

    fn character(&mut self, src_index: usize, _ctx: &mut Context) -> EngineResult<()> {
        self.events.push(("char", src_index as i32, true, String::new()));
        Ok(())
    }
}

fn record(input: &str) -> Vec<(&'static str, i32, bool, String)> {
    let mut hooks = Recorder::default();
    let mut arena = vec![0u8; 4096];
    translate_with_hooks(
        input.as_bytes(),
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &formats::HTML,
        0,
        &mut hooks,
    )
    .unwrap();
    hooks.events
}

fn event(kind: &'static str, level: i32, enter: bool, markup: &str) -> (&'static str, i32, bool, String) {
    (kind, level, enter, markup.into())
}

#[test]
fn heading_and_list_sequence() {
    assert_eq!(
        record("=H=\n*a\n"),
        vec![
            event("div", 1, true, "="),
            event("par", 1, true, "="),
            event("char", 1, true, ""),
            event("par", 1, false, "="),
            event("div", 1, true, "*"),
            event("par", 1, true, "*"),
            event("char", 5, true, ""),
            event("par", 1, false, "*"),
            event("div", 1, false, "*"),
        ]
    );
}

#[test]
fn span_sequence() {
    assert_eq!(
        record("**b**\n"),
        vec![
            event("par", 0, true, "p"),
            event("span", 0, true, "**"),
            event("char", 2, true, ""),
            event("span", 0, false, "**"),
            event("par", 0, false, "p"),
        ]
    );
}

#[test]
fn link_span_reports_the_target() {
    struct LinkGrabber {
        seen: Option<(usize, usize)>,
    }
    impl Hooks for LinkGrabber {
        fn span(
            &mut self,
            _level: i32,
            _item: i32,
            enter: bool,
            markup: &str,
            _src_index: usize,
            ctx: &mut Context,
        ) -> EngineResult<()> {
            if enter && markup == "[[" {
                self.seen = Some(ctx.current_link());
            }
            Ok(())
        }
    }
    let mut hooks = LinkGrabber { seen: None };
    let mut arena = vec![0u8; 4096];
    let input = b"[[http://x/|t]]";
    translate_with_hooks(
        input,
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &formats::HTML,
        0,
        &mut hooks,
    )
    .unwrap();
    let (offset, length) = hooks.seen.expect("link hook never fired");
    assert_eq!(&input[offset..offset + length], b"http://x/");
}

#[test]
fn hook_errors_abort_the_translation() {
    struct Failing;
    impl Hooks for Failing {
        fn paragraph(
            &mut self,
            _level: i32,
            _item: i32,
            _enter: bool,
            _markup: &str,
            _src_index: usize,
            _ctx: &mut Context,
        ) -> EngineResult<()> {
            Err(creole_engine::EngineError::Callback("nope".into()))
        }
    }
    let mut arena = vec![0u8; 4096];
    let err = translate_with_hooks(
        b"x\n",
        &mut arena,
        ProcessOptions::NO_PRE_AND_POST,
        "\n",
        &formats::HTML,
        0,
        &mut Failing,
    )
    .unwrap_err();
    assert_eq!(
        err,
        creole_engine::EngineError::Callback("nope".into())
    );
}
