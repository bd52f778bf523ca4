use creole_engine::{translate, EngineError, OutputFormat, ProcessOptions};

/// Translates with a growing arena. Every successful render also checks the
/// universal invariants: the UCS-16 counter equals the number of UTF-8 first
/// bytes in the output, and the output is zero-terminated in the arena.
#[allow(unused)]
pub fn render(input: &str, options: ProcessOptions, format: &OutputFormat) -> String {
    let mut size = (2 * input.len()).max(256);
    loop {
        let mut arena = vec![0u8; size];
        match translate(input.as_bytes(), &mut arena, options, "\n", format, 0) {
            Ok(rendered) => {
                let bytes = rendered.slice(&arena);
                let first_bytes = bytes
                    .iter()
                    .filter(|&&b| b & 0x80 == 0 || b & 0xe0 == 0xc0 || b & 0xf0 == 0xe0)
                    .count();
                assert_eq!(
                    rendered.ucs16_len, first_bytes,
                    "UCS-16 counter out of sync with the output bytes"
                );
                assert_eq!(
                    arena[rendered.offset + rendered.len],
                    0,
                    "output is not zero-terminated"
                );
                return String::from_utf8(bytes.to_vec()).unwrap();
            }
            Err(EngineError::NotEnoughMemory) => size *= 2,
            Err(err) => panic!("translation failed: {err}"),
        }
    }
}

/// HTML rendering without the document preamble and postamble.
#[allow(unused)]
pub fn html(input: &str) -> String {
    html_with(input, ProcessOptions::empty())
}

#[allow(unused)]
pub fn html_with(input: &str, options: ProcessOptions) -> String {
    render(
        input,
        options | ProcessOptions::NO_PRE_AND_POST,
        &creole_engine::formats::HTML,
    )
}

/// Round-trip rendering back to creole markup.
#[allow(unused)]
pub fn creole(input: &str) -> String {
    render(
        input,
        ProcessOptions::NO_PRE_AND_POST,
        &creole_engine::formats::CREOLE,
    )
}

/// Plain text rendering.
#[allow(unused)]
pub fn text(input: &str) -> String {
    render(
        input,
        ProcessOptions::NO_PRE_AND_POST,
        &creole_engine::formats::TEXT,
    )
}
