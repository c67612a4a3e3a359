//! Wisdom command handler: stream one aphorism to stdout.

use std::io::{Write, stdout};

use anyhow::Result;
use coderistic_core::config::Config;
use coderistic_core::wisdom::{
    ChatCompletionsBackend, ChatCompletionsConfig, WisdomEnd, WisdomStreamer,
};

pub async fn run(config: &Config) -> Result<()> {
    let backend = ChatCompletionsBackend::new(ChatCompletionsConfig::from_config(&config.wisdom)?);
    let streamer = WisdomStreamer::new(backend);

    let mut out = stdout();
    let mut printed = 0;
    let result = streamer
        .request(config.language, |text| {
            // Published states only ever grow; print the new tail.
            let _ = write!(out, "{}", &text[printed..]);
            let _ = out.flush();
            printed = text.len();
        })
        .await;

    if result.end == WisdomEnd::Streamed {
        writeln!(stdout())?;
    } else {
        if printed > 0 {
            writeln!(stdout())?;
        }
        writeln!(stdout(), "{}", result.text)?;
    }
    Ok(())
}
