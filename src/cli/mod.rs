pub mod assign;
pub mod template;

use serde::Serialize;

/// Renders command output as JSON, pretty-printed when configured.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    Ok(output)
}
