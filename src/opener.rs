//! Fire-and-forget hand-off of links to the browser or clipboard.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Shell template overriding the browser, e.g. `echo {} | wl-copy`.
pub const OPEN_ENV: &str = "HNTERM_OPEN";

pub fn open_url(url: &str) -> Result<()> {
    match std::env::var(OPEN_ENV) {
        Ok(template) if !template.trim().is_empty() => {
            let script = shell_command(&template, url);
            tracing::info!(%script, "opening via {OPEN_ENV}");
            Command::new("sh")
                .arg("-c")
                .arg(&script)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .with_context(|| format!("spawn sh -c {script:?}"))?;
            Ok(())
        }
        _ => {
            tracing::info!(%url, "opening in browser");
            open::that_detached(url).with_context(|| format!("open {url} in browser"))
        }
    }
}

/// Substitutes `{}` with the URL, or appends it when the template has no
/// placeholder.
pub fn shell_command(template: &str, url: &str) -> String {
    if template.contains("{}") {
        template.replace("{}", url)
    } else {
        format!("{template} {url}")
    }
}

#[cfg(not(target_os = "android"))]
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("write clipboard")?;
    tracing::info!(%text, "copied to clipboard");
    Ok(())
}

#[cfg(target_os = "android")]
pub fn copy_to_clipboard(_text: &str) -> Result<()> {
    anyhow::bail!("clipboard not supported on this platform")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_substituted() {
        assert_eq!(
            shell_command("echo {} | pbcopy", "https://a.b/c"),
            "echo https://a.b/c | pbcopy"
        );
    }

    #[test]
    fn url_is_appended_without_placeholder() {
        assert_eq!(
            shell_command("firefox", "https://a.b"),
            "firefox https://a.b"
        );
    }
}
