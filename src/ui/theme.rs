use anyhow::{anyhow, ensure, Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_UI_CONFIG_TOML: &str = include_str!("../../ui-config.toml");

/// Presentation constants. Built once at startup and handed to renderers and
/// view constructors by reference.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub layout: Layout,
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: Color,
    pub subtle: Color,
    pub dim: Color,
    pub text: Color,
    pub green: Color,
    pub yellow: Color,
    pub header_fg: Color,
    pub error: Color,
    pub rainbow: Vec<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub list_chrome_lines: u16,
    pub comments_chrome_lines: u16,
    pub user_chrome_lines: u16,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeConfig {
    layout: LayoutConfig,
    palette: PaletteConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutConfig {
    list_chrome_lines: u16,
    comments_chrome_lines: u16,
    user_chrome_lines: u16,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteConfig {
    accent: String,
    subtle: String,
    dim: String,
    text: String,
    green: String,
    yellow: String,
    header_fg: String,
    error: String,
    rainbow: Vec<String>,
}

/// Loads the first existing candidate, falling back to the built-in config.
pub fn load_from_candidates(paths: &[PathBuf]) -> Result<(Theme, Option<PathBuf>)> {
    for path in paths {
        if !path.exists() {
            continue;
        }
        let theme = load_from_path(path)?;
        return Ok((theme, Some(path.clone())));
    }
    Ok((Theme::builtin()?, None))
}

fn load_from_path(path: &Path) -> Result<Theme> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read ui config {}", path.display()))?;
    Theme::from_toml(&format!("ui config {}", path.display()), &contents)
}

impl Theme {
    pub fn builtin() -> Result<Self> {
        Self::from_toml("built-in ui config", DEFAULT_UI_CONFIG_TOML)
    }

    fn from_toml(label: &str, contents: &str) -> Result<Self> {
        let config: ThemeConfig =
            toml::from_str(contents).with_context(|| format!("decode {label} toml"))?;
        Self::from_config(config).with_context(|| format!("validate {label}"))
    }

    fn from_config(config: ThemeConfig) -> Result<Self> {
        let layout = Layout {
            list_chrome_lines: config.layout.list_chrome_lines,
            comments_chrome_lines: config.layout.comments_chrome_lines,
            user_chrome_lines: config.layout.user_chrome_lines,
        };
        ensure!(
            layout.comments_chrome_lines >= 2,
            "layout.comments_chrome_lines must be >= 2 (header + footer)"
        );
        ensure!(
            layout.list_chrome_lines >= 3 && layout.user_chrome_lines >= 3,
            "layout.list_chrome_lines and layout.user_chrome_lines must be >= 3 (header + blank + help)"
        );

        Ok(Self {
            palette: Palette::from_config(config.palette)?,
            layout,
        })
    }

    pub fn indent_color(&self, depth: usize) -> Color {
        let colors = &self.palette.rainbow;
        colors[depth % colors.len()]
    }
}

impl Palette {
    fn from_config(config: PaletteConfig) -> Result<Self> {
        let rainbow = config
            .rainbow
            .iter()
            .enumerate()
            .map(|(idx, value)| parse_hex_color(&format!("palette.rainbow[{idx}]"), value))
            .collect::<Result<Vec<_>>>()?;
        ensure!(!rainbow.is_empty(), "palette.rainbow must be non-empty");

        Ok(Self {
            accent: parse_hex_color("palette.accent", &config.accent)?,
            subtle: parse_hex_color("palette.subtle", &config.subtle)?,
            dim: parse_hex_color("palette.dim", &config.dim)?,
            text: parse_hex_color("palette.text", &config.text)?,
            green: parse_hex_color("palette.green", &config.green)?,
            yellow: parse_hex_color("palette.yellow", &config.yellow)?,
            header_fg: parse_hex_color("palette.header_fg", &config.header_fg)?,
            error: parse_hex_color("palette.error", &config.error)?,
            rainbow,
        })
    }
}

fn parse_hex_color(label: &str, value: &str) -> Result<Color> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    ensure!(
        hex.len() == 6 && hex.is_ascii(),
        "{label} must be 6-digit hex (got {value})"
    );
    let channel = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| anyhow!("{label} invalid {name} channel {value}"))
    };
    Ok(Color::Rgb(
        channel(0..2, "red")?,
        channel(2..4, "green")?,
        channel(4..6, "blue")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        let theme = Theme::builtin().unwrap();
        assert_eq!(theme.palette.accent, Color::Rgb(0xFF, 0x66, 0x00));
        assert_eq!(theme.layout.list_chrome_lines, 4);
        assert_eq!(theme.layout.comments_chrome_lines, 2);
        assert_eq!(theme.indent_color(5), theme.indent_color(0));
    }

    #[test]
    fn rejects_unknown_sections() {
        let contents = format!("{DEFAULT_UI_CONFIG_TOML}\n[font]\nsize = 3\n");
        assert!(Theme::from_toml("test", &contents).is_err());
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(parse_hex_color("x", "#12345").is_err());
        assert!(parse_hex_color("x", "zzzzzz").is_err());
        assert_eq!(
            parse_hex_color("x", "0a0B0c").unwrap(),
            Color::Rgb(10, 11, 12)
        );
    }

    #[test]
    fn missing_candidates_fall_back_to_builtin() {
        let (theme, path) =
            load_from_candidates(&[PathBuf::from("/nonexistent/hnterm/ui-config.toml")]).unwrap();
        assert!(path.is_none());
        assert_eq!(theme.layout.user_chrome_lines, 4);
    }
}
