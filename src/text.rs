use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

fn break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"))
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<p\s*/?>").expect("valid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

/// Converts the HTML subset used in item text to plain text. Paragraph tags
/// become blank lines, all other tags are dropped and entities decoded.
pub fn strip_markup(html: &str) -> String {
    let s = break_re().replace_all(html, "\n");
    let s = paragraph_re().replace_all(&s, "\n\n");
    let s = tag_re().replace_all(&s, "");
    decode_html_entities(&s).trim().to_string()
}

/// Greedy word wrap on whitespace. Words longer than `width` get a line of
/// their own. Paragraph breaks are the caller's concern.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > width {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Wraps every paragraph of `text`, keeping blank lines between them.
pub fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let wrapped = wrap_words(paragraph, width);
        if wrapped.is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrapped);
        }
    }
    out
}

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .try_into()
        .unwrap_or(i64::MAX)
}

pub fn format_age(created_at: i64, now: i64) -> String {
    let diff = now.saturating_sub(created_at).max(0);
    let minutes = diff / 60;
    let hours = minutes / 60;
    if diff < 60 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{} ago", pluralize(minutes, "minute"));
    }
    if hours < 24 {
        return format!("{} ago", pluralize(hours, "hour"));
    }
    format!("{} ago", pluralize(hours / 24, "day"))
}

fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// "Jan 2006" style month of a unix timestamp.
pub fn format_month(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%b %Y").to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn hostname(url: &str) -> String {
    let without_scheme = url.split("://").nth(1).unwrap_or(url);
    let host = without_scheme.split('/').next().unwrap_or(without_scheme);
    let host = host.rsplit('@').next().unwrap_or(host);
    host.trim_start_matches("www.").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_entities() {
        let html = "Hello <i>world</i> &amp; friends&#x27;<p>Second &quot;para&quot;";
        assert_eq!(
            strip_markup(html),
            "Hello world & friends'\n\nSecond \"para\""
        );
    }

    #[test]
    fn breaks_become_newlines() {
        assert_eq!(strip_markup("a<br>b<BR />c"), "a\nb\nc");
    }

    #[test]
    fn links_keep_their_text() {
        let html = r#"see <a href="https://x.io" rel="nofollow">https://x.io</a>"#;
        assert_eq!(strip_markup(html), "see https://x.io");
    }

    #[test]
    fn wraps_at_width() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(
            lines,
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let lines = wrap_words("a supercalifragilistic b", 5);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_text_wraps_to_nothing() {
        assert!(wrap_words("   ", 20).is_empty());
    }

    #[test]
    fn paragraphs_keep_blank_separator() {
        let lines = wrap_paragraphs("one two\n\nthree", 20);
        assert_eq!(lines, vec!["one two", "", "three"]);
    }

    #[test]
    fn ages() {
        let now = 1_000_000;
        assert_eq!(format_age(now - 5, now), "just now");
        assert_eq!(format_age(now - 60, now), "1 minute ago");
        assert_eq!(format_age(now - 150, now), "2 minutes ago");
        assert_eq!(format_age(now - 3 * 3600, now), "3 hours ago");
        assert_eq!(format_age(now - 49 * 3600, now), "2 days ago");
        assert_eq!(format_age(now + 100, now), "just now");
    }

    #[test]
    fn month_format() {
        assert_eq!(format_month(1_136_073_600), "Jan 2006");
    }

    #[test]
    fn hostnames() {
        assert_eq!(hostname("https://www.example.com/a/b"), "example.com");
        assert_eq!(
            hostname("http://user@blog.rust-lang.org"),
            "blog.rust-lang.org"
        );
        assert_eq!(hostname("example.org/path"), "example.org");
    }
}
