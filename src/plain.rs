//! Non-interactive output for pipes and `--plain`.

use crate::api::load::{load_item, load_user};
use crate::api::{HnApi, Item};
use crate::text::{format_age, now_unix, strip_markup};
use anyhow::{Context, Result};
use std::io::Write;

const RULE_WIDTH: usize = 60;

pub fn print_stories(out: &mut impl Write, items: &[Item]) -> Result<()> {
    let now = now_unix();
    for (idx, item) in items.iter().enumerate() {
        writeln!(out, "{}. {} ({} pts)", idx + 1, item.title, item.score)?;
        if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
            writeln!(out, "   {url}")?;
        }
        writeln!(
            out,
            "   {} comments · by {} · {} · {}\n",
            item.descendant_count,
            item.author_or_unknown(),
            format_age(item.created_at, now),
            item.permalink()
        )?;
    }
    out.flush().context("flush stdout")
}

pub async fn print_item<A: HnApi>(
    out: &mut impl Write,
    api: &A,
    id: u64,
    cap: usize,
) -> Result<()> {
    let load = load_item(api, id, cap).await?;
    let story = &load.story;
    let now = now_unix();

    writeln!(out, "{}", story.title)?;
    writeln!(out, "{}", "─".repeat(story.title.chars().count()))?;
    if let Some(url) = story.url.as_deref().filter(|u| !u.is_empty()) {
        writeln!(out, "URL:      {url}")?;
    }
    writeln!(out, "Score:    {}", story.score)?;
    writeln!(out, "Author:   {}", story.author_or_unknown())?;
    writeln!(out, "Posted:   {}", format_age(story.created_at, now))?;
    writeln!(out, "Comments: {}", story.descendant_count)?;
    writeln!(out, "HN:       {}", story.permalink())?;
    if !story.text.is_empty() {
        writeln!(out, "\n{}", strip_markup(&story.text))?;
    }

    if let Some(err) = &load.error {
        tracing::warn!("some comments failed to load: {err}: {:#}", err.source);
    }
    if !load.children.is_empty() {
        writeln!(out, "\n{}\n", "─".repeat(RULE_WIDTH))?;
        for child in load.children.iter().flatten().filter(|c| c.is_visible()) {
            writeln!(
                out,
                "{}  ({})",
                child.author_or_unknown(),
                format_age(child.created_at, now)
            )?;
            writeln!(out, "{}\n", strip_markup(&child.text))?;
        }
    }
    out.flush().context("flush stdout")
}

pub async fn print_user<A: HnApi>(out: &mut impl Write, api: &A, name: &str) -> Result<()> {
    let load = load_user(api, name).await?;
    let Some(user) = load.user else {
        anyhow::bail!("user {name:?} not found");
    };
    let now = now_unix();

    writeln!(out, "User:   {}", user.id)?;
    writeln!(out, "Karma:  {}", user.karma)?;
    if !user.about.is_empty() {
        writeln!(out, "About:  {}", strip_markup(&user.about))?;
    }
    writeln!(out, "HN:     {}", user.profile_url())?;

    writeln!(out, "\nRecent submissions:\n")?;
    for item in &load.submissions {
        writeln!(
            out,
            "  {} ({} pts · {} comments · {})",
            item.title,
            item.score,
            item.descendant_count,
            format_age(item.created_at, now)
        )?;
        if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
            writeln!(out, "  {url}")?;
        }
        writeln!(out)?;
    }
    out.flush().context("flush stdout")
}
