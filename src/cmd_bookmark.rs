//! Bookmark subcommand handlers for markwise.

use tracing::{info, warn};

use markwise_clipboard_desktop::SystemClipboard;
use markwise_core::{AssistantError, BookmarkAssistant};
use markwise_protocols::{Clipboard, PlacementOutcome, Recommendation};

use crate::adapters::StaticTab;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Log the detailed error and surface only its user message.
pub(crate) fn report(err: AssistantError) -> Box<dyn std::error::Error> {
    warn!("Command failed: {}", err);
    err.user_message().into()
}

/// Print the digest and summary, or the statistics as JSON.
pub(crate) async fn digest(assistant: &BookmarkAssistant, json: bool, refresh: bool) -> CmdResult {
    let bundle = if refresh {
        assistant.refresh_structure().await
    } else {
        assistant.load_structure().await
    }
    .map_err(report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle.statistics)?);
    } else {
        print!("{}", bundle.summary);
        println!();
        print!("{}", bundle.digest.markdown);
    }
    Ok(())
}

pub(crate) async fn check(assistant: &BookmarkAssistant, url: &str) -> CmdResult {
    match assistant.check_existing(url).await.map_err(report)? {
        Some(existing) => println!(
            "Already bookmarked as \"{}\" in {}",
            existing.title, existing.path
        ),
        None => println!("Not bookmarked yet"),
    }
    Ok(())
}

pub(crate) async fn recommend(
    assistant: &BookmarkAssistant,
    url: &str,
    title: &str,
    accept: Option<usize>,
) -> CmdResult {
    let tab = assistant
        .active_tab(&StaticTab::new(url, title))
        .await
        .map_err(report)?;

    if let Some(existing) = assistant.check_existing(&tab.url).await.map_err(report)? {
        println!(
            "Note: already bookmarked as \"{}\" in {}",
            existing.title, existing.path
        );
    }

    let recommendations = assistant.recommend(&tab.url).await.map_err(report)?;
    if recommendations.is_empty() {
        println!("No recommendations");
        return Ok(());
    }
    print_recommendations(&recommendations);

    let Some(choice) = accept else {
        return Ok(());
    };
    let recommendation = choice
        .checked_sub(1)
        .and_then(|i| recommendations.get(i))
        .ok_or_else(|| format!("No recommendation numbered {}", choice))?;

    let mut recommendation = recommendation.clone();
    if recommendation.title.trim().is_empty() {
        recommendation.title = tab.title.clone();
    }
    let outcome = assistant
        .accept(&recommendation, &tab.url)
        .await
        .map_err(report)?;
    print_outcome(&recommendation.text, &outcome);
    Ok(())
}

fn print_recommendations(recommendations: &[Recommendation]) {
    let new_folders = recommendations.iter().filter(|r| r.add_folder).count();

    // Numbering follows the reply order so `--accept` indexes stay stable.
    for (i, rec) in recommendations.iter().enumerate() {
        let kind = if rec.add_folder { "new folder" } else { "existing" };
        println!("{:>2}. [{}] {}  ({})", i + 1, kind, rec.text, rec.title);
    }
    println!(
        "{} existing, {} new",
        recommendations.len() - new_folders,
        new_folders
    );
}

pub(crate) async fn add(
    assistant: &BookmarkAssistant,
    url: &str,
    path: &str,
    title: &str,
    new_folder: bool,
) -> CmdResult {
    let outcome = assistant
        .create(path, title, url, new_folder)
        .await
        .map_err(report)?;
    print_outcome(path, &outcome);
    Ok(())
}

fn print_outcome(path: &str, outcome: &PlacementOutcome) {
    if let Some(folder) = &outcome.created_folder {
        println!("Created folder \"{}\"", folder.title());
    }
    if outcome.fell_short() {
        println!(
            "Folder path \"{}\" was only partly found; bookmark placed {} level(s) deep",
            path, outcome.resolved_depth
        );
    }
    println!(
        "Bookmarked \"{}\" (id {}) in folder {}",
        outcome.bookmark.title(),
        outcome.bookmark.id(),
        outcome.parent_id
    );
}

pub(crate) async fn recent(assistant: &BookmarkAssistant) -> CmdResult {
    let folders = assistant.recent_folders().await;
    if folders.is_empty() {
        println!("No recent folders");
    }
    for folder in folders {
        println!("{}", folder);
    }
    Ok(())
}

pub(crate) async fn copy(url: &str) -> CmdResult {
    SystemClipboard::new()
        .write_text(url)
        .await
        .map_err(|e| report(e.into()))?;
    println!("Copied {}", url);
    Ok(())
}

pub(crate) async fn invalidate(assistant: &BookmarkAssistant) -> CmdResult {
    assistant.invalidate_cache().await.map_err(report)?;
    info!("Structure cache cleared");
    Ok(())
}
