//! Bookmark tree traversal and analysis.
//!
//! A single depth-first, pre-order walk produces both the digest sent to the
//! model and the statistics used for the structure summary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use markwise_protocols::BookmarkNode;

/// Example bookmarks listed per folder by default.
pub const DEFAULT_MAX_SAMPLES: usize = 5;

/// Number of folders kept in [`StructureStatistics::popular_folders`].
pub const POPULAR_FOLDER_LIMIT: usize = 10;

/// Bounded markdown rendering of the folder tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDigest {
    pub markdown: String,
}

/// A folder and its direct bookmark count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStat {
    pub name: String,
    pub count: usize,
    pub depth: usize,
}

/// Aggregate statistics over the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStatistics {
    pub total_folders: usize,
    pub total_bookmarks: usize,
    /// Deepest level walked; top-level folders are depth 1, so at least 1.
    pub max_depth: usize,
    /// Hostname (leading `www.` stripped) to bookmark count.
    pub domain_frequency: BTreeMap<String, usize>,
    /// Folders with at least one direct bookmark, most populated first.
    pub popular_folders: Vec<FolderStat>,
    /// Every folder grouped by depth, in traversal order.
    pub folders_by_depth: BTreeMap<usize, Vec<FolderStat>>,
}

impl StructureStatistics {
    /// Most frequent domains, ties broken alphabetically.
    pub fn top_domains(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut domains: Vec<(&str, usize)> = self
            .domain_frequency
            .iter()
            .map(|(domain, count)| (domain.as_str(), *count))
            .collect();
        domains.sort_by(|a, b| b.1.cmp(&a.1));
        domains.truncate(limit);
        domains
    }
}

/// Analyze the folders under the conceptual root.
pub fn analyze(
    tree: &[BookmarkNode],
    max_samples_per_folder: usize,
) -> (FolderDigest, StructureStatistics) {
    let mut analyzer = Analyzer {
        markdown: String::new(),
        stats: StructureStatistics {
            max_depth: 1,
            ..StructureStatistics::default()
        },
        max_samples: max_samples_per_folder,
    };

    for node in tree {
        match node {
            BookmarkNode::Folder { title, children, .. } => {
                analyzer.visit_folder(title, children, 1);
            }
            BookmarkNode::Bookmark { url, .. } => analyzer.record_bookmark(url),
        }
    }

    let mut stats = analyzer.stats;
    stats.popular_folders.sort_by(|a, b| b.count.cmp(&a.count));
    stats.popular_folders.truncate(POPULAR_FOLDER_LIMIT);

    debug!(
        folders = stats.total_folders,
        bookmarks = stats.total_bookmarks,
        max_depth = stats.max_depth,
        "Analyzed bookmark tree"
    );

    (
        FolderDigest {
            markdown: analyzer.markdown,
        },
        stats,
    )
}

struct Analyzer {
    markdown: String,
    stats: StructureStatistics,
    max_samples: usize,
}

impl Analyzer {
    fn visit_folder(&mut self, title: &str, children: &[BookmarkNode], depth: usize) {
        self.stats.total_folders += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let name = if title.is_empty() { "Folder" } else { title };
        self.markdown
            .push_str(&format!("{} {}\n", "#".repeat(depth), name));

        let mut bookmarks = Vec::new();
        let mut subfolders = Vec::new();
        for child in children {
            match child {
                BookmarkNode::Bookmark { title, url, .. } => bookmarks.push((title, url)),
                BookmarkNode::Folder {
                    title, children, ..
                } => subfolders.push((title, children)),
            }
        }

        let stat = FolderStat {
            name: title.to_string(),
            count: bookmarks.len(),
            depth,
        };
        if !bookmarks.is_empty() {
            self.stats.popular_folders.push(stat.clone());
        }
        self.stats
            .folders_by_depth
            .entry(depth)
            .or_default()
            .push(stat);

        if !bookmarks.is_empty() {
            let indent = "  ".repeat(depth);
            self.markdown.push_str(&format!(
                "{indent}*[Contains {} bookmark(s)]*\n{indent}*Examples:*\n",
                bookmarks.len()
            ));

            for (title, url) in bookmarks.iter().take(self.max_samples) {
                self.markdown
                    .push_str(&format!("{indent}- [{title}]({url})\n"));
            }
            if bookmarks.len() > self.max_samples {
                self.markdown.push_str(&format!(
                    "{indent}*...and {} more*\n",
                    bookmarks.len() - self.max_samples
                ));
            }
            self.markdown.push('\n');

            for (_, url) in &bookmarks {
                self.record_bookmark(url);
            }
        }

        for (title, children) in subfolders {
            self.visit_folder(title, children, depth + 1);
        }
    }

    fn record_bookmark(&mut self, url: &str) {
        self.stats.total_bookmarks += 1;
        if let Some(domain) = domain_of(url) {
            *self.stats.domain_frequency.entry(domain).or_insert(0) += 1;
        }
    }
}

/// Hostname of a bookmark URL with a leading `www.` removed.
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
