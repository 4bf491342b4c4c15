//! Human-readable structure summary sent alongside the digest.

use std::fmt::Write;

use crate::analyzer::StructureStatistics;

const SUMMARY_FOLDER_LIMIT: usize = 5;
const SUMMARY_DOMAIN_LIMIT: usize = 5;

/// Render the statistics as a short markdown overview.
pub fn generate_structure_summary(stats: &StructureStatistics) -> String {
    let mut summary = String::from("**Bookmark Collection Overview:**\n");
    let _ = writeln!(summary, "- Total Folders: {}", stats.total_folders);
    let _ = writeln!(summary, "- Total Bookmarks: {}", stats.total_bookmarks);
    let _ = writeln!(
        summary,
        "- Maximum Nesting Depth: {} levels",
        stats.max_depth
    );

    if !stats.popular_folders.is_empty() {
        summary.push_str("\n**Most Used Folders:**\n");
        for (idx, folder) in stats
            .popular_folders
            .iter()
            .take(SUMMARY_FOLDER_LIMIT)
            .enumerate()
        {
            let _ = writeln!(
                summary,
                "{}. \"{}\" - {} bookmarks",
                idx + 1,
                folder.name,
                folder.count
            );
        }
    }

    let domains = stats.top_domains(SUMMARY_DOMAIN_LIMIT);
    if !domains.is_empty() {
        summary.push_str("\n**Frequently Bookmarked Domains:**\n");
        for (domain, count) in domains {
            let plural = if count > 1 { "s" } else { "" };
            let _ = writeln!(summary, "- {domain} ({count} bookmark{plural})");
        }
    }

    summary.push('\n');
    summary
}
