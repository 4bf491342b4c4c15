//! Detection of an already-bookmarked URL.

use markwise_protocols::{BookmarkNode, ExistingBookmark};

/// Path reported for a match that has no enclosing folder.
pub const ROOT_PATH: &str = "Root";

/// Find the first bookmark (pre-order) whose URL equals `url` exactly.
pub fn find_existing(url: &str, tree: &[BookmarkNode]) -> Option<ExistingBookmark> {
    let mut ancestors = Vec::new();
    search(url, tree, &mut ancestors)
}

fn search<'a>(
    url: &str,
    nodes: &'a [BookmarkNode],
    ancestors: &mut Vec<&'a str>,
) -> Option<ExistingBookmark> {
    for node in nodes {
        match node {
            BookmarkNode::Bookmark { id, title, url: node_url } if node_url == url => {
                let path = if ancestors.is_empty() {
                    ROOT_PATH.to_string()
                } else {
                    ancestors.join(" > ")
                };
                return Some(ExistingBookmark {
                    title: title.clone(),
                    path,
                    id: id.clone(),
                });
            }
            BookmarkNode::Bookmark { .. } => {}
            BookmarkNode::Folder { title, children, .. } => {
                ancestors.push(title);
                let found = search(url, children, ancestors);
                ancestors.pop();
                if found.is_some() {
                    return found;
                }
            }
        }
    }
    None
}
