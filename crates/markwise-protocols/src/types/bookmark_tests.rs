use super::*;

#[test]
fn test_folder_deserializes_from_platform_shape() {
    let json = r#"{"id": "1", "title": "Bookmarks Bar", "children": []}"#;
    let node: BookmarkNode = serde_json::from_str(json).unwrap();
    assert!(node.is_folder());
    assert_eq!(node.title(), "Bookmarks Bar");
    assert!(node.url().is_none());
}

#[test]
fn test_bookmark_deserializes_from_platform_shape() {
    let json = r#"{"id": "7", "title": "Rust", "url": "https://rust-lang.org"}"#;
    let node: BookmarkNode = serde_json::from_str(json).unwrap();
    assert!(!node.is_folder());
    assert_eq!(node.url(), Some("https://rust-lang.org"));
    assert!(node.children().is_empty());
}

#[test]
fn test_missing_title_defaults_to_empty() {
    let json = r#"{"id": "0", "children": []}"#;
    let node: BookmarkNode = serde_json::from_str(json).unwrap();
    assert_eq!(node.title(), "");
}

#[test]
fn test_node_with_neither_url_nor_children_is_rejected() {
    let json = r#"{"id": "3", "title": "broken"}"#;
    assert!(serde_json::from_str::<BookmarkNode>(json).is_err());
}

#[test]
fn test_nested_tree_serialization() {
    let tree = BookmarkNode::folder(
        "1",
        "Dev",
        vec![BookmarkNode::bookmark("2", "React Docs", "https://react.dev")],
    );
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["children"][0]["url"], "https://react.dev");
    assert!(json.get("url").is_none());

    let parsed: BookmarkNode = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, tree);
}

#[test]
fn test_placement_fell_short() {
    let outcome = PlacementOutcome {
        bookmark: BookmarkNode::bookmark("9", "t", "https://x.dev"),
        created_folder: None,
        parent_id: "1".to_string(),
        resolved_depth: 1,
        requested_depth: 3,
    };
    assert!(outcome.fell_short());
}
