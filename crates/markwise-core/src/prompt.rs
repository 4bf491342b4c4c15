//! Prompt text and structured-output contract for the recommendation call.

use serde_json::{json, Value};

/// System instruction sent with every recommendation request.
pub const SYSTEM_INSTRUCTION: &str = r#"You help a user file a new bookmark into their existing bookmark folders.

You receive the URL to bookmark, an overview of the user's collection, and their folder tree in markdown. Headings are folders, nesting depth is the number of '#' characters, and each folder lists a few of the bookmarks it already holds.

How to decide:
1. Work out what the URL is: its site, topic and kind of content (documentation, article, tool, video, shop, ...).
2. Learn how this user files things by looking at which sites and topics already sit in each folder and how deep they nest.
3. Prefer the most specific existing folder whose current bookmarks resemble the URL.

What to return:
- At most 5 recommendations for EXISTING folders, best first.
- At most 2 recommendations for NEW folders, only when no existing folder is a good fit.
- "text" is the full folder path from the top level, folder names copied exactly from the tree and joined with " > ".
- For a new folder, "text" is an existing path followed by the new folder name, and "add_folder" is true.
- "title" is a concise, descriptive bookmark title under 60 characters naming the page's subject, never just the URL or domain. Use a different title for each recommendation.

Reply with JSON only, no prose and no code fences:
{"recommendations": [{"add_folder": false, "text": "Parent > Child", "title": "Bookmark Title"}]}"#;

/// Build the single user turn for `url`.
pub fn build_prompt(url: &str, structure_summary: &str, folder_digest: &str) -> String {
    format!(
        "Recommend where to bookmark this URL, following the user's existing organization.\n\
         \n\
         **URL to Bookmark:**\n\
         {url}\n\
         \n\
         {structure_summary}\
         **User's Bookmark Folder Structure:**\n\
         (Folder headings with example bookmarks showing what each folder holds)\n\
         \n\
         {folder_digest}\n\
         \n\
         **Instructions:**\n\
         - Consider the URL's domain, path and likely content type\n\
         - Match it against the sites and topics already in each folder\n\
         - Prefer existing folders, including specific nested subfolders\n\
         - Suggest a new folder only when nothing existing fits\n\
         - Copy folder names exactly and join them with \" > \"\n\
         \n\
         Respond with ONLY a JSON object in this format:\n\
         {{\"recommendations\": [{{\"add_folder\": false, \"text\": \"Folder > Path\", \"title\": \"Bookmark Title\"}}]}}"
    )
}

/// Response schema passed as the model's structured-output contract.
///
/// Uses the OpenAPI-style upper-case type names `generateContent` expects.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "add_folder": { "type": "BOOLEAN" },
                        "text": { "type": "STRING" },
                        "title": { "type": "STRING" }
                    },
                    "required": ["add_folder", "text", "title"]
                }
            }
        },
        "required": ["recommendations"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_inputs_in_order() {
        let prompt = build_prompt(
            "https://react.dev/learn",
            "**Bookmark Collection Overview:**\n- Total Folders: 1\n\n",
            "# Dev\n",
        );

        let url = prompt.find("https://react.dev/learn").unwrap();
        let summary = prompt.find("Total Folders: 1").unwrap();
        let digest = prompt.find("# Dev").unwrap();
        assert!(url < summary && summary < digest);
        assert!(prompt.contains("\"add_folder\": false"));
    }

    #[test]
    fn test_prompt_without_summary() {
        let prompt = build_prompt("https://example.com", "", "# Misc\n");
        assert!(prompt.contains("https://example.com\n\n**User's Bookmark Folder Structure:**"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = response_schema();
        let required = &schema["properties"]["recommendations"]["items"]["required"];
        assert_eq!(required.as_array().unwrap().len(), 3);
        assert_eq!(schema["properties"]["recommendations"]["type"], "ARRAY");
    }

    #[test]
    fn test_system_instruction_states_caps() {
        assert!(SYSTEM_INSTRUCTION.contains("At most 5"));
        assert!(SYSTEM_INSTRUCTION.contains("At most 2"));
        assert!(SYSTEM_INSTRUCTION.contains(" > "));
    }
}
