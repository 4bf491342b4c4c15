//! API key subcommand handlers for markwise.

use markwise_core::BookmarkAssistant;

use crate::adapters::mask_key;
use crate::cli::KeyAction;
use crate::cmd_bookmark::report;

/// Handle key subcommands.
pub(crate) async fn handle_key_command(
    assistant: &BookmarkAssistant,
    action: KeyAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        KeyAction::Set { key } => {
            assistant.save_api_key(&key).await.map_err(report)?;
            println!("API key saved");
        }
        KeyAction::Show => match assistant.api_key().await.map_err(report)? {
            Some(key) => println!("{}", mask_key(&key)),
            None => println!("No API key set"),
        },
    }
    Ok(())
}
