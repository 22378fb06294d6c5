use clap::Args;
use serde_json::json;

use crate::config::Config;
use crate::core::services::ytmusic::LYRICS_ID_PREFIX;
use crate::error::{BridgeError, Result};

#[derive(Args)]
pub struct LyricsArgs {
    /// Video id, or a lyrics id (MPLY…) to skip the resolution step
    #[arg(value_name = "ID")]
    id: String,
}

pub async fn execute(args: LyricsArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();

    let lyrics_id = if is_lyrics_id(&args.id) {
        args.id.clone()
    } else {
        // resolve the video's watch playlist to find its lyrics id
        client
            .get_watch_playlist(&args.id)
            .await?
            .lyrics_id
            .ok_or_else(|| BridgeError::Validation(format!("video {} has no lyrics", args.id)))?
    };

    let lyrics = client.get_lyrics(&lyrics_id).await?;

    // The service does not report the lyrics language.
    let document = json!({ "unknown": format!("txt\n{}", normalize_newlines(&lyrics)) });
    println!("{}", serde_json::to_string(&document)?);
    Ok(())
}

fn is_lyrics_id(id: &str) -> bool {
    id.starts_with(LYRICS_ID_PREFIX)
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lyrics_id_prefix_routing() {
        assert!(is_lyrics_id("MPLYt_abcdef"));
        assert!(!is_lyrics_id("dQw4w9WgXcQ"));
        assert!(!is_lyrics_id("mply_lowercase"));
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\r\nc"), "a\nb\nc");
        assert_eq!(normalize_newlines("already\nclean"), "already\nclean");
    }
}
