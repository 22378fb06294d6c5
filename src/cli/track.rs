use clap::Args;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{BridgeError, Result, UpstreamError};

#[derive(Args)]
pub struct TrackArgs {
    /// Video id of the track
    #[arg(value_name = "ID")]
    id: String,
}

/// Handles both the `track` and `video` actions: the song record plus the
/// first entry of its watch playlist, with the lyrics id attached.
pub async fn execute(args: TrackArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();

    let video = client.get_song(&args.id).await?;
    let watch = client.get_watch_playlist(&args.id).await?;

    let mut track = watch.tracks.into_iter().next().ok_or_else(|| {
        BridgeError::from(UpstreamError::InvalidResponse {
            reason: format!("watch playlist for {} has no tracks", args.id),
        })
    })?;
    track["lyricsId"] = match watch.lyrics_id {
        Some(lyrics_id) => json!(lyrics_id),
        None => Value::Null,
    };

    let document = json!({ "video": video, "track": track });
    println!("{}", serde_json::to_string(&document)?);
    Ok(())
}
