use clap::Args;

use crate::config::Config;
use crate::error::Result;

#[derive(Args)]
pub struct PlaylistArgs {
    /// Playlist id
    #[arg(value_name = "ID")]
    id: String,
}

pub async fn execute(args: PlaylistArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();
    let playlist = client.get_playlist(&args.id).await?;
    println!("{}", serde_json::to_string(&playlist)?);
    Ok(())
}
