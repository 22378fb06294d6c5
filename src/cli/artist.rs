use clap::Args;

use crate::config::Config;
use crate::error::Result;

#[derive(Args)]
pub struct ArtistArgs {
    /// Artist channel id
    #[arg(value_name = "ID")]
    id: String,
}

pub async fn execute(args: ArtistArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();
    let artist = client.get_artist(&args.id).await?;
    println!("{}", serde_json::to_string(&artist)?);
    Ok(())
}
