use clap::Args;

use crate::config::Config;
use crate::error::Result;

#[derive(Args)]
pub struct AlbumArgs {
    /// Album browse id
    #[arg(value_name = "ID")]
    id: String,
}

pub async fn execute(args: AlbumArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();
    let album = client.get_album(&args.id).await?;
    println!("{}", serde_json::to_string(&album)?);
    Ok(())
}
