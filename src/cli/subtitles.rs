use clap::Args;

use crate::config::Config;
use crate::error::Result;

#[derive(Args)]
pub struct SubtitlesArgs {
    /// Video id to extract subtitle tracks for
    #[arg(value_name = "ID")]
    id: String,
}

pub async fn execute(args: SubtitlesArgs, config: &Config) -> Result<()> {
    let downloader = config.create_downloader();
    // BTreeMap keys keep the language ordering stable across runs
    let subtitles = downloader.fetch_subtitles(&args.id).await?;
    println!("{}", serde_json::to_string(&subtitles)?);
    Ok(())
}
