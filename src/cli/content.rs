use clap::{Args, ValueEnum};

use crate::config::Config;
use crate::core::services::downloader::MediaKind;
use crate::error::Result;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContentType {
    Audio,
    Video,
}

impl From<ContentType> for MediaKind {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Audio => MediaKind::Audio,
            ContentType::Video => MediaKind::Video,
        }
    }
}

#[derive(Args)]
pub struct ContentArgs {
    /// Video id to fetch
    #[arg(value_name = "ID")]
    id: String,

    /// Stream to fetch: best audio, or combined audio+video
    #[arg(long = "type", value_enum, default_value = "audio")]
    content_type: ContentType,
}

pub async fn execute(args: ContentArgs, config: &Config) -> Result<()> {
    let downloader = config.create_downloader();
    downloader.stream_content(&args.id, args.content_type.into()).await
}
