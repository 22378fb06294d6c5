pub mod downloader;
pub mod nav;
pub mod ytmusic;
