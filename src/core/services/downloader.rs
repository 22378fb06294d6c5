//! Thin wrapper around the yt-dlp executable.
//!
//! Two jobs: streaming a media download straight to stdout, and extracting
//! subtitle tracks into a scoped temporary directory that is removed on
//! every exit path. No retry or resume logic lives here; that is the
//! utility's own business.

use std::collections::BTreeMap;
use std::fs;
use std::process::Stdio;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;
use url::Url;

use crate::error::{DownloaderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    fn format_selector(self) -> &'static str {
        match self {
            MediaKind::Audio => "bestaudio/best",
            MediaKind::Video => "bestvideo+bestaudio/best",
        }
    }
}

/// Subtitle tracks are converted to this text format before being read back.
const SUBTITLE_FORMAT: &str = "vtt";

pub struct Downloader {
    program: String,
}

impl Downloader {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("--quiet").arg("--no-progress").arg("--no-warnings");
        command
    }

    /// Fetches the best available stream for `video_id` and copies it,
    /// unmodified, to our stdout.
    pub async fn stream_content(&self, video_id: &str, kind: MediaKind) -> Result<()> {
        let url = watch_url(video_id);
        debug!("Streaming {:?} content for {}", kind, video_id);

        let mut command = self.command();
        command
            .arg("--format")
            .arg(kind.format_selector())
            .arg("--output")
            .arg("-")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| DownloaderError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let mut media = child.stdout.take().ok_or(DownloaderError::NoStdout)?;

        // Drain stderr while the media copy runs; a child blocked on a full
        // stderr pipe would otherwise never reach EOF on stdout.
        let stderr_pipe = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buffer = Vec::new();
            if let Some(mut stderr_pipe) = stderr_pipe {
                let _ = stderr_pipe.read_to_end(&mut buffer).await;
            }
            buffer
        });

        let mut stdout = tokio::io::stdout();
        tokio::io::copy(&mut media, &mut stdout).await?;
        stdout.flush().await?;

        let status = child.wait().await?;
        let stderr = stderr_task.await.unwrap_or_default();
        if !status.success() {
            return Err(DownloaderError::Failed {
                program: self.program.clone(),
                status,
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Extracts every available subtitle track (live chat excluded),
    /// converted to VTT, and returns `{language: "vtt\n<content>"}`. The
    /// working directory is temporary and removed when this returns,
    /// whether or not it succeeds.
    pub async fn fetch_subtitles(&self, video_id: &str) -> Result<BTreeMap<String, String>> {
        let url = watch_url(video_id);
        let workdir = TempDir::new()?;
        // yt-dlp appends ".<lang>.<ext>" to the subtitle output template
        let template = workdir.path().join("%(id)s");

        debug!("Extracting subtitles for {} into {}", video_id, workdir.path().display());

        let mut command = self.command();
        command
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--sub-langs")
            .arg("all,-live_chat")
            .arg("--convert-subs")
            .arg(SUBTITLE_FORMAT)
            .arg("--output")
            .arg(&template)
            .arg(url)
            .stdin(Stdio::null());

        let output = command.output().await.map_err(|source| DownloaderError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(DownloaderError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let mut subtitles = BTreeMap::new();
        for entry in fs::read_dir(workdir.path())? {
            let entry = entry?;
            let name = entry.file_name();
            let Some((language, format)) = parse_subtitle_name(&name.to_string_lossy()) else {
                continue;
            };
            let content = fs::read_to_string(entry.path())?;
            subtitles.insert(language, format!("{format}\n{content}"));
        }

        debug!("Found {} subtitle track(s) for {}", subtitles.len(), video_id);
        Ok(subtitles)
    }
}

fn watch_url(video_id: &str) -> String {
    // Static base plus one query pair; the parse cannot fail.
    Url::parse_with_params("https://www.youtube.com/watch", &[("v", video_id)])
        .expect("valid watch URL")
        .to_string()
}

/// Splits a subtitle file name of the form `<id>.<lang>.<ext>` into its
/// language tag and format.
fn parse_subtitle_name(name: &str) -> Option<(String, String)> {
    let mut parts = name.rsplitn(3, '.');
    let format = parts.next()?;
    let language = parts.next()?;
    // require the id stem so bare "<lang>.<ext>" names are not misread
    parts.next()?;
    Some((language.to_string(), format.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("abc123"), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_watch_url_escapes_query_value() {
        assert_eq!(watch_url("a b&c"), "https://www.youtube.com/watch?v=a+b%26c");
    }

    #[test]
    fn test_format_selectors() {
        assert_eq!(MediaKind::Audio.format_selector(), "bestaudio/best");
        assert_eq!(MediaKind::Video.format_selector(), "bestvideo+bestaudio/best");
    }

    #[test]
    fn test_parse_subtitle_name() {
        assert_eq!(
            parse_subtitle_name("dQw4w9WgXcQ.en.vtt"),
            Some(("en".to_string(), "vtt".to_string()))
        );
        assert_eq!(
            parse_subtitle_name("dQw4w9WgXcQ.pt-BR.vtt"),
            Some(("pt-BR".to_string(), "vtt".to_string()))
        );
        // dots inside the id stem do not shift the split
        assert_eq!(
            parse_subtitle_name("some.id.de.vtt"),
            Some(("de".to_string(), "vtt".to_string()))
        );
    }

    #[test]
    fn test_parse_subtitle_name_rejects_short_names() {
        assert_eq!(parse_subtitle_name("en.vtt"), None);
        assert_eq!(parse_subtitle_name("readme"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_subtitles_without_tracks_is_empty() {
        // a stub that accepts the arguments and writes no subtitle files
        let downloader = Downloader::new("true");
        let subtitles = downloader.fetch_subtitles("vid123").await.unwrap();
        assert!(subtitles.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_subtitles_failure_surfaces_as_downloader_error() {
        use crate::error::BridgeError;

        let downloader = Downloader::new("false");
        let err = downloader.fetch_subtitles("vid123").await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Downloader(DownloaderError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stream_content_survives_noisy_stderr() {
        use std::os::unix::fs::PermissionsExt;

        // Writes more stderr than a pipe buffer holds, then exits cleanly;
        // the stream must not deadlock waiting on an undrained pipe.
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("noisy");
        std::fs::write(
            &script,
            "#!/bin/sh\nhead -c 131072 /dev/zero | tr '\\0' 'e' >&2\nexit 0\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let downloader = Downloader::new(&script.to_string_lossy());
        downloader
            .stream_content("vid123", MediaKind::Audio)
            .await
            .unwrap();
    }
}
