//! Command Line Interface module
//!
//! One submodule per action. Each exposes a clap `Args` struct and an
//! `execute` function; all JSON documents go to stdout, diagnostics to
//! stderr.

pub mod album;
pub mod artist;
pub mod content;
pub mod lyrics;
pub mod playlist;
pub mod search;
pub mod subtitles;
pub mod track;
