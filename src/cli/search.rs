use clap::{Args, ValueEnum};
use tracing::debug;

use crate::config::Config;
use crate::core::merge::merge_round_robin;
use crate::core::services::ytmusic::SearchFilter;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Category {
    Tracks,
    Albums,
    Artists,
    Videos,
}

impl Category {
    fn filter(self) -> SearchFilter {
        match self {
            // the service calls the tracks category "songs"
            Category::Tracks => SearchFilter::Songs,
            Category::Albums => SearchFilter::Albums,
            Category::Artists => SearchFilter::Artists,
            Category::Videos => SearchFilter::Videos,
        }
    }
}

/// A result-count bound: a number, or everything the service returns.
#[derive(Debug, Clone, Copy)]
pub enum Limit {
    Count(usize),
    All,
}

impl Limit {
    fn as_option(self) -> Option<usize> {
        match self {
            Limit::Count(count) => Some(count),
            Limit::All => None,
        }
    }
}

fn parse_limit(value: &str) -> std::result::Result<Limit, String> {
    if value.eq_ignore_ascii_case("all") {
        Ok(Limit::All)
    } else {
        value
            .parse::<usize>()
            .map(Limit::Count)
            .map_err(|_| format!("expected a number or \"all\", got \"{value}\""))
    }
}

#[derive(Args)]
pub struct SearchArgs {
    /// Free-text search query
    #[arg(value_name = "QUERY")]
    query: String,

    /// Maximum number of merged results, or "all"
    #[arg(long, default_value = "20", value_parser = parse_limit)]
    limit: Limit,

    /// Categories to search, in merge order
    #[arg(
        long = "types",
        value_enum,
        value_delimiter = ',',
        default_value = "tracks,albums,artists"
    )]
    types: Vec<Category>,

    /// Also search videos when tracks are requested
    #[arg(long)]
    allow_videos: bool,
}

pub async fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let client = config.create_metadata_client();
    let categories = requested_categories(&args.types, args.allow_videos);
    let limit = args.limit.as_option();

    let mut lists = Vec::with_capacity(categories.len());
    for category in &categories {
        let results = client.search(&args.query, category.filter(), limit, true).await?;
        lists.push(results);
    }

    let merged = merge_round_robin(lists, limit);
    debug!(
        "Merged {} result(s) across {} categorie(s)",
        merged.len(),
        categories.len()
    );

    println!("{}", serde_json::to_string(&merged)?);
    Ok(())
}

fn requested_categories(types: &[Category], allow_videos: bool) -> Vec<Category> {
    let mut categories = types.to_vec();
    if allow_videos
        && categories.contains(&Category::Tracks)
        && !categories.contains(&Category::Videos)
    {
        categories.push(Category::Videos);
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert!(matches!(parse_limit("20"), Ok(Limit::Count(20))));
        assert!(matches!(parse_limit("0"), Ok(Limit::Count(0))));
        assert!(matches!(parse_limit("all"), Ok(Limit::All)));
        assert!(matches!(parse_limit("ALL"), Ok(Limit::All)));
        assert!(parse_limit("-3").is_err());
        assert!(parse_limit("many").is_err());
    }

    #[test]
    fn test_allow_videos_appends_when_tracks_requested() {
        let base = [Category::Tracks, Category::Albums, Category::Artists];
        assert_eq!(
            requested_categories(&base, true),
            vec![Category::Tracks, Category::Albums, Category::Artists, Category::Videos]
        );
        // without the flag nothing changes
        assert_eq!(requested_categories(&base, false), base.to_vec());
    }

    #[test]
    fn test_allow_videos_ignored_without_tracks() {
        let types = [Category::Albums, Category::Artists];
        assert_eq!(requested_categories(&types, true), types.to_vec());
    }

    #[test]
    fn test_allow_videos_does_not_duplicate() {
        let types = [Category::Tracks, Category::Videos];
        assert_eq!(requested_categories(&types, true), types.to_vec());
    }
}
