//! Navigation helpers for youtubei responses.
//!
//! The metadata service wraps everything in deeply nested renderer objects.
//! This module walks those structures and flattens the pieces this tool
//! emits (search results, watch-playlist tracks, lyrics text, browse page
//! records). The upstream schema is not our contract, so everything stays
//! `serde_json::Value`.

use serde_json::{json, Map, Value};

/// Walks `path` through nested objects and arrays. Numeric segments index
/// into arrays.
pub fn nav<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = match current {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(*segment)?,
            _ => return None,
        };
    }
    Some(current)
}

pub fn nav_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    nav(root, path).and_then(Value::as_str)
}

/// Joins the text of every run in a `{"runs": [...]}` node.
pub fn runs_text(node: &Value) -> Option<String> {
    let runs = node.get("runs")?.as_array()?;
    if runs.is_empty() {
        return None;
    }
    Some(
        runs.iter()
            .filter_map(|run| run.get("text").and_then(Value::as_str))
            .collect(),
    )
}

const SEARCH_SHELF_PATH: &[&str] = &[
    "contents",
    "tabbedSearchResultsRenderer",
    "tabs",
    "0",
    "tabRenderer",
    "content",
    "sectionListRenderer",
    "contents",
];

/// All result-shelf entries of a search response, in page order.
pub fn search_shelf_items(response: &Value) -> Vec<&Value> {
    let mut items = Vec::new();
    let Some(sections) = nav(response, SEARCH_SHELF_PATH).and_then(Value::as_array) else {
        return items;
    };
    for section in sections {
        if let Some(contents) = nav(section, &["musicShelfRenderer", "contents"]).and_then(Value::as_array) {
            items.extend(contents);
        }
    }
    items
}

/// Flattens one `musicResponsiveListItemRenderer` search entry into the
/// record shape this tool emits.
pub fn shape_search_result(item: &Value, result_type: &str) -> Option<Value> {
    let renderer = item.get("musicResponsiveListItemRenderer")?;
    let mut record = shape_list_item(renderer)?;
    record.insert("resultType".to_string(), json!(result_type));
    Some(Value::Object(record))
}

/// Common fields of a responsive list item: title, ids, subtitle,
/// thumbnails. Returns `None` when the item has no title at all.
fn shape_list_item(renderer: &Value) -> Option<Map<String, Value>> {
    let title_node = nav(
        renderer,
        &["flexColumns", "0", "musicResponsiveListItemFlexColumnRenderer", "text"],
    )?;
    let title = runs_text(title_node)?;

    let mut record = Map::new();
    record.insert("title".to_string(), json!(title));

    let video_id = nav_str(renderer, &["playlistItemData", "videoId"]).or_else(|| {
        nav_str(
            title_node,
            &["runs", "0", "navigationEndpoint", "watchEndpoint", "videoId"],
        )
    });
    if let Some(video_id) = video_id {
        record.insert("videoId".to_string(), json!(video_id));
    }

    if let Some(browse_id) = nav_str(renderer, &["navigationEndpoint", "browseEndpoint", "browseId"]) {
        record.insert("browseId".to_string(), json!(browse_id));
    }

    if let Some(subtitle) = nav(
        renderer,
        &["flexColumns", "1", "musicResponsiveListItemFlexColumnRenderer", "text"],
    )
    .and_then(runs_text)
    {
        record.insert("subtitle".to_string(), json!(subtitle));
    }

    if let Some(thumbnails) = nav(
        renderer,
        &["thumbnail", "musicThumbnailRenderer", "thumbnail", "thumbnails"],
    ) {
        record.insert("thumbnails".to_string(), thumbnails.clone());
    }

    Some(record)
}

const WATCH_TABS_PATH: &[&str] = &[
    "contents",
    "singleColumnMusicWatchNextResultsRenderer",
    "tabbedRenderer",
    "watchNextTabbedResultsRenderer",
    "tabs",
];

/// Queue tracks of a `next` (watch playlist) response, flattened.
pub fn watch_playlist_tracks(response: &Value) -> Vec<Value> {
    let path = [
        "0",
        "tabRenderer",
        "content",
        "musicQueueRenderer",
        "content",
        "playlistPanelRenderer",
        "contents",
    ];
    nav(response, WATCH_TABS_PATH)
        .and_then(|tabs| nav(tabs, &path))
        .and_then(Value::as_array)
        .map(|contents| contents.iter().filter_map(shape_watch_track).collect())
        .unwrap_or_default()
}

fn shape_watch_track(item: &Value) -> Option<Value> {
    let renderer = item.get("playlistPanelVideoRenderer")?;
    let video_id = renderer.get("videoId").and_then(Value::as_str)?;
    let title = renderer.get("title").and_then(runs_text)?;

    let mut record = Map::new();
    record.insert("videoId".to_string(), json!(video_id));
    record.insert("title".to_string(), json!(title));
    if let Some(artists) = renderer.get("longBylineText").and_then(runs_text) {
        record.insert("artists".to_string(), json!(artists));
    }
    if let Some(length) = renderer.get("lengthText").and_then(runs_text) {
        record.insert("length".to_string(), json!(length));
    }
    if let Some(thumbnails) = nav(renderer, &["thumbnail", "thumbnails"]) {
        record.insert("thumbnails".to_string(), thumbnails.clone());
    }
    Some(Value::Object(record))
}

/// Lyrics browse id attached to a watch playlist (second tab), if any.
pub fn watch_playlist_lyrics_id(response: &Value) -> Option<String> {
    let tabs = nav(response, WATCH_TABS_PATH)?;
    nav_str(tabs, &["1", "tabRenderer", "endpoint", "browseEndpoint", "browseId"])
        .map(str::to_string)
}

/// Lyrics body of a lyrics browse response.
pub fn lyrics_text(response: &Value) -> Option<String> {
    nav(
        response,
        &[
            "contents",
            "sectionListRenderer",
            "contents",
            "0",
            "musicDescriptionShelfRenderer",
            "description",
        ],
    )
    .and_then(runs_text)
}

// Browse pages use different header renderers per entity kind.
const HEADER_RENDERERS: &[&str] = &[
    "musicDetailHeaderRenderer",
    "musicImmersiveHeaderRenderer",
    "musicResponsiveHeaderRenderer",
    "musicVisualHeaderRenderer",
];

/// Flattens an album/artist/playlist browse response into one record:
/// header fields plus per-shelf item records.
pub fn shape_browse_record(response: &Value, id: &str) -> Option<Value> {
    let header = response
        .get("header")
        .and_then(|h| HEADER_RENDERERS.iter().find_map(|key| h.get(key)));

    let mut record = Map::new();
    record.insert("id".to_string(), json!(id));

    if let Some(header) = header {
        if let Some(title) = header.get("title").and_then(runs_text) {
            record.insert("title".to_string(), json!(title));
        }
        if let Some(subtitle) = header.get("subtitle").and_then(runs_text) {
            record.insert("subtitle".to_string(), json!(subtitle));
        }
        if let Some(description) = header.get("description").and_then(runs_text) {
            record.insert("description".to_string(), json!(description));
        }
        if let Some(thumbnails) = header
            .get("thumbnail")
            .and_then(|t| t.as_object())
            .and_then(|t| t.values().next())
            .and_then(|renderer| nav(renderer, &["thumbnail", "thumbnails"]))
        {
            record.insert("thumbnails".to_string(), thumbnails.clone());
        }
    }

    let items = browse_items(response);
    if record.len() == 1 && items.is_empty() {
        // neither a header nor any content: not a usable record
        return None;
    }
    record.insert("items".to_string(), Value::Array(items));
    Some(Value::Object(record))
}

fn browse_items(response: &Value) -> Vec<Value> {
    const SECTION_PATHS: &[&[&str]] = &[
        &[
            "contents",
            "singleColumnBrowseResultsRenderer",
            "tabs",
            "0",
            "tabRenderer",
            "content",
            "sectionListRenderer",
            "contents",
        ],
        &[
            "contents",
            "twoColumnBrowseResultsRenderer",
            "secondaryContents",
            "sectionListRenderer",
            "contents",
        ],
    ];

    let mut items = Vec::new();
    for path in SECTION_PATHS {
        let Some(sections) = nav(response, path).and_then(Value::as_array) else {
            continue;
        };
        for section in sections {
            for shelf in ["musicShelfRenderer", "musicPlaylistShelfRenderer"] {
                if let Some(contents) = nav(section, &[shelf, "contents"]).and_then(Value::as_array) {
                    items.extend(contents.iter().filter_map(|item| {
                        item.get("musicResponsiveListItemRenderer")
                            .and_then(shape_list_item)
                            .map(Value::Object)
                    }));
                }
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_walks_objects_and_arrays() {
        let value = json!({"a": {"b": [{"c": 1}, {"c": 2}]}});
        assert_eq!(nav(&value, &["a", "b", "1", "c"]), Some(&json!(2)));
        assert_eq!(nav(&value, &["a", "missing"]), None);
        assert_eq!(nav(&value, &["a", "b", "9"]), None);
    }

    #[test]
    fn test_runs_text_joins_runs() {
        let node = json!({"runs": [{"text": "Artist"}, {"text": " • "}, {"text": "Album"}]});
        assert_eq!(runs_text(&node).as_deref(), Some("Artist • Album"));
        assert_eq!(runs_text(&json!({"runs": []})), None);
        assert_eq!(runs_text(&json!({})), None);
    }

    #[test]
    fn test_shape_search_result() {
        let item = json!({
            "musicResponsiveListItemRenderer": {
                "playlistItemData": {"videoId": "abc123"},
                "flexColumns": [
                    {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "Song Title"}]}}},
                    {"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "Some Artist"}]}}}
                ],
                "thumbnail": {"musicThumbnailRenderer": {"thumbnail": {"thumbnails": [{"url": "u", "width": 60}]}}}
            }
        });
        let record = shape_search_result(&item, "song").unwrap();
        assert_eq!(record["resultType"], "song");
        assert_eq!(record["title"], "Song Title");
        assert_eq!(record["videoId"], "abc123");
        assert_eq!(record["subtitle"], "Some Artist");
        assert_eq!(record["thumbnails"][0]["width"], 60);
    }

    #[test]
    fn test_shape_search_result_without_title_is_dropped() {
        let item = json!({"musicResponsiveListItemRenderer": {"flexColumns": []}});
        assert!(shape_search_result(&item, "album").is_none());
    }

    fn watch_response() -> Value {
        json!({
            "contents": {"singleColumnMusicWatchNextResultsRenderer": {"tabbedRenderer": {"watchNextTabbedResultsRenderer": {"tabs": [
                {"tabRenderer": {"content": {"musicQueueRenderer": {"content": {"playlistPanelRenderer": {"contents": [
                    {"playlistPanelVideoRenderer": {
                        "videoId": "vid1",
                        "title": {"runs": [{"text": "Current Track"}]},
                        "lengthText": {"runs": [{"text": "3:45"}]}
                    }}
                ]}}}}}},
                {"tabRenderer": {"endpoint": {"browseEndpoint": {"browseId": "MPLYt_abc"}}}}
            ]}}}}
        })
    }

    #[test]
    fn test_watch_playlist_tracks_and_lyrics_id() {
        let response = watch_response();
        let tracks = watch_playlist_tracks(&response);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0]["videoId"], "vid1");
        assert_eq!(tracks[0]["title"], "Current Track");
        assert_eq!(tracks[0]["length"], "3:45");
        assert_eq!(watch_playlist_lyrics_id(&response).as_deref(), Some("MPLYt_abc"));
    }

    #[test]
    fn test_watch_playlist_without_lyrics_tab() {
        let response = json!({
            "contents": {"singleColumnMusicWatchNextResultsRenderer": {"tabbedRenderer": {"watchNextTabbedResultsRenderer": {"tabs": [
                {"tabRenderer": {}}
            ]}}}}
        });
        assert_eq!(watch_playlist_lyrics_id(&response), None);
    }

    #[test]
    fn test_lyrics_text() {
        let response = json!({
            "contents": {"sectionListRenderer": {"contents": [
                {"musicDescriptionShelfRenderer": {"description": {"runs": [{"text": "Line one\r\nLine two"}]}}}
            ]}}
        });
        assert_eq!(lyrics_text(&response).as_deref(), Some("Line one\r\nLine two"));
    }

    #[test]
    fn test_shape_browse_record() {
        let response = json!({
            "header": {"musicDetailHeaderRenderer": {
                "title": {"runs": [{"text": "Greatest Hits"}]},
                "subtitle": {"runs": [{"text": "Album"}, {"text": " • "}, {"text": "2020"}]}
            }},
            "contents": {"singleColumnBrowseResultsRenderer": {"tabs": [{"tabRenderer": {"content": {"sectionListRenderer": {"contents": [
                {"musicShelfRenderer": {"contents": [
                    {"musicResponsiveListItemRenderer": {
                        "playlistItemData": {"videoId": "t1"},
                        "flexColumns": [{"musicResponsiveListItemFlexColumnRenderer": {"text": {"runs": [{"text": "Track One"}]}}}]
                    }}
                ]}}
            ]}}}}]}}
        });
        let record = shape_browse_record(&response, "MPREb_x").unwrap();
        assert_eq!(record["id"], "MPREb_x");
        assert_eq!(record["title"], "Greatest Hits");
        assert_eq!(record["subtitle"], "Album • 2020");
        assert_eq!(record["items"][0]["title"], "Track One");
        assert_eq!(record["items"][0]["videoId"], "t1");
    }

    #[test]
    fn test_shape_browse_record_empty_response() {
        assert!(shape_browse_record(&json!({}), "MPREb_x").is_none());
    }
}
