use serde::{Deserialize, Serialize};

/// Streaming service a track state was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "yandex")]
    Yandex,
    #[serde(rename = "spotify")]
    Spotify,
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "youtube_music")]
    YouTubeMusic,
    #[serde(rename = "soundcloud")]
    SoundCloud,
    #[serde(rename = "deezer")]
    Deezer,
}

impl Source {
    pub const ALL: &[Source] = &[
        Self::Yandex,
        Self::Spotify,
        Self::YouTube,
        Self::YouTubeMusic,
        Self::SoundCloud,
        Self::Deezer,
    ];

    /// Human-readable platform name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Yandex => "Yandex",
            Self::Spotify => "Spotify",
            Self::YouTube => "YouTube",
            Self::YouTubeMusic => "YouTube Music",
            Self::SoundCloud => "SoundCloud",
            Self::Deezer => "Deezer",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Playing,
    #[default]
    Stopped,
}

/// Preview of the upcoming queued item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTrack {
    pub title: String,
    /// Empty when the platform does not show the artist in its preview.
    pub artist: String,
    #[serde(default)]
    pub cover: Option<String>,
}

/// Normalized snapshot of what a page is currently playing.
///
/// Progress and duration are milliseconds. `progress <= duration` usually
/// holds, but pages report stale values for a tick or two around seeks and
/// track changes, so consumers must not rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackState {
    pub source: Source,
    pub title: String,
    /// Display order.
    pub artists: Vec<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    pub status: PlaybackStatus,
    pub progress: u64,
    pub duration: u64,
    #[serde(default)]
    pub next_track: Option<NextTrack>,
    /// Page the track was found on (Yandex album/playlist links).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl TrackState {
    /// An empty, stopped state for `source`.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            title: String::new(),
            artists: Vec::new(),
            album: None,
            cover: None,
            status: PlaybackStatus::Stopped,
            progress: 0,
            duration: 0,
            next_track: None,
            album_url: None,
            video_id: None,
        }
    }

    /// The state sent when playback halts on a platform that clears
    /// downstream displays instead of reporting the paused snapshot.
    pub fn reset(source: Source) -> Self {
        Self::new(source)
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_wire_names() {
        let names: Vec<String> = Source::ALL
            .iter()
            .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            ["yandex", "spotify", "youtube", "youtube_music", "soundcloud", "deezer"]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut state = TrackState::new(Source::Spotify);
        state.title = "Song".into();
        state.artists = vec!["Artist".into()];
        state.status = PlaybackStatus::Playing;
        state.progress = 1_000;
        state.duration = 2_000;

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["source"], "spotify");
        assert_eq!(json["status"], "playing");
        assert_eq!(json["artists"][0], "Artist");
        assert!(json["next_track"].is_null());
        assert!(json.get("album_url").is_none());
        assert!(json.get("video_id").is_none());
    }

    #[test]
    fn test_reset_is_empty_and_stopped() {
        let state = TrackState::reset(Source::YouTube);
        assert!(!state.is_playing());
        assert!(state.title.is_empty());
        assert!(state.artists.is_empty());
        assert_eq!((state.progress, state.duration), (0, 0));
    }
}
