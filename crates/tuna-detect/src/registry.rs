use crate::platform::{
    Adapter, DeezerAdapter, SoundCloudAdapter, SpotifyAdapter, YandexAdapter, YouTubeAdapter,
    YouTubeMusicAdapter,
};
use crate::track::Source;

/// How a page's hostname is matched to an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// The whole hostname, e.g. `open.spotify.com`.
    Exact(&'static str),
    /// A fragment anywhere in the hostname, e.g. `music.yandex` for every TLD.
    Contains(&'static str),
}

impl OriginRule {
    pub fn matches(&self, host: &str) -> bool {
        match self {
            Self::Exact(h) => host == *h,
            Self::Contains(fragment) => host.contains(fragment),
        }
    }
}

/// Ordered list of origin rules and the adapters they select.
///
/// Rules are evaluated in registration order and the first match wins, so a
/// subdomain with its own adapter must be registered before any broader
/// rule that would also match it.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(OriginRule, Box<dyn Adapter>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every supported service, in precedence order.
    pub fn standard() -> Self {
        Self::new()
            .with(OriginRule::Contains("music.yandex"), YandexAdapter::new())
            .with(OriginRule::Exact("open.spotify.com"), SpotifyAdapter)
            .with(OriginRule::Exact("music.youtube.com"), YouTubeMusicAdapter)
            .with(OriginRule::Contains("youtube.com"), YouTubeAdapter)
            .with(OriginRule::Exact("soundcloud.com"), SoundCloudAdapter)
            .with(OriginRule::Exact("www.deezer.com"), DeezerAdapter)
    }

    pub fn with(mut self, rule: OriginRule, adapter: impl Adapter + 'static) -> Self {
        self.entries.push((rule, Box::new(adapter)));
        self
    }

    /// The adapter for `host`, if any rule matches.
    pub fn select(&mut self, host: &str) -> Option<&mut dyn Adapter> {
        for (rule, adapter) in &mut self.entries {
            if rule.matches(host) {
                let adapter: &mut dyn Adapter = adapter.as_mut();
                return Some(adapter);
            }
        }
        None
    }

    /// Source of the adapter `host` would select.
    pub fn source_for(&self, host: &str) -> Option<Source> {
        self.entries
            .iter()
            .find(|(rule, _)| rule.matches(host))
            .map(|(_, adapter)| adapter.source())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(rule, a)| (rule, a.source())))
            .finish()
    }
}
