//! Playback deep links

use std::fmt;

/// Embed root of the playback viewer
pub const EMBED_BASE_URL: &str = "https://vidsrc.me/embed";

/// A link that opens a title, or one episode of it, in the playback viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    /// `https://vidsrc.me/embed/movie/{id}`
    Movie { external_id: String },
    /// `https://vidsrc.me/embed/tv/{id}/{season}/{episode}`
    Episode {
        external_id: String,
        season: i64,
        episode: i64,
    },
}

impl DeepLink {
    /// Full URL of the link
    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLink::Movie { external_id } => {
                write!(f, "{}/movie/{}", EMBED_BASE_URL, external_id)
            }
            DeepLink::Episode {
                external_id,
                season,
                episode,
            } => write!(f, "{}/tv/{}/{}/{}", EMBED_BASE_URL, external_id, season, episode),
        }
    }
}
