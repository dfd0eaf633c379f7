use serde::{Deserialize, Serialize};

/// Archive formats a subtitle listing may offer but a player cannot load.
pub const UNSUPPORTED_SUBTITLE_EXTENSIONS: [&str; 3] = ["zip", "7z", "rar"];

/// A subtitle file offered by a listing service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    /// Display name, usually the release filename.
    pub name: String,
    /// Download location.
    pub url: String,
}

impl SubtitleCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Lowercased extension of the last URL path segment, if any.
    ///
    /// Query strings and fragments are ignored.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        url_extension(&self.url)
    }

    /// Whether the file can be loaded directly (not an archive).
    #[must_use]
    pub fn is_supported(&self) -> bool {
        is_supported_subtitle(&self.url)
    }
}

/// `false` for archive downloads (`.zip`, `.7z`, `.rar`), `true` otherwise.
///
/// ```
/// use tsuzuki_core::types::candidate::is_supported_subtitle;
///
/// assert!(is_supported_subtitle("https://example.org/files/Show%20-%2001.srt"));
/// assert!(!is_supported_subtitle("https://example.org/files/Show.Batch.ZIP?dl=1"));
/// ```
#[must_use]
pub fn is_supported_subtitle(url: &str) -> bool {
    url_extension(url)
        .is_none_or(|ext| !UNSUPPORTED_SUBTITLE_EXTENSIONS.contains(&ext.as_str()))
}

fn url_extension(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
