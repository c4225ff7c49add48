use once_cell::sync::Lazy;
use regex::Regex;

static YOUTUBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("Valid youtube regex")
});

static VIMEO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("Valid vimeo regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube(String),
    Vimeo(String),
}

impl VideoSource {
    /// Recognizes YouTube (`watch?v=`, `youtu.be/`, `/embed/`, `/v/`) and
    /// Vimeo (`vimeo.com/<digits>`) links. YouTube wins when both match.
    pub fn parse(url: &str) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        if let Some(id) = YOUTUBE.captures(url).and_then(|c| c.get(1)) {
            return Some(Self::YouTube(id.as_str().to_string()));
        }
        VIMEO
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|id| Self::Vimeo(id.as_str().to_string()))
    }

    pub fn embed_url(&self) -> String {
        match self {
            Self::YouTube(id) => format!("https://www.youtube.com/embed/{id}"),
            Self::Vimeo(id) => format!("https://player.vimeo.com/video/{id}"),
        }
    }
}

/// Embeddable player URL for a YouTube or Vimeo link, if it is one.
pub fn embed_url(url: &str) -> Option<String> {
    let source = VideoSource::parse(url)?;
    log::trace!("resolved video {url} to {source:?}");
    Some(source.embed_url())
}
