//! Cover image resolution and remote cover downloads.
//!
//! An entry's `image_ref` is either an absolute URL or a symbolic cover key.
//! Anything starting with `http` goes down the remote path; everything else is
//! looked up in the bundled covers, falling back to the default cover.

use std::time::Duration;

use crate::models::{Cover, CoverAsset};
use crate::util::compact_text;

const COVER_HTTP_TIMEOUT_SECS: u64 = 10;

/// Where a cover image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Download from `url`, showing `placeholder` until it arrives or on failure.
    Remote { url: String, placeholder: Cover },
    /// A bundled cover.
    Local(&'static CoverAsset),
}

/// Route an `image_ref` to its image source.
#[must_use]
pub fn resolve_cover(image_ref: &str) -> ImageSource {
    if image_ref.starts_with("http") {
        return ImageSource::Remote {
            url: image_ref.to_string(),
            placeholder: Cover::DEFAULT,
        };
    }

    let cover = Cover::from_key(image_ref.trim()).unwrap_or_else(|| {
        tracing::debug!("Unknown cover reference {image_ref:?}; using {}", Cover::DEFAULT);
        Cover::DEFAULT
    });
    ImageSource::Local(cover.asset())
}

/// Loaded cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverImage {
    Downloaded {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// A bundled cover, resolved as requested.
    Bundled(Cover),
    /// Fallback shown because a remote cover could not be loaded.
    Placeholder(Cover),
}

/// HTTP client for remote cover images.
#[derive(Debug, Clone)]
pub struct CoverFetcher {
    client: reqwest::Client,
}

impl CoverFetcher {
    pub fn new() -> crate::Result<Self> {
        Self::with_timeout(Duration::from_secs(COVER_HTTP_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Load the image for `source`.
    ///
    /// Local sources resolve immediately. Remote failures of any kind log a
    /// warning and yield the placeholder cover.
    pub async fn load(&self, source: &ImageSource) -> CoverImage {
        match source {
            ImageSource::Local(asset) => CoverImage::Bundled(asset.cover),
            ImageSource::Remote { url, placeholder } => match self.download(url).await {
                Ok((bytes, content_type)) => CoverImage::Downloaded {
                    bytes,
                    content_type,
                },
                Err(message) => {
                    tracing::warn!("Failed to load cover {url}: {message}");
                    CoverImage::Placeholder(*placeholder)
                }
            },
        }
    }

    async fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>), String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| format!("Cover request failed: {error}"))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(format!(
                "Cover request failed with HTTP {status}: {}",
                compact_text(&body)
            ));
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|error| format!("Failed to read cover bytes: {error}"))?;
        Ok((bytes.to_vec(), content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn http_references_route_remote() {
        assert_eq!(
            resolve_cover("https://covers.example.com/a.jpg"),
            ImageSource::Remote {
                url: "https://covers.example.com/a.jpg".to_string(),
                placeholder: Cover::Book1,
            }
        );
    }

    #[test]
    fn symbolic_references_route_local() {
        let ImageSource::Local(asset) = resolve_cover("book7") else {
            panic!("expected a bundled cover");
        };
        assert_eq!(asset.cover, Cover::Book7);
        assert_eq!(asset.author, "Friedrich Nietzsche");
    }

    #[test]
    fn unknown_references_fall_back_to_default() {
        for image_ref in ["", "book0", "book10", "cover.png"] {
            assert_eq!(
                resolve_cover(image_ref),
                ImageSource::Local(Cover::DEFAULT.asset())
            );
        }
    }

    #[tokio::test]
    async fn unreachable_cover_yields_placeholder() {
        let fetcher = CoverFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let source = ImageSource::Remote {
            url: "http://127.0.0.1:9/missing.png".to_string(),
            placeholder: Cover::Book1,
        };
        assert_eq!(
            fetcher.load(&source).await,
            CoverImage::Placeholder(Cover::Book1)
        );
    }

    #[tokio::test]
    async fn local_source_needs_no_network() {
        let fetcher = CoverFetcher::new().unwrap();
        let image = fetcher.load(&resolve_cover("book3")).await;
        assert_eq!(image, CoverImage::Bundled(Cover::Book3));
    }
}
