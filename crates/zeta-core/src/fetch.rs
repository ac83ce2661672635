//! Remote import downloading and caching
//!
//! Remote imports are downloaded once into the job's base directory, named
//! after the last segment of their URL. An existing file with that name is
//! reused as is; there is no freshness check.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("zeta/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL has no file name to cache under: {0}")]
    NoFileName(Url),

    #[error("failed to start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: Url,
    },

    #[error("failed to write cache file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads remote imports into a cache directory
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    cache_dir: PathBuf,
}

impl RemoteFetcher {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Local file a URL is cached under.
    pub fn cache_path(&self, url: &Url) -> Result<PathBuf, FetchError> {
        let name = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(|| FetchError::NoFileName(url.clone()))?;
        Ok(self.cache_dir.join(name))
    }

    /// Return the cached copy of `url`, downloading it first if needed.
    pub fn fetch(&self, url: &Url) -> Result<PathBuf, FetchError> {
        let local = self.cache_path(url)?;
        if local.exists() {
            tracing::debug!(url = %url, path = %local.display(), "Using cached remote import");
            return Ok(local);
        }

        let runtime = tokio::runtime::Runtime::new().map_err(FetchError::Runtime)?;
        let body = runtime.block_on(self.download(url))?;

        std::fs::write(&local, &body).map_err(|source| FetchError::Write {
            path: local.clone(),
            source,
        })?;
        tracing::info!(url = %url, path = %local.display(), "Fetched remote import");

        Ok(local)
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;

        let response = client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url: url.clone(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_uses_last_segment() {
        let fetcher = RemoteFetcher::new(PathBuf::from("/site"));
        let url = Url::parse("http://cdn.example.com/kit/v2/grid.css?v=3").unwrap();
        assert_eq!(
            fetcher.cache_path(&url).unwrap(),
            PathBuf::from("/site/grid.css")
        );
    }

    #[test]
    fn cache_path_skips_trailing_slash() {
        let fetcher = RemoteFetcher::new(PathBuf::from("/site"));
        let url = Url::parse("http://cdn.example.com/kit/").unwrap();
        assert_eq!(fetcher.cache_path(&url).unwrap(), PathBuf::from("/site/kit"));
    }

    #[test]
    fn cache_path_without_segments_fails() {
        let fetcher = RemoteFetcher::new(PathBuf::from("/site"));
        let url = Url::parse("http://cdn.example.com/").unwrap();
        assert!(matches!(
            fetcher.cache_path(&url),
            Err(FetchError::NoFileName(_))
        ));
    }

    #[test]
    fn fetch_reuses_cached_file_without_network() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("reset.css"), "html{margin:0}").unwrap();

        let fetcher = RemoteFetcher::new(temp.path().to_path_buf());
        // Unroutable host: a network attempt would fail the test.
        let url = Url::parse("http://invalid.invalid/reset.css").unwrap();
        let local = fetcher.fetch(&url).unwrap();

        assert_eq!(local, temp.path().join("reset.css"));
        assert_eq!(std::fs::read_to_string(local).unwrap(), "html{margin:0}");
    }
}
