//! Fetch collaborators: boundary files over HTTP or from a local folder.

use std::path::PathBuf;

use formats::FeatureCollection;
use reqwest::Client;
use streaming::{BoxFuture, FetchError, Fetcher};

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<FeatureCollection, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(FeatureCollection::from_slice(&body)?)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FeatureCollection, FetchError>> {
        Box::pin(self.get(url))
    }
}

/// Serves catalog URLs as paths relative to a data folder.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches('/'))
    }

    async fn read(&self, url: &str) -> Result<FeatureCollection, FetchError> {
        let path = self.path_for(url);
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(FeatureCollection::from_slice(&body)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status(404)),
            Err(err) => Err(FetchError::Transport(format!("{}: {err}", path.display()))),
        }
    }
}

impl Fetcher for FsFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FeatureCollection, FetchError>> {
        Box::pin(self.read(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_fetcher_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("id31_dki_jakarta");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(
            folder.join("id31_dki_jakarta_district.geojson"),
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"district": "Cilandak"}, "geometry": null}
            ]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.geojson"), "not json").unwrap();

        let f = FsFetcher::new(dir.path());
        let fc = f
            .fetch("/id31_dki_jakarta/id31_dki_jakarta_district.geojson")
            .await
            .unwrap();
        assert_eq!(fc.len(), 1);
        assert_eq!(f.fetch("missing.geojson").await, Err(FetchError::Status(404)));
        assert!(matches!(f.fetch("broken.geojson").await, Err(FetchError::Decode(_))));
    }
}
