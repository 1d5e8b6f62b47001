//! HTTP client for the NASA open APIs.
//!
//! One GET per operation, no retries. Failures are logged here and returned
//! to the caller unchanged.

use anyhow::{Context, Result};
use bevy::log::error;
use reqwest::Url;
use serde_json::Value;

use crate::nasa::types::{Apod, NasaConfig, PlanetaryData};

pub struct NasaClient {
    http: reqwest::Client,
    config: NasaConfig,
}

impl NasaClient {
    pub fn new(config: NasaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { http, config })
    }

    /// Astronomy Picture of the Day
    pub async fn fetch_apod(&self) -> Result<Apod> {
        let res = async {
            let url = self.api_url("planetary/apod")?;
            let value = self.fetch_json(url).await?;
            serde_json::from_value::<Apod>(value).context("apod: unexpected payload")
        }
        .await;
        res.inspect_err(|err| error!("[NASA] apod fetch failed: {:#}", err))
    }

    /// Near-Earth-object feed, returned as-is
    pub async fn fetch_neo_feed(&self) -> Result<Value> {
        let res = async {
            let url = self.api_url("neo/rest/v1/feed")?;
            self.fetch_json(url).await
        }
        .await;
        res.inspect_err(|err| error!("[NASA] neo feed fetch failed: {:#}", err))
    }

    /// NASA image library search, returned as-is
    pub async fn search_planet_images(&self) -> Result<Value> {
        let res = async {
            let url = self.image_search_url()?;
            self.fetch_json(url).await
        }
        .await;
        res.inspect_err(|err| error!("[NASA] image search failed: {:#}", err))
    }

    /// APOD and NEO feed in parallel. Fails as soon as either request fails.
    pub async fn fetch_planetary_data(&self) -> Result<PlanetaryData> {
        let (apod, neo_feed) = tokio::try_join!(self.fetch_apod(), self.fetch_neo_feed())
            .inspect_err(|err| error!("[NASA] planetary data fetch failed: {:#}", err))?;
        Ok(PlanetaryData { apod, neo_feed })
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .with_context(|| format!("invalid NASA base url: {}", self.config.base_url))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key);
        Ok(url)
    }

    fn image_search_url(&self) -> Result<Url> {
        let base = self.config.images_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/search"))
            .with_context(|| format!("invalid image search url: {}", self.config.images_url))?;
        url.query_pairs_mut()
            .append_pair("q", &self.config.image_query)
            .append_pair("media_type", "image");
        Ok(url)
    }

    async fn fetch_json(&self, url: Url) -> Result<Value> {
        let resp = self
            .http
            .get(url.clone())
            .header("accept", "application/json")
            .send()
            .await
            .with_context(|| format!("request failed: {}", redact(&url)))?;
        let status = resp.status();
        let body = resp.text().await.context("read response")?;
        if !status.is_success() {
            anyhow::bail!("http {} for {}", status, redact(&url));
        }
        serde_json::from_str(&body).context("invalid json")
    }
}

/// Strip the api key before a url ends up in a log line
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return shown.to_string();
    }
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
