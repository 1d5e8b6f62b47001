//! NASA open API data types and resources

use bevy::prelude::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

/// Environment variable holding the api.nasa.gov key
pub const API_KEY_ENV: &str = "NASA_API_KEY";
/// Rate-limited public key accepted by api.nasa.gov
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Resource, Clone, Debug)]
pub struct NasaConfig {
    pub base_url: String,
    pub images_url: String,
    pub image_query: String,
    pub api_key: String,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov".to_string(),
            images_url: "https://images-api.nasa.gov".to_string(),
            image_query: "planets".to_string(),
            api_key: api_key_or_demo(std::env::var(API_KEY_ENV).ok()),
        }
    }
}

/// Use the configured key unless it is missing or blank
pub fn api_key_or_demo(value: Option<String>) -> String {
    value
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| DEMO_API_KEY.to_string())
}

/// Astronomy Picture of the Day
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Apod {
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
}

/// APOD and the near-Earth-object feed, fetched together
#[derive(Clone, Debug)]
pub struct PlanetaryData {
    pub apod: Apod,
    pub neo_feed: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NasaFeed {
    Apod,
    PlanetaryData,
    ImageSearch,
}

#[derive(Debug)]
pub enum NasaCommand {
    FetchApod,
    FetchPlanetaryData,
    SearchImages,
}

impl NasaCommand {
    pub fn feed(&self) -> NasaFeed {
        match self {
            NasaCommand::FetchApod => NasaFeed::Apod,
            NasaCommand::FetchPlanetaryData => NasaFeed::PlanetaryData,
            NasaCommand::SearchImages => NasaFeed::ImageSearch,
        }
    }
}

#[derive(Debug)]
pub enum NasaResult {
    Apod(Apod),
    PlanetaryData(PlanetaryData),
    ImageSearch(Value),
    Error { feed: NasaFeed, error: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded {
        at: DateTime<Utc>,
    },
    Failed(String),
}

impl FeedStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedStatus::Loading)
    }
}

#[derive(Resource, Debug, Default)]
pub struct NasaState {
    pub apod: FeedStatus,
    pub planetary: FeedStatus,
    pub image_search: FeedStatus,
}

impl NasaState {
    pub fn status(&self, feed: NasaFeed) -> &FeedStatus {
        match feed {
            NasaFeed::Apod => &self.apod,
            NasaFeed::PlanetaryData => &self.planetary,
            NasaFeed::ImageSearch => &self.image_search,
        }
    }

    pub fn status_mut(&mut self, feed: NasaFeed) -> &mut FeedStatus {
        match feed {
            NasaFeed::Apod => &mut self.apod,
            NasaFeed::PlanetaryData => &mut self.planetary,
            NasaFeed::ImageSearch => &mut self.image_search,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct NasaData {
    pub apod: Option<Apod>,
    pub planetary: Option<PlanetaryData>,
    pub image_search: Option<Value>,
}

#[derive(Resource)]
pub struct NasaChannels {
    pub cmd_tx: Sender<NasaCommand>,
    pub res_rx: Arc<Mutex<Receiver<NasaResult>>>,
}

/// `element_count` reported by the NEO feed, if present
pub fn neo_element_count(feed: &Value) -> Option<u64> {
    feed.get("element_count").and_then(|v| v.as_u64())
}

/// `collection.metadata.total_hits` reported by the image search, if present
pub fn image_total_hits(search: &Value) -> Option<u64> {
    search
        .get("collection")
        .and_then(|c| c.get("metadata"))
        .and_then(|m| m.get("total_hits"))
        .and_then(|v| v.as_u64())
}
