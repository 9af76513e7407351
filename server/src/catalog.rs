//! Third-party catalog client.
//!
//! Client-credentials grant against the accounts endpoint, then a track
//! search filtered to one release year. The proxy keeps no auth state: a
//! fresh token is fetched per lookup. Result diversity comes from three
//! uniform samples — the year inside the category's range, the pagination
//! offset, and the picked item of the returned page.

use std::time::Duration;

use chrono::Datelike;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tune_teaser::{Category, Track};

const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SEARCH_URL: &str = "https://api.spotify.com/v1/search";
/// Search result window per request.
const SEARCH_LIMIT: u32 = 50;
/// Exclusive upper bound for the random pagination offset.
const MAX_SEARCH_OFFSET: u32 = 1_000;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("token request failed")]
    Auth(#[source] reqwest::Error),
    #[error("token request rejected: HTTP {0}")]
    AuthStatus(reqwest::StatusCode),
    #[error("search request failed")]
    Search(#[source] reqwest::Error),
    #[error("search rejected: HTTP {0}")]
    SearchStatus(reqwest::StatusCode),
    #[error("no tracks found for year {0}")]
    NoTracks(i32),
}

pub struct CatalogClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
}

impl CatalogClient {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            client_id,
            client_secret,
        })
    }

    /// Exchange the configured client credentials for a bearer token.
    pub async fn access_token(&self) -> Result<String, CatalogError> {
        let resp = self
            .http
            .post(ACCOUNTS_TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(CatalogError::Auth)?;
        if !resp.status().is_success() {
            return Err(CatalogError::AuthStatus(resp.status()));
        }
        let token: TokenResponse = resp.json().await.map_err(CatalogError::Auth)?;
        Ok(token.access_token)
    }

    /// Look up one random track for the category.
    pub async fn random_track(&self, category: Category) -> Result<Track, CatalogError> {
        let token = self.access_token().await?;

        let (start, end) = category.year_range(chrono::Utc::now().year());
        let (year, offset) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(start..=end), rng.gen_range(0..MAX_SEARCH_OFFSET))
        };

        let resp = self
            .http
            .get(SEARCH_URL)
            .bearer_auth(&token)
            .query(&[
                ("q", format!("year:{year}")),
                ("type", "track".to_string()),
                ("limit", SEARCH_LIMIT.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await
            .map_err(CatalogError::Search)?;
        if !resp.status().is_success() {
            return Err(CatalogError::SearchStatus(resp.status()));
        }
        let page: SearchResponse = resp.json().await.map_err(CatalogError::Search)?;

        let mut items = page.tracks.map(|t| t.items).unwrap_or_default();
        if items.is_empty() {
            return Err(CatalogError::NoTracks(year));
        }
        let pick = rand::thread_rng().gen_range(0..items.len());
        Ok(flatten_track(items.swap_remove(pick)))
    }
}

/// Collapse the catalog's nested track shape into the game payload: first
/// artist, first album image, empty strings where the catalog has gaps.
fn flatten_track(track: CatalogTrack) -> Track {
    Track {
        id: track.id,
        title: track.name,
        artist: track
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default(),
        preview: track.preview_url.unwrap_or_default(),
        artwork: track
            .album
            .images
            .into_iter()
            .next()
            .map(|i| i.url)
            .unwrap_or_default(),
    }
}

// --- Wire models ---------------------------------------------------------------

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Deserialize)]
struct TrackPage {
    items: Vec<CatalogTrack>,
}

#[derive(Deserialize)]
struct CatalogTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<CatalogArtist>,
    album: CatalogAlbum,
    preview_url: Option<String>,
}

#[derive(Deserialize)]
struct CatalogArtist {
    name: String,
}

#[derive(Deserialize)]
struct CatalogAlbum {
    #[serde(default)]
    images: Vec<CatalogImage>,
}

#[derive(Deserialize)]
struct CatalogImage {
    url: String,
}
