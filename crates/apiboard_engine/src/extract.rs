//! Response-shape extraction: pulls the fields each widget renders out of the
//! raw JSON bodies returned by the upstream services.
use apiboard_core::{CatImage, Category, LaunchRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{FailureKind, FetchError};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{message}")]
    Upstream { code: Option<u16>, message: String },
    #[error("response is missing {0}")]
    Missing(&'static str),
}

impl From<ExtractError> for FetchError {
    fn from(err: ExtractError) -> Self {
        let kind = match &err {
            ExtractError::Json(_) | ExtractError::Missing(_) => FailureKind::Decode,
            ExtractError::Upstream { code, .. } => FailureKind::Upstream { code: *code },
        };
        FetchError::new(kind, err.to_string())
    }
}

#[derive(Deserialize)]
struct AdviceBody {
    slip: Option<Slip>,
}

#[derive(Deserialize)]
struct Slip {
    advice: String,
}

pub fn advice(body: &[u8]) -> Result<String, ExtractError> {
    let parsed: AdviceBody = serde_json::from_slice(body)?;
    parsed
        .slip
        .map(|slip| slip.advice)
        .ok_or(ExtractError::Missing("slip.advice"))
}

#[derive(Deserialize)]
struct RawCategory {
    id: u32,
    name: String,
}

pub fn categories(body: &[u8]) -> Result<Vec<Category>, ExtractError> {
    let parsed: Vec<RawCategory> = serde_json::from_slice(body)?;
    Ok(parsed
        .into_iter()
        .map(|raw| Category {
            id: raw.id,
            name: raw.name,
        })
        .collect())
}

#[derive(Deserialize)]
struct RawImage {
    id: String,
    url: String,
}

pub fn cat_images(body: &[u8]) -> Result<Vec<CatImage>, ExtractError> {
    let parsed: Vec<RawImage> = serde_json::from_slice(body)?;
    Ok(parsed
        .into_iter()
        .map(|raw| CatImage {
            id: raw.id,
            url: raw.url,
        })
        .collect())
}

/// Request body for the translation endpoint.
#[derive(Serialize)]
pub struct TranslateBody<'a> {
    pub text: &'a str,
}

#[derive(Deserialize)]
struct TranslationBody {
    contents: Option<Contents>,
    error: Option<UpstreamError>,
}

#[derive(Deserialize)]
struct Contents {
    translated: String,
}

#[derive(Deserialize)]
struct UpstreamError {
    code: Option<u16>,
    message: String,
}

pub fn translation(body: &[u8]) -> Result<String, ExtractError> {
    let parsed: TranslationBody = serde_json::from_slice(body)?;
    if let Some(error) = parsed.error {
        return Err(ExtractError::Upstream {
            code: error.code,
            message: error.message,
        });
    }
    parsed
        .contents
        .map(|contents| contents.translated)
        .ok_or(ExtractError::Missing("contents.translated"))
}

#[derive(Deserialize)]
struct RawLaunch {
    name: String,
    date_utc: String,
    details: Option<String>,
    success: Option<bool>,
    launchpad: Option<RawLaunchpad>,
    links: Option<RawLinks>,
}

/// The v4 API returns a bare launchpad id unless the query populates it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLaunchpad {
    Populated { name: Option<String> },
    Id(serde::de::IgnoredAny),
}

#[derive(Deserialize)]
struct RawLinks {
    patch: Option<RawPatch>,
    youtube_id: Option<String>,
}

#[derive(Deserialize)]
struct RawPatch {
    large: Option<String>,
}

pub fn launch(body: &[u8]) -> Result<LaunchRecord, ExtractError> {
    let raw: RawLaunch = serde_json::from_slice(body)?;
    let location = match raw.launchpad {
        Some(RawLaunchpad::Populated { name }) => name,
        Some(RawLaunchpad::Id(_)) | None => None,
    };
    let (patch_image, youtube_id) = match raw.links {
        Some(links) => (links.patch.and_then(|patch| patch.large), links.youtube_id),
        None => (None, None),
    };
    Ok(LaunchRecord {
        name: raw.name,
        date_utc: raw.date_utc,
        details: raw.details.filter(|d| !d.trim().is_empty()),
        success: raw.success,
        location,
        patch_image,
        youtube_id,
    })
}
