use apiboard_core::{TranslationStyle, CAT_IMAGES_PER_PAGE};
use url::Url;

use crate::{FailureKind, FetchError};

/// Base URLs of the upstream services. Tests point every base at one mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub advice_base: Url,
    pub cat_base: Url,
    pub translate_base: Url,
    pub spacex_base: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            advice_base: production("https://api.adviceslip.com"),
            cat_base: production("https://api.thecatapi.com"),
            translate_base: production("https://api.funtranslations.com"),
            spacex_base: production("https://api.spacexdata.com"),
        }
    }
}

impl Endpoints {
    /// Routes every service to the same base URL.
    pub fn single_base(base: &str) -> Result<Self, FetchError> {
        let base = parse(base)?;
        Ok(Self {
            advice_base: base.clone(),
            cat_base: base.clone(),
            translate_base: base.clone(),
            spacex_base: base,
        })
    }

    /// `GET /advice?t={timestamp}`; the timestamp defeats upstream caching.
    pub fn advice(&self, timestamp_millis: i64) -> Result<Url, FetchError> {
        let mut url = join(&self.advice_base, "advice")?;
        url.query_pairs_mut().append_pair("t", &timestamp_millis.to_string());
        Ok(url)
    }

    pub fn categories(&self) -> Result<Url, FetchError> {
        join(&self.cat_base, "v1/categories")
    }

    pub fn cat_images(&self, category: Option<u32>) -> Result<Url, FetchError> {
        let mut url = join(&self.cat_base, "v1/images/search")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &CAT_IMAGES_PER_PAGE.to_string());
            if let Some(id) = category {
                query.append_pair("category_ids", &id.to_string());
            }
        }
        Ok(url)
    }

    pub fn translate(&self, style: TranslationStyle) -> Result<Url, FetchError> {
        join(
            &self.translate_base,
            &format!("translate/{}.json", style.slug()),
        )
    }

    pub fn latest_launch(&self) -> Result<Url, FetchError> {
        join(&self.spacex_base, "v4/launches/latest")
    }
}

// Only called with the literals above, which always parse.
fn production(raw: &'static str) -> Url {
    Url::parse(raw).unwrap_or_else(|err| panic!("built-in endpoint {raw} is invalid: {err}"))
}

fn parse(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn join(base: &Url, path: &str) -> Result<Url, FetchError> {
    let base = base.as_str().trim_end_matches('/');
    parse(&format!("{base}/{}", path.trim_start_matches('/')))
}
