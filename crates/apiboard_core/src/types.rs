use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatImage {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchRecord {
    pub name: String,
    /// ISO-8601 timestamp as reported upstream.
    pub date_utc: String,
    pub details: Option<String>,
    pub success: Option<bool>,
    pub location: Option<String>,
    pub patch_image: Option<String>,
    pub youtube_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslationStyle {
    #[default]
    Yoda,
    Pirate,
    Minion,
    Dothraki,
    Valyrian,
}

impl TranslationStyle {
    pub const ALL: [TranslationStyle; 5] = [
        TranslationStyle::Yoda,
        TranslationStyle::Pirate,
        TranslationStyle::Minion,
        TranslationStyle::Dothraki,
        TranslationStyle::Valyrian,
    ];

    /// Path segment used by the translation endpoint.
    pub fn slug(self) -> &'static str {
        match self {
            TranslationStyle::Yoda => "yoda",
            TranslationStyle::Pirate => "pirate",
            TranslationStyle::Minion => "minion",
            TranslationStyle::Dothraki => "dothraki",
            TranslationStyle::Valyrian => "valyrian",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TranslationStyle::Yoda => "Yoda",
            TranslationStyle::Pirate => "Pirate",
            TranslationStyle::Minion => "Minion",
            TranslationStyle::Dothraki => "Dothraki",
            TranslationStyle::Valyrian => "Valyrian",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown translation style '{}'", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for TranslationStyle {
    type Err = UnknownStyle;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        TranslationStyle::ALL
            .into_iter()
            .find(|style| style.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStyle(wanted.to_string()))
    }
}

/// Endpoint-level description of one network call. The engine turns it into
/// a concrete HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Advice,
    Categories,
    CatImages { category: Option<u32> },
    Translate { style: TranslationStyle, text: String },
    LatestLaunch,
}

impl Request {
    pub fn widget(&self) -> crate::WidgetId {
        match self {
            Request::Advice => crate::WidgetId::Advice,
            Request::Categories => crate::WidgetId::Categories,
            Request::CatImages { .. } => crate::WidgetId::CatImages,
            Request::Translate { .. } => crate::WidgetId::Translation,
            Request::LatestLaunch => crate::WidgetId::Launch,
        }
    }
}

/// Extracted response body, one variant per binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Advice(String),
    Categories(Vec<Category>),
    CatImages(Vec<CatImage>),
    Translation(String),
    Launch(LaunchRecord),
}

impl Payload {
    pub fn widget(&self) -> crate::WidgetId {
        match self {
            Payload::Advice(_) => crate::WidgetId::Advice,
            Payload::Categories(_) => crate::WidgetId::Categories,
            Payload::CatImages(_) => crate::WidgetId::CatImages,
            Payload::Translation(_) => crate::WidgetId::Translation,
            Payload::Launch(_) => crate::WidgetId::Launch,
        }
    }
}
