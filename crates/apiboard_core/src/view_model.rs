use crate::{CatImage, Category, FetchState, FetchStatus, LaunchRecord, TranslationStyle};

/// Flattened snapshot of one controller for a render template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView<T> {
    pub status: FetchStatus,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Clone> WidgetView<T> {
    pub fn from_state(state: &FetchState<T>) -> Self {
        Self {
            status: state.status(),
            data: state.data().cloned(),
            error: state.error_message().map(ToOwned::to_owned),
        }
    }
}

impl<T> Default for WidgetView<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatGalleryView {
    pub categories: WidgetView<Vec<Category>>,
    pub selected_category: Option<u32>,
    pub images: WidgetView<Vec<CatImage>>,
}

impl CatGalleryView {
    /// Name of the selected category, falling back to its id when the
    /// category list is unavailable.
    pub fn selected_label(&self) -> String {
        match self.selected_category {
            None => "all".to_string(),
            Some(id) => self
                .categories
                .data
                .as_ref()
                .and_then(|list| list.iter().find(|c| c.id == id))
                .map_or_else(|| id.to_string(), |c| c.name.clone()),
        }
    }

    /// Successful search that matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.images.status == FetchStatus::Success
            && self.images.data.as_ref().is_some_and(Vec::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationView {
    pub style: TranslationStyle,
    pub text: String,
    pub result: WidgetView<String>,
    pub calls_remaining: u32,
    pub calls_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchView {
    pub record: WidgetView<LaunchRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub advice: WidgetView<String>,
    pub cats: CatGalleryView,
    pub translation: TranslationView,
    pub launch: LaunchView,
}
