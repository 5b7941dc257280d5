//! Apiboard core: pure fetch-lifecycle state machine and view-model helpers.
mod budget;
mod controller;
mod effect;
mod failure;
mod fetch_state;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use budget::{CallBudget, HOUR};
pub use controller::{Controller, RequestSeq, RequestTicket, Resolution, TriggerRejected, WidgetId};
pub use effect::Effect;
pub use failure::FetchFailure;
pub use fetch_state::{FetchState, FetchStatus};
pub use msg::Msg;
pub use state::{AppState, CAT_IMAGES_PER_PAGE, TRANSLATION_CALLS_PER_HOUR};
pub use types::{
    CatImage, Category, LaunchRecord, Payload, Request, TranslationStyle, UnknownStyle,
};
pub use update::update;
pub use view_model::{CatGalleryView, DashboardView, LaunchView, TranslationView, WidgetView};
