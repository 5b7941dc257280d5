use std::time::Instant;

use board_logging::board_warn;

use crate::view_model::{CatGalleryView, DashboardView, LaunchView, TranslationView, WidgetView};
use crate::{
    CallBudget, CatImage, Category, Controller, Effect, FetchFailure, LaunchRecord, Payload,
    Request, RequestTicket, Resolution, TranslationStyle, WidgetId,
};

/// Calls per hour the translation service grants anonymous clients.
pub const TRANSLATION_CALLS_PER_HOUR: u32 = 5;

/// Number of cat images requested per search.
pub const CAT_IMAGES_PER_PAGE: u32 = 8;

/// Whole-dashboard state: one independent controller per widget plus the
/// parameters each binding templates its request with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    now: Instant,
    mounted: bool,
    advice: Controller<String>,
    categories: Controller<Vec<Category>>,
    cat_images: Controller<Vec<CatImage>>,
    selected_category: Option<u32>,
    translation: Controller<String>,
    translation_style: TranslationStyle,
    translation_text: String,
    launch: Controller<LaunchRecord>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_clock(Instant::now())
    }

    /// State whose clock starts at `now`; later time only arrives via `Msg::Tick`.
    pub fn with_clock(now: Instant) -> Self {
        Self {
            now,
            mounted: false,
            advice: Controller::new(WidgetId::Advice),
            categories: Controller::new(WidgetId::Categories),
            cat_images: Controller::new(WidgetId::CatImages),
            selected_category: None,
            translation: Controller::with_budget(
                WidgetId::Translation,
                CallBudget::hourly(TRANSLATION_CALLS_PER_HOUR),
            ),
            translation_style: TranslationStyle::default(),
            translation_text: String::new(),
            launch: Controller::new(WidgetId::Launch),
            dirty: false,
        }
    }

    /// Replaces the translation budget (e.g. a custom limit from the command line).
    pub fn with_translation_budget(mut self, budget: CallBudget) -> Self {
        self.translation = Controller::with_budget(WidgetId::Translation, budget);
        self
    }

    /// True when no widget is waiting on the network.
    pub fn is_settled(&self) -> bool {
        self.advice.state().is_settled()
            && self.categories.state().is_settled()
            && self.cat_images.state().is_settled()
            && self.translation.state().is_settled()
            && self.launch.state().is_settled()
    }

    pub fn pending_ticket(&self, widget: WidgetId) -> Option<RequestTicket> {
        match widget {
            WidgetId::Advice => self.advice.pending(),
            WidgetId::Categories => self.categories.pending(),
            WidgetId::CatImages => self.cat_images.pending(),
            WidgetId::Translation => self.translation.pending(),
            WidgetId::Launch => self.launch.pending(),
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            advice: WidgetView::from_state(self.advice.state()),
            cats: CatGalleryView {
                categories: WidgetView::from_state(self.categories.state()),
                selected_category: self.selected_category,
                images: WidgetView::from_state(self.cat_images.state()),
            },
            translation: TranslationView {
                style: self.translation_style,
                text: self.translation_text.clone(),
                result: WidgetView::from_state(self.translation.state()),
                calls_remaining: self.translation.calls_remaining(self.now).unwrap_or(0),
                calls_limit: self.translation.budget().map_or(0, CallBudget::limit),
            },
            launch: LaunchView {
                record: WidgetView::from_state(self.launch.state()),
            },
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_mounted(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    pub(crate) fn advance_clock(&mut self, now: Instant) {
        if now <= self.now {
            return;
        }
        let before = self.translation.calls_remaining(self.now);
        self.now = now;
        if self.translation.calls_remaining(self.now) != before {
            self.dirty = true;
        }
    }

    /// Returns whether the selection actually changed.
    pub(crate) fn select_category(&mut self, category: Option<u32>) -> bool {
        if self.selected_category == category {
            return false;
        }
        self.selected_category = category;
        self.dirty = true;
        true
    }

    pub(crate) fn select_style(&mut self, style: TranslationStyle) {
        if self.translation_style != style {
            self.translation_style = style;
            self.dirty = true;
        }
    }

    pub(crate) fn set_translation_text(&mut self, text: String) {
        if self.translation_text != text {
            self.translation_text = text;
            self.dirty = true;
        }
    }

    pub(crate) fn has_translation_text(&self) -> bool {
        !self.translation_text.trim().is_empty()
    }

    /// Starts a fetch cycle for `widget` and returns the network effect, or
    /// `None` when the controller refused to issue a request.
    pub(crate) fn trigger(&mut self, widget: WidgetId) -> Option<Effect> {
        let now = self.now;
        let request = self.request_for(widget);
        let issued = match widget {
            WidgetId::Advice => self.advice.trigger(now),
            WidgetId::Categories => self.categories.trigger(now),
            WidgetId::CatImages => self.cat_images.trigger(now),
            WidgetId::Translation => self.translation.trigger(now),
            WidgetId::Launch => self.launch.trigger(now),
        };
        self.dirty = true;
        issued.ok().map(|ticket| Effect::Fetch { ticket, request })
    }

    pub(crate) fn apply_completion(
        &mut self,
        ticket: RequestTicket,
        result: Result<Payload, FetchFailure>,
    ) {
        let now = self.now;
        let resolution = match ticket.widget {
            WidgetId::Advice => self.advice.resolve(
                ticket,
                expect_payload(result, |p| match p {
                    Payload::Advice(text) => Ok(text),
                    other => Err(other),
                }),
                now,
            ),
            WidgetId::Categories => self.categories.resolve(
                ticket,
                expect_payload(result, |p| match p {
                    Payload::Categories(list) => Ok(list),
                    other => Err(other),
                }),
                now,
            ),
            WidgetId::CatImages => self.cat_images.resolve(
                ticket,
                expect_payload(result, |p| match p {
                    Payload::CatImages(list) => Ok(list),
                    other => Err(other),
                }),
                now,
            ),
            WidgetId::Translation => self.translation.resolve(
                ticket,
                expect_payload(result, |p| match p {
                    Payload::Translation(text) => Ok(text),
                    other => Err(other),
                }),
                now,
            ),
            WidgetId::Launch => self.launch.resolve(
                ticket,
                expect_payload(result, |p| match p {
                    Payload::Launch(record) => Ok(record),
                    other => Err(other),
                }),
                now,
            ),
        };

        // Stale responses may still move the translation budget.
        if resolution == Resolution::Applied || ticket.widget == WidgetId::Translation {
            self.dirty = true;
        }
    }

    fn request_for(&self, widget: WidgetId) -> Request {
        match widget {
            WidgetId::Advice => Request::Advice,
            WidgetId::Categories => Request::Categories,
            WidgetId::CatImages => Request::CatImages {
                category: self.selected_category,
            },
            WidgetId::Translation => Request::Translate {
                style: self.translation_style,
                text: self.translation_text.trim().to_string(),
            },
            WidgetId::Launch => Request::LatestLaunch,
        }
    }
}

fn expect_payload<T>(
    result: Result<Payload, FetchFailure>,
    pick: impl FnOnce(Payload) -> Result<T, Payload>,
) -> Result<T, FetchFailure> {
    result.and_then(|payload| {
        pick(payload).map_err(|other| {
            board_warn!("payload for {} delivered to the wrong widget", other.widget());
            FetchFailure::Unknown(format!("unexpected {} payload", other.widget()))
        })
    })
}
