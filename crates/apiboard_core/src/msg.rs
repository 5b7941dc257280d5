use std::time::Instant;

use crate::{FetchFailure, Payload, RequestTicket, TranslationStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard placed on screen; every widget performs its initial fetch.
    Mounted,
    /// User asked for a new piece of advice.
    RefreshAdvice,
    /// User picked a cat category (`None` means all categories).
    CategorySelected(Option<u32>),
    /// User asked for new cat images in the current category.
    RefreshCats,
    /// User picked a translation style.
    TranslationStyleSelected(TranslationStyle),
    /// User edited the text to translate.
    TranslationTextChanged(String),
    /// User asked to translate the current text.
    TranslateRequested,
    /// User asked to reload the latest launch.
    RefreshLaunch,
    /// Engine completion for a previously issued request.
    FetchCompleted {
        ticket: RequestTicket,
        result: Result<Payload, FetchFailure>,
    },
    /// Clock tick; advances the state's notion of time for call budgets.
    Tick { now: Instant },
}
