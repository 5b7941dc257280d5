use crate::{AppState, Effect, Msg, WidgetId};

/// Widgets fetched when the dashboard is first mounted. Translation waits for
/// user input since every call spends budget.
const MOUNT_ORDER: [WidgetId; 4] = [
    WidgetId::Advice,
    WidgetId::Categories,
    WidgetId::CatImages,
    WidgetId::Launch,
];

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.mark_mounted() {
                MOUNT_ORDER
                    .into_iter()
                    .filter_map(|widget| state.trigger(widget))
                    .collect()
            } else {
                Vec::new()
            }
        }
        Msg::RefreshAdvice => trigger(&mut state, WidgetId::Advice),
        Msg::CategorySelected(category) => {
            if state.select_category(category) {
                trigger(&mut state, WidgetId::CatImages)
            } else {
                Vec::new()
            }
        }
        Msg::RefreshCats => trigger(&mut state, WidgetId::CatImages),
        Msg::TranslationStyleSelected(style) => {
            state.select_style(style);
            Vec::new()
        }
        Msg::TranslationTextChanged(text) => {
            state.set_translation_text(text);
            Vec::new()
        }
        Msg::TranslateRequested => {
            if state.has_translation_text() {
                trigger(&mut state, WidgetId::Translation)
            } else {
                Vec::new()
            }
        }
        Msg::RefreshLaunch => trigger(&mut state, WidgetId::Launch),
        Msg::FetchCompleted { ticket, result } => {
            state.apply_completion(ticket, result);
            Vec::new()
        }
        Msg::Tick { now } => {
            state.advance_clock(now);
            Vec::new()
        }
    };

    (state, effects)
}

fn trigger(state: &mut AppState, widget: WidgetId) -> Vec<Effect> {
    state.trigger(widget).into_iter().collect()
}
