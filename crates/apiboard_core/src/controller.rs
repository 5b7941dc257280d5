use std::fmt;
use std::time::Instant;

use board_logging::{board_debug, board_info};

use crate::{CallBudget, FetchFailure, FetchState};

/// Per-controller request sequence number. Starts at 1 for the first trigger.
pub type RequestSeq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetId {
    Advice,
    Categories,
    CatImages,
    Translation,
    Launch,
}

impl WidgetId {
    pub const ALL: [WidgetId; 5] = [
        WidgetId::Advice,
        WidgetId::Categories,
        WidgetId::CatImages,
        WidgetId::Translation,
        WidgetId::Launch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WidgetId::Advice => "advice",
            WidgetId::Categories => "categories",
            WidgetId::CatImages => "cat-images",
            WidgetId::Translation => "translation",
            WidgetId::Launch => "launch",
        }
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one issued request. Handed out by [`Controller::trigger`] and
/// echoed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub widget: WidgetId,
    pub seq: RequestSeq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRejected {
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded by a later trigger; state is untouched.
    Stale,
}

/// Drives one remote fetch through `Idle -> Loading -> Success | Error`.
///
/// Overlapping triggers are sequenced: only the most recently issued ticket
/// may write state, so a slow earlier response can never overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller<T> {
    widget: WidgetId,
    state: FetchState<T>,
    budget: Option<CallBudget>,
    last_seq: RequestSeq,
    pending: Option<RequestSeq>,
}

impl<T> Controller<T> {
    pub fn new(widget: WidgetId) -> Self {
        Self {
            widget,
            state: FetchState::Idle,
            budget: None,
            last_seq: 0,
            pending: None,
        }
    }

    pub fn with_budget(widget: WidgetId, budget: CallBudget) -> Self {
        Self {
            budget: Some(budget),
            ..Self::new(widget)
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn budget(&self) -> Option<&CallBudget> {
        self.budget.as_ref()
    }

    pub fn calls_remaining(&self, now: Instant) -> Option<u32> {
        self.budget.as_ref().map(|budget| budget.remaining_at(now))
    }

    pub fn pending(&self) -> Option<RequestTicket> {
        self.pending.map(|seq| RequestTicket {
            widget: self.widget,
            seq,
        })
    }

    /// Starts a new fetch cycle.
    ///
    /// With an exhausted budget no ticket is issued: the state turns into the
    /// limit error and any in-flight request is invalidated.
    pub fn trigger(&mut self, now: Instant) -> Result<RequestTicket, TriggerRejected> {
        if let Some(budget) = self.budget.as_mut() {
            budget.refresh(now);
            if budget.is_exhausted_at(now) {
                board_info!("{} trigger rejected: call budget exhausted", self.widget);
                self.state = FetchState::Error(budget.exhausted_message());
                self.pending = None;
                return Err(TriggerRejected::BudgetExhausted);
            }
        }

        self.last_seq += 1;
        self.pending = Some(self.last_seq);
        self.state = FetchState::Loading;
        board_debug!("{} trigger seq={}", self.widget, self.last_seq);
        Ok(RequestTicket {
            widget: self.widget,
            seq: self.last_seq,
        })
    }

    /// Applies the outcome of a request issued by [`Controller::trigger`].
    ///
    /// Budget accounting happens for every completed call, stale or not,
    /// since the upstream served it either way.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<T, FetchFailure>,
        now: Instant,
    ) -> Resolution {
        if ticket.widget != self.widget {
            return Resolution::Stale;
        }

        if let Some(budget) = self.budget.as_mut() {
            match &result {
                Ok(_) => budget.consume(now),
                Err(failure) if failure.is_rate_limit() => budget.exhaust(now),
                Err(_) => {}
            }
        }

        if self.pending != Some(ticket.seq) {
            board_debug!(
                "{} dropping stale response seq={} (pending {:?})",
                self.widget,
                ticket.seq,
                self.pending
            );
            return Resolution::Stale;
        }

        self.pending = None;
        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(failure) => {
                board_info!("{} fetch failed: {}", self.widget, failure);
                FetchState::Error(failure.user_message())
            }
        };
        Resolution::Applied
    }
}
