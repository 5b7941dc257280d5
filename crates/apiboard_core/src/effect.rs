use crate::{Request, RequestTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one network call and report back with the same ticket.
    Fetch {
        ticket: RequestTicket,
        request: Request,
    },
}
