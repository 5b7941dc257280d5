use std::time::{Duration, Instant};

use apiboard_core::{
    CallBudget, Controller, FetchFailure, FetchStatus, Resolution, TriggerRejected, WidgetId,
};

fn init_logging() {
    board_logging::initialize_for_tests();
}

#[test]
fn successful_fetch_moves_through_loading_to_success() {
    init_logging();
    let now = Instant::now();
    let mut controller: Controller<String> = Controller::new(WidgetId::Advice);
    assert_eq!(controller.state().status(), FetchStatus::Idle);

    let ticket = controller.trigger(now).expect("no budget configured");
    assert_eq!(controller.state().status(), FetchStatus::Loading);
    assert_eq!(ticket.seq, 1);

    let resolution = controller.resolve(ticket, Ok("Be kind.".to_string()), now);
    assert_eq!(resolution, Resolution::Applied);
    assert_eq!(controller.state().status(), FetchStatus::Success);
    assert_eq!(controller.state().data().map(String::as_str), Some("Be kind."));
    assert!(controller.state().error_message().is_none());
}

#[test]
fn retrigger_from_error_and_success_goes_back_to_loading() {
    init_logging();
    let now = Instant::now();
    let mut controller: Controller<u32> = Controller::new(WidgetId::Launch);

    let ticket = controller.trigger(now).unwrap();
    controller.resolve(ticket, Err(FetchFailure::HttpStatus(500)), now);
    assert_eq!(controller.state().status(), FetchStatus::Error);

    let ticket = controller.trigger(now).unwrap();
    assert_eq!(controller.state().status(), FetchStatus::Loading);
    assert!(controller.state().error_message().is_none());
    controller.resolve(ticket, Ok(7), now);
    assert_eq!(controller.state().data(), Some(&7));

    controller.trigger(now).unwrap();
    assert_eq!(controller.state().status(), FetchStatus::Loading);
    assert!(controller.state().data().is_none());
}

#[test]
fn every_failure_kind_yields_a_non_empty_message() {
    init_logging();
    let now = Instant::now();
    let failures = [
        FetchFailure::Network(String::new()),
        FetchFailure::HttpStatus(503),
        FetchFailure::RateLimited,
        FetchFailure::Upstream(String::new()),
        FetchFailure::Unknown(String::new()),
    ];

    for failure in failures {
        let mut controller: Controller<()> = Controller::new(WidgetId::CatImages);
        let ticket = controller.trigger(now).unwrap();
        controller.resolve(ticket, Err(failure.clone()), now);
        assert_eq!(controller.state().status(), FetchStatus::Error, "{failure}");
        let message = controller.state().error_message().unwrap();
        assert!(!message.is_empty(), "{failure}");
    }
}

#[test]
fn http_failure_message_embeds_status_code() {
    let now = Instant::now();
    let mut controller: Controller<()> = Controller::new(WidgetId::Advice);
    let ticket = controller.trigger(now).unwrap();
    controller.resolve(ticket, Err(FetchFailure::HttpStatus(404)), now);
    assert!(controller.state().error_message().unwrap().contains("404"));
}

#[test]
fn rate_limit_forces_remaining_calls_to_zero() {
    init_logging();
    let now = Instant::now();
    let mut controller: Controller<String> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(5));
    assert_eq!(controller.calls_remaining(now), Some(5));

    let ticket = controller.trigger(now).unwrap();
    controller.resolve(ticket, Err(FetchFailure::RateLimited), now);

    assert_eq!(controller.calls_remaining(now), Some(0));
    assert!(controller.state().error_message().unwrap().contains("rate limit"));
}

#[test]
fn exhausted_budget_rejects_trigger_without_ticket() {
    init_logging();
    let now = Instant::now();
    let mut controller: Controller<String> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(2));

    for _ in 0..2 {
        let ticket = controller.trigger(now).unwrap();
        controller.resolve(ticket, Ok("done".into()), now);
    }
    assert_eq!(controller.calls_remaining(now), Some(0));

    let rejected = controller.trigger(now);
    assert_eq!(rejected, Err(TriggerRejected::BudgetExhausted));
    assert_eq!(controller.state().status(), FetchStatus::Error);
    assert!(controller.state().error_message().unwrap().contains("per hour"));
    assert!(controller.pending().is_none());
    assert_eq!(controller.calls_remaining(now), Some(0));
}

#[test]
fn failed_calls_do_not_spend_budget() {
    let now = Instant::now();
    let mut controller: Controller<String> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(3));
    let ticket = controller.trigger(now).unwrap();
    controller.resolve(ticket, Err(FetchFailure::HttpStatus(500)), now);
    assert_eq!(controller.calls_remaining(now), Some(3));
}

#[test]
fn budget_comes_back_after_the_window() {
    let t0 = Instant::now();
    let mut controller: Controller<String> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(1));
    let ticket = controller.trigger(t0).unwrap();
    controller.resolve(ticket, Ok("one".into()), t0);
    assert!(controller.trigger(t0 + Duration::from_secs(60)).is_err());

    let later = t0 + Duration::from_secs(3600);
    assert_eq!(controller.calls_remaining(later), Some(1));
    assert!(controller.trigger(later).is_ok());
}

#[test]
fn older_response_never_overwrites_newer_one() {
    init_logging();
    let now = Instant::now();
    let mut controller: Controller<&'static str> = Controller::new(WidgetId::CatImages);
    let first = controller.trigger(now).unwrap();
    let second = controller.trigger(now).unwrap();
    assert!(second.seq > first.seq);

    assert_eq!(controller.resolve(second, Ok("new"), now), Resolution::Applied);
    assert_eq!(controller.resolve(first, Ok("old"), now), Resolution::Stale);
    assert_eq!(controller.state().data(), Some(&"new"));
}

#[test]
fn early_stale_response_keeps_loading() {
    let now = Instant::now();
    let mut controller: Controller<&'static str> = Controller::new(WidgetId::Advice);
    let first = controller.trigger(now).unwrap();
    let _second = controller.trigger(now).unwrap();

    assert_eq!(
        controller.resolve(first, Err(FetchFailure::Network("reset".into())), now),
        Resolution::Stale
    );
    assert_eq!(controller.state().status(), FetchStatus::Loading);
}

#[test]
fn stale_success_still_spends_budget() {
    let now = Instant::now();
    let mut controller: Controller<&'static str> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(5));
    let first = controller.trigger(now).unwrap();
    let second = controller.trigger(now).unwrap();

    controller.resolve(second, Ok("b"), now);
    controller.resolve(first, Ok("a"), now);

    assert_eq!(controller.calls_remaining(now), Some(3));
    assert_eq!(controller.state().data(), Some(&"b"));
}

#[test]
fn rejection_invalidates_in_flight_request() {
    let now = Instant::now();
    let mut controller: Controller<&'static str> =
        Controller::with_budget(WidgetId::Translation, CallBudget::hourly(1));
    let first = controller.trigger(now).unwrap();
    let second = controller.trigger(now).unwrap();
    controller.resolve(first, Err(FetchFailure::RateLimited), now);

    assert!(controller.trigger(now).is_err());
    assert_eq!(controller.resolve(second, Ok("late"), now), Resolution::Stale);
    assert_eq!(controller.state().status(), FetchStatus::Error);
}

#[test]
fn duplicate_completion_is_ignored() {
    let now = Instant::now();
    let mut controller: Controller<u8> = Controller::new(WidgetId::Launch);
    let ticket = controller.trigger(now).unwrap();
    assert_eq!(controller.resolve(ticket, Ok(1), now), Resolution::Applied);
    assert_eq!(controller.resolve(ticket, Ok(2), now), Resolution::Stale);
    assert_eq!(controller.state().data(), Some(&1));
}
