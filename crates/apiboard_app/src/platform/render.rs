use std::fmt::Write;

use apiboard_core::{DashboardView, FetchStatus, LaunchRecord, WidgetView};
use chrono::DateTime;

const RULE: &str = "------------------------------------------------------------";

/// Renders the whole dashboard as plain text, one block per widget.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    render_advice(&mut out, view);
    render_cats(&mut out, view);
    render_translation(&mut out, view);
    render_launch(&mut out, view);
    out.push_str(RULE);
    out.push('\n');
    out
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}\n{title}");
}

/// Shared loading/error gate. Returns the data only when the widget
/// succeeded; otherwise writes the placeholder line itself.
fn gate<'a, T>(out: &mut String, widget: &'a WidgetView<T>, idle: &str) -> Option<&'a T> {
    match widget.status {
        FetchStatus::Idle => {
            let _ = writeln!(out, "  {idle}");
            None
        }
        FetchStatus::Loading => {
            out.push_str("  Loading...\n");
            None
        }
        FetchStatus::Error => {
            let message = widget.error.as_deref().unwrap_or("Something went wrong.");
            let _ = writeln!(out, "  ! {message}");
            None
        }
        FetchStatus::Success => widget.data.as_ref(),
    }
}

fn render_advice(out: &mut String, view: &DashboardView) {
    header(out, "Advice");
    if let Some(advice) = gate(out, &view.advice, "Press 'advice' for a new piece of advice.") {
        let _ = writeln!(out, "  \"{advice}\"");
    }
}

fn render_cats(out: &mut String, view: &DashboardView) {
    let cats = &view.cats;
    header(out, &format!("Cat gallery (category: {})", cats.selected_label()));

    match cats.categories.status {
        FetchStatus::Success => {
            let names: Vec<String> = cats
                .categories
                .data
                .iter()
                .flatten()
                .map(|c| format!("{}={}", c.id, c.name))
                .collect();
            if !names.is_empty() {
                let _ = writeln!(out, "  categories: {}", names.join(", "));
            }
        }
        FetchStatus::Error => out.push_str("  ! Could not load the category list.\n"),
        FetchStatus::Idle | FetchStatus::Loading => {}
    }

    if cats.is_empty_result() {
        out.push_str("  No images found for this category.\n");
        return;
    }
    if let Some(images) = gate(out, &cats.images, "No images requested yet.") {
        for image in images {
            let _ = writeln!(out, "  - {}", image.url);
        }
    }
}

fn render_translation(out: &mut String, view: &DashboardView) {
    let t = &view.translation;
    header(
        out,
        &format!(
            "Translation ({}) | calls left: {}/{} per hour",
            t.style.display_name(),
            t.calls_remaining,
            t.calls_limit
        ),
    );
    if !t.text.trim().is_empty() {
        let _ = writeln!(out, "  text: \"{}\"", t.text.trim());
    }
    if let Some(translated) = gate(out, &t.result, "Pick a style and translate some text.") {
        let _ = writeln!(out, "  => \"{translated}\"");
    }
}

fn render_launch(out: &mut String, view: &DashboardView) {
    header(out, "Latest SpaceX launch");
    if let Some(record) = gate(out, &view.launch.record, "No launch loaded.") {
        write_launch(out, record);
    }
}

fn write_launch(out: &mut String, record: &LaunchRecord) {
    let outcome = match record.success {
        Some(true) => "successful launch",
        Some(false) => "failed launch",
        None => "outcome unknown",
    };
    let _ = writeln!(out, "  {}", record.name);
    let _ = writeln!(out, "  date: {}", format_launch_date(&record.date_utc));
    let _ = writeln!(
        out,
        "  location: {}",
        record.location.as_deref().unwrap_or("location not available")
    );
    let _ = writeln!(out, "  outcome: {outcome}");
    let _ = writeln!(
        out,
        "  details: {}",
        record.details.as_deref().unwrap_or("no details available")
    );
    if let Some(patch) = &record.patch_image {
        let _ = writeln!(out, "  patch: {patch}");
    }
    if let Some(id) = &record.youtube_id {
        let _ = writeln!(out, "  video: https://www.youtube.com/watch?v={id}");
    }
}

/// Long-form date such as "October 5, 2022"; unparseable input is shown as-is.
fn format_launch_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
