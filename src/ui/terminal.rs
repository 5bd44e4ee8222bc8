//! Plain-text rendering of regions for the terminal host.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::app::App;

use super::navigation::{Navigation, Section};
use super::notifier::{Alert, AlertPhase};
use super::panel::{PanelView, Tone};
use super::region::{Phase, Region};
use super::select::SelectView;
use super::table::{TableRow, TableView};

pub fn render_navigation(navigation: &Navigation) -> String {
    navigation
        .items()
        .into_iter()
        .map(|(section, active)| {
            if active {
                format!("[{}]", section)
            } else {
                format!(" {} ", section)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_table(region: &Region<TableView>) -> String {
    let view = region.snapshot();
    let mut builder = Builder::default();
    builder.push_record(view.columns.iter().map(|c| c.to_string()));
    for row in &view.rows {
        match row {
            TableRow::Cells(cells) => builder.push_record(cells.clone()),
            TableRow::Placeholder { message, colspan } => {
                let mut cells = vec![String::new(); *colspan];
                if let Some(first) = cells.first_mut() {
                    *first = message.clone();
                }
                builder.push_record(cells);
            }
        }
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{}{}\n{}", region.name(), phase_suffix(region.phase()), table)
}

pub fn render_select(region: &Region<SelectView>) -> String {
    let view = region.snapshot();
    let current = view
        .options
        .iter()
        .find(|option| option.value == view.selected)
        .map(|option| option.label.as_str())
        .unwrap_or_default();
    let values = view
        .choices()
        .iter()
        .map(|option| option.value.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}{}: {} (options: {})",
        region.name(),
        phase_suffix(region.phase()),
        current,
        if values.is_empty() { "none" } else { values.as_str() }
    )
}

pub fn render_panel(region: &Region<PanelView>) -> Option<String> {
    let panel = region.snapshot().panel?;
    let tone = match panel.tone {
        Tone::Success => "success",
        Tone::Info => "info",
        Tone::Danger => "danger",
        Tone::Dark => "dark",
    };
    Some(format!("{} [{}]\n{}", region.name(), tone, panel.text()))
}

/// Alerts numbered from 1 in stack order, as used by `dismiss <n>`.
pub fn render_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No alerts".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["#", "Severity", "Message", ""].map(String::from));
    for (index, alert) in alerts.iter().enumerate() {
        let state = match (alert.phase, alert.expires) {
            (AlertPhase::Hiding, _) => "hiding",
            (AlertPhase::Shown, false) => "pinned",
            (AlertPhase::Shown, true) => "",
        };
        builder.push_record([
            (index + 1).to_string(),
            alert.severity.to_string(),
            alert.message.clone(),
            state.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Every region of `section`, top to bottom.
pub fn render_section(app: &App, section: Section) -> String {
    let mut blocks = vec![format!("== {} ==", section)];
    match section {
        Section::Overview => {
            blocks.push(render_table(&app.overview.now_playing));
            blocks.push(render_table(&app.overview.upcoming));
            blocks.push(render_table(&app.overview.all_movies));
        }
        Section::Tickets => {
            let tickets = &app.tickets;
            blocks.push(render_select(&tickets.customer));
            blocks.push(render_select(&tickets.showtime));
            blocks.extend(render_panel(&tickets.purchase_result));
            blocks.push(render_table(&tickets.today));
            blocks.push(render_table(&tickets.all));
            blocks.push(render_select(&tickets.history_customer));
            blocks.push(render_table(&tickets.history));
        }
        Section::Reports => {
            let reports = &app.reports;
            blocks.push(render_select(&reports.availability_showtime));
            blocks.push(render_select(&reports.lifetime_sales_movie));
            blocks.push(render_select(&reports.profit_movie));
            for form in [
                &reports.movie_showtimes,
                &reports.availability,
                &reports.concessions,
                &reports.lifetime_sales,
                &reports.upcoming,
                &reports.daily_sales,
                &reports.profit,
            ] {
                blocks.extend(render_panel(&form.panel));
                if let Some(table) = &form.table {
                    if table.phase() == Phase::Rendered {
                        blocks.push(render_table(table));
                    }
                }
            }
        }
    }
    blocks.join("\n\n")
}

fn phase_suffix(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle | Phase::Rendered => "",
        Phase::Fetching => " (loading)",
        Phase::Failed => " (failed)",
    }
}
