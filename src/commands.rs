//! Line commands understood by the terminal host.

use thiserror::Error;

use crate::ui::events::{ReportRequest, UiEvent};

pub const USAGE: &str = "\
Commands:
  nav <overview|tickets|reports>
  refresh <now-playing|upcoming|movies|today|tickets>
  select <customer|showtime|history-customer|q2-showtime|q4-movie|profit-movie> [value]
  purchase
  q1 <date> <title...>    movie showtimes on a date
  q2                      availability of the q2-showtime selection
  q3 [limit]              top concession categories
  q4                      lifetime sales of the q4-movie selection
  q5 [days]               upcoming showtimes
  daily <date>            ticket sales on a date
  profit                  net profit of the profit-movie selection
  dismiss <n>             dismiss alert number n
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Dismiss(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Required inputs of forms are not checked here; an empty title or date is
/// passed through so the form raises its own warning.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let first = args.first().copied().unwrap_or_default();

    let command = match name.to_lowercase().as_str() {
        "nav" => {
            let section = first
                .parse()
                .map_err(|_| CommandError::Usage("nav <overview|tickets|reports>"))?;
            Command::Event(UiEvent::Navigate(section))
        }
        "refresh" => {
            let refresh = first.parse().map_err(CommandError::Invalid)?;
            Command::Event(UiEvent::Refresh(refresh))
        }
        "select" => {
            let control = first.parse().map_err(CommandError::Invalid)?;
            Command::Event(UiEvent::SelectChanged {
                control,
                value: args.get(1).copied().unwrap_or_default().to_string(),
            })
        }
        "purchase" => Command::Event(UiEvent::SubmitPurchase),
        "q1" => report(ReportRequest::MovieShowtimes {
            date: first.to_string(),
            title: args.get(1..).unwrap_or_default().join(" "),
        }),
        "q2" => report(ReportRequest::ShowtimeAvailability),
        "q3" => report(ReportRequest::ConcessionRevenue {
            limit: first.to_string(),
        }),
        "q4" => report(ReportRequest::MovieLifetimeSales),
        "q5" => report(ReportRequest::UpcomingShowtimes {
            days_ahead: first.to_string(),
        }),
        "daily" => report(ReportRequest::DailyTicketSales {
            date: first.to_string(),
        }),
        "profit" => report(ReportRequest::MovieProfit),
        "dismiss" => {
            let index = first
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(CommandError::Usage("dismiss <n>"))?;
            Command::Dismiss(index)
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

fn report(request: ReportRequest) -> Command {
    Command::Event(UiEvent::SubmitReport(request))
}
