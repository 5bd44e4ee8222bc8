use std::io::Write;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use boxoffice_client::app::App;
use boxoffice_client::commands::{self, Command, USAGE};
use boxoffice_client::config::ClientConfig;
use boxoffice_client::ui::terminal::{render_alerts, render_navigation, render_section};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxoffice=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let app = App::new(&config);
    let _wiring = app.wire();

    if app.bootstrap().await.is_err() {
        tracing::warn!("Continuing with partially loaded data");
    }
    print_state(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::error!(%err, "Failed to read input");
                break;
            }
        };

        match commands::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => {
                println!("{}", USAGE);
                continue;
            }
            Ok(Some(Command::Show)) => {}
            Ok(Some(Command::Dismiss(number))) => {
                let notifier = app.notifier();
                match notifier.alerts().get(number - 1) {
                    Some(alert) => {
                        if !notifier.dismiss(alert.id) {
                            println!("Alert {} is already closing", number);
                        }
                    }
                    None => println!("No alert {}", number),
                }
            }
            Ok(Some(Command::Event(event))) => {
                app.dispatch(event).await;
            }
            Err(err) => {
                println!("{}", err);
                continue;
            }
        }
        print_state(&app);
    }

    tracing::info!("Shutting down");
}

fn print_state(app: &App) {
    let navigation = app.navigation();
    println!("{}", render_navigation(&navigation));
    println!("{}", render_section(app, navigation.active()));
    println!("{}", render_alerts(&app.notifier().alerts()));
}
