use clap::Parser;
use color_eyre::Result;
use portfolio_tui::app::App;
use portfolio_tui::cli::{CliArgs, Command};
use portfolio_tui::config::init_app_config;
use portfolio_tui::logging::init_logging;
use portfolio_tui::scrape::{render_report, render_report_json, scrape_pages};
use portfolio_tui::{event, summary, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config();
    let interactive = args.is_interactive(is_terminal());
    if args.wants_log_file(interactive) {
        init_logging(&config.log_file, config.debug)?;
    }
    tracing::info!(?config, interactive, "starting portfolio_tui");

    if let Some(Command::Scrape { urls, .. }) = &args.command {
        let report = scrape_pages(urls, &config.scrape_dir).await;
        if args.json {
            println!("{}", render_report_json(&report)?);
        } else {
            println!("{}", render_report(&report));
        }
        return Ok(());
    }

    // Print a summary instead of the UI when asked or when piped
    if !interactive {
        return summary::run_headless(&config, args.json).await;
    }

    let mut app = App::new(&config);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app);

    // Restore terminal
    terminal::cleanup();

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
