use clap::{CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "portfolio_tui", version, about = "Portfolio site previewer")]
pub struct CliArgs {
    /// Print a site summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary or scrape report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Directory holding the site's resources
    #[arg(long = "site-dir", value_name = "PATH")]
    pub site_dir: Option<String>,

    /// Override the log file location
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download web pages (HTML, PDF, ...) into a directory
    Scrape {
        /// URLs to fetch; `https://` is assumed when no scheme is given
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output directory
        #[arg(long, value_name = "PATH")]
        out: Option<String>,
    },
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dir) = &self.site_dir {
            std::env::set_var("PORTFOLIO_SITE_DIR", dir);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("PORTFOLIO_LOG_FILE", path);
        }
        if let Some(Command::Scrape { out: Some(dir), .. }) = &self.command {
            std::env::set_var("PORTFOLIO_SCRAPE_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// True when the run should open the terminal UI rather than print and exit.
    pub fn is_interactive(&self, stdout_is_terminal: bool) -> bool {
        self.command.is_none() && !self.headless && !self.json && stdout_is_terminal
    }

    /// The UI always logs to a file; one-shot runs only when asked to.
    pub fn wants_log_file(&self, interactive: bool) -> bool {
        interactive || self.debug || self.log_file.is_some()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Command};
    use clap::Parser;

    #[test]
    fn scrape_subcommand_collects_urls() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "portfolio_tui",
            "scrape",
            "example.com",
            "https://example.org/cv.pdf",
            "--out",
            "pages",
        ])?;

        match args.command {
            Some(Command::Scrape { urls, out }) => {
                assert_eq!(urls, ["example.com", "https://example.org/cv.pdf"]);
                assert_eq!(out.as_deref(), Some("pages"));
            }
            None => panic!("expected scrape subcommand"),
        }
        Ok(())
    }

    #[test]
    fn scrape_requires_a_url() {
        assert!(CliArgs::try_parse_from(["portfolio_tui", "scrape"]).is_err());
    }

    #[test]
    fn one_shot_runs_skip_the_log_file() -> Result<(), clap::Error> {
        let scrape = CliArgs::try_parse_from(["portfolio_tui", "scrape", "example.com"])?;
        assert!(!scrape.is_interactive(true));
        assert!(!scrape.wants_log_file(scrape.is_interactive(true)));

        let headless = CliArgs::try_parse_from(["portfolio_tui", "--headless"])?;
        assert!(!headless.wants_log_file(headless.is_interactive(true)));

        let piped = CliArgs::try_parse_from(["portfolio_tui"])?;
        assert!(!piped.wants_log_file(piped.is_interactive(false)));
        Ok(())
    }

    #[test]
    fn ui_or_explicit_flags_open_the_log_file() -> Result<(), clap::Error> {
        let ui = CliArgs::try_parse_from(["portfolio_tui"])?;
        assert!(ui.is_interactive(true));
        assert!(ui.wants_log_file(true));

        let debug = CliArgs::try_parse_from(["portfolio_tui", "--debug", "scrape", "example.com"])?;
        assert!(debug.wants_log_file(false));

        let logged = CliArgs::try_parse_from(["portfolio_tui", "--log-file", "run.log", "--headless"])?;
        assert!(logged.wants_log_file(false));
        Ok(())
    }

    #[test]
    fn json_flag_is_accepted_after_scrape() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["portfolio_tui", "scrape", "example.com", "--json"])?;
        assert!(args.json);
        Ok(())
    }

    #[test]
    fn help_mentions_headless_flag() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
