use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pl_core::login::submit_login;
use pl_core::{LoginError, LoginForm, LoginOutcome, ParameterCategory};
use tokio::io::BufReader;
use tracing::{debug, info};

use pl_ui::config::DashboardConfig;
use pl_ui::login::HttpLoginClient;
use pl_ui::shell::Shell;
use pl_ui::state::AppState;
use pl_ui::{app, logging, render};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Ten-year profit and loss forecast dashboard.
///
/// Prints the forecast, runs an interactive shell over it, or sends a single
/// login request.
#[derive(Debug, Parser)]
#[command(name = "PlDashboard")]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `pl_core=trace`. Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print metric cards, the forecast table and the bar chart.
    Forecast {
        /// Print the chart dataset as JSON instead.
        #[arg(long)]
        json: bool,

        /// Parameter CSV with `category,index,value` rows.
        #[arg(long)]
        params: Option<PathBuf>,

        /// Show the editable row for a category. Repeatable.
        #[arg(long = "show", value_name = "CATEGORY")]
        show: Vec<ParameterCategory>,
    },

    /// Interactive command shell.
    Shell {
        /// Parameter CSV loaded before the first prompt.
        #[arg(long)]
        params: Option<PathBuf>,
    },

    /// Send one login request and report the result.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Base URL. Overrides `[login] endpoint`.
        #[arg(long)]
        endpoint: Option<String>,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        DashboardConfig::load_or_default(cli.config.as_deref()).context("cannot load config")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init_logging(&config.logging)?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Forecast { json, params, show } => {
            let mut engine = app::build_engine(&config, params.as_deref())?;
            for category in show {
                if !engine.visibility().is_visible(category) {
                    engine.toggle_visibility(category);
                }
            }

            if json {
                println!("{}", render::chart_json(&engine.chart_data())?);
            } else {
                print!("{}", app::forecast_report(&engine, config.forecast.company_count));
            }
        }

        Command::Shell { params } => {
            let engine = app::build_engine(&config, params.as_deref())?;
            let state = AppState::new(engine, config.forecast.company_count);
            let client = HttpLoginClient::new(&config.login.endpoint);
            info!(url = client.url(), "shell started");

            let mut shell = Shell::new(state, Box::new(client));
            shell
                .run(BufReader::new(tokio::io::stdin()), &mut io::stdout())
                .await?;
        }

        Command::Login {
            email,
            password,
            endpoint,
        } => {
            let base = endpoint.unwrap_or(config.login.endpoint);
            let client = HttpLoginClient::new(&base);

            match submit_login(&client, &LoginForm::new(email, password)).await {
                Ok(LoginOutcome::Success { redirect }) => {
                    println!("login succeeded, redirect to {redirect}");
                }
                Ok(LoginOutcome::Rejected { status }) => {
                    anyhow::bail!("login rejected with status {status}");
                }
                Err(LoginError::Validation(errors)) => {
                    for error in &errors {
                        eprintln!("{error}");
                    }
                    anyhow::bail!("login form is invalid");
                }
                Err(e) => return Err(e).context(format!("POST {} failed", client.url())),
            }
        }
    }

    Ok(())
}
