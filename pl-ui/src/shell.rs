//! Line-oriented command shell over the dashboard state.
//!
//! Each input line is parsed into a [`Command`] and executed against the
//! [`AppState`]. Bad input is reported and the loop keeps going; only
//! `quit` or end of input stops it.

use std::io::{self, Write};

use pl_core::calculations::metric_cards;
use pl_core::login::submit_login;
use pl_core::{LoginClient, LoginError, LoginForm, LoginOutcome, ParameterCategory, TodoForm};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::logging;
use crate::render::{render_chart, render_metrics, render_table, render_todos};
use crate::state::{AppState, Route};

const HELP: &str = "\
commands:
  show                               forecast table
  chart                              bar chart
  metrics                            summary cards
  set <category> <index|year> <value>
  toggle <category>                  show or hide a parameter row
  todo add <user> <title...>
  todo toggle <id>
  todo rm <id>
  todo list
  login <email> <password>
  log <level>                        change log filter
  help
  quit
categories: revenue-index, cost-ratio, sga-ratio
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Chart,
    Metrics,
    Set {
        category: ParameterCategory,
        /// Window index `0..=9` or a fiscal year.
        slot: usize,
        value: String,
    },
    Toggle(ParameterCategory),
    TodoAdd { user_name: String, title: String },
    TodoToggle(i64),
    TodoRemove(i64),
    TodoList,
    Login { email: String, password: String },
    Log(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown category '{0}'")]
    Category(String),

    #[error("'{0}' is not a number")]
    Number(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn category(word: Option<&&str>) -> Result<ParameterCategory, CommandError> {
    let word = word.ok_or(CommandError::Usage("<category> is required"))?;
    word.parse()
        .map_err(|_| CommandError::Category(word.to_string()))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::Number(word.to_string()))
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = words.first() else {
        return Ok(None);
    };

    let command = match (head, &words[1..]) {
        ("show", []) => Command::Show,
        ("chart", []) => Command::Chart,
        ("metrics", []) => Command::Metrics,
        ("set", [_, slot, value]) => Command::Set {
            category: category(words.get(1))?,
            slot: number(slot)?,
            value: value.to_string(),
        },
        ("set", _) => return Err(CommandError::Usage("set <category> <index|year> <value>")),
        ("toggle", [_]) => Command::Toggle(category(words.get(1))?),
        ("toggle", _) => return Err(CommandError::Usage("toggle <category>")),
        ("todo", ["add", rest @ ..]) => Command::TodoAdd {
            user_name: rest.first().copied().unwrap_or_default().to_string(),
            title: rest.get(1..).map(|t| t.join(" ")).unwrap_or_default(),
        },
        ("todo", ["toggle", id]) => Command::TodoToggle(number(id)?),
        ("todo", ["rm", id]) => Command::TodoRemove(number(id)?),
        ("todo", ["list"]) => Command::TodoList,
        ("todo", _) => return Err(CommandError::Usage("todo add|toggle|rm|list")),
        ("login", [email, password]) => Command::Login {
            email: email.to_string(),
            password: password.to_string(),
        },
        ("login", _) => return Err(CommandError::Usage("login <email> <password>")),
        ("log", [level]) => Command::Log(level.to_string()),
        ("log", _) => return Err(CommandError::Usage("log <level>")),
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub struct Shell {
    state: AppState,
    login_client: Box<dyn LoginClient>,
}

impl Shell {
    pub fn new(
        state: AppState,
        login_client: Box<dyn LoginClient>,
    ) -> Self {
        Self {
            state,
            login_client,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Small numbers address window positions, anything else a fiscal year.
    fn resolve_slot(
        &self,
        slot: usize,
    ) -> Option<usize> {
        let window = self.state.engine.window();
        if window.year_at(slot).is_some() {
            return Some(slot);
        }
        i32::try_from(slot).ok().and_then(|year| window.index_of(year))
    }

    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> io::Result<Flow> {
        match command {
            Command::Show => write!(out, "{}", render_table(&self.state.engine))?,
            Command::Chart => write!(out, "{}", render_chart(&self.state.engine.chart_data()))?,
            Command::Metrics => {
                let cards = metric_cards(&self.state.engine, self.state.company_count);
                write!(out, "{}", render_metrics(&cards))?
            }
            Command::Set {
                category,
                slot,
                value,
            } => {
                let Some(index) = self.resolve_slot(slot) else {
                    writeln!(out, "{slot} is outside the forecast window")?;
                    return Ok(Flow::Continue);
                };
                match self.state.engine.set_parameter_str(category, index, &value) {
                    Ok(()) => writeln!(
                        out,
                        "{category}[{index}] = {}",
                        self.state.engine.parameters().get(category, index)
                    )?,
                    Err(e) => {
                        debug!(%category, index, input = %value, error = %e, "edit rejected");
                        writeln!(out, "unchanged: {e}")?
                    }
                }
            }
            Command::Toggle(category) => {
                let visible = self.state.engine.toggle_visibility(category);
                let shown = if visible { "shown" } else { "hidden" };
                writeln!(out, "{} row {shown}", category.label())?
            }
            Command::TodoAdd { user_name, title } => {
                match self.state.todos.add(&TodoForm::new(user_name, title)) {
                    Ok(todo) => writeln!(out, "added todo {}", todo.id)?,
                    Err(errors) => {
                        for error in errors {
                            writeln!(out, "{error}")?;
                        }
                    }
                }
            }
            Command::TodoToggle(id) => {
                if !self.state.todos.toggle(id) {
                    writeln!(out, "no todo with id {id}")?;
                }
            }
            Command::TodoRemove(id) => {
                if !self.state.todos.remove(id) {
                    writeln!(out, "no todo with id {id}")?;
                }
            }
            Command::TodoList => {
                self.state.route = Route::Todos;
                write!(out, "{}", render_todos(&self.state.todos))?
            }
            Command::Login { email, password } => {
                let form = LoginForm::new(email, password);
                match submit_login(self.login_client.as_ref(), &form).await {
                    Ok(LoginOutcome::Success { redirect }) => {
                        self.state.navigate(&redirect);
                        writeln!(out, "login succeeded, now on {redirect}")?
                    }
                    Ok(LoginOutcome::Rejected { status }) => {
                        writeln!(out, "login failed (status {status})")?
                    }
                    Err(LoginError::Validation(errors)) => {
                        for error in errors {
                            writeln!(out, "{error}")?;
                        }
                    }
                    Err(e @ LoginError::Network(_)) => writeln!(out, "{e}")?,
                }
            }
            Command::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => writeln!(out, "log level set to {level}")?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Help => write!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        write!(out, "> ")?;
        out.flush()?;

        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if self.execute(command, out).await? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "{e}")?,
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }
}
