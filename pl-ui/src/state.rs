//! Application state for the dashboard shell.
//!
//! Everything here lives in memory for one session only.

use pl_core::login::DASHBOARD_ROUTE;
use pl_core::{ForecastEngine, TodoList};

/// Page the session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Dashboard,
    Todos,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => DASHBOARD_ROUTE,
            Route::Todos => "/todos",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        [Route::Login, Route::Dashboard, Route::Todos]
            .into_iter()
            .find(|route| route.path() == path)
    }
}

/// Session-wide state shared by every shell command.
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: ForecastEngine,
    pub todos: TodoList,
    /// Number of companies the metric-card averages are divided by.
    pub company_count: u32,
    pub route: Route,
}

impl AppState {
    pub fn new(
        engine: ForecastEngine,
        company_count: u32,
    ) -> Self {
        Self {
            engine,
            todos: TodoList::new(),
            company_count,
            route: Route::default(),
        }
    }

    /// Moves to the page at `path`. Unknown paths leave the route unchanged.
    pub fn navigate(
        &mut self,
        path: &str,
    ) -> bool {
        match Route::from_path(path) {
            Some(route) => {
                self.route = route;
                true
            }
            None => false,
        }
    }
}
