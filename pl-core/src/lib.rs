pub mod calculations;
pub mod forms;
pub mod login;
pub mod models;
pub mod todo;

pub use calculations::{ForecastConfig, ForecastConfigError, ForecastEngine};
pub use forms::{FormError, LoginForm, TodoForm};
pub use login::{LoginClient, LoginError, LoginOutcome};
pub use models::*;
pub use todo::{Todo, TodoList};
