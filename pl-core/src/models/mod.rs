mod credentials;
mod financials;
mod fiscal_year;
mod parameter;

pub use credentials::LoginCredentials;
pub use financials::{ChartRecord, LineItem, LineItemBreakdown, YearlyFinancials};
pub use fiscal_year::{ForecastWindow, WINDOW_LEN, YearKind};
pub use parameter::{
    MAX_PERCENTAGE, ParameterCategory, ParameterError, ParseCategoryError,
    PercentageParameterSet, VisibilityFlags,
};
