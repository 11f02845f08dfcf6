//! Business logic services

pub mod auth;
pub mod category;
pub mod item;
pub mod ledger;
pub mod reporting;
pub mod spreadsheet;
pub mod user;

pub use auth::AuthService;
pub use category::CategoryService;
pub use item::ItemService;
pub use ledger::LedgerService;
pub use reporting::ReportingService;
pub use spreadsheet::SpreadsheetService;
pub use user::UserService;
