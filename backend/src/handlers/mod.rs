//! HTTP request handlers

pub mod auth;
pub mod category;
pub mod dashboard;
pub mod health;
pub mod item;
pub mod movement;
pub mod spreadsheet;
pub mod user;

pub use auth::*;
pub use category::*;
pub use dashboard::*;
pub use health::*;
pub use item::*;
pub use movement::*;
pub use spreadsheet::*;
pub use user::*;
