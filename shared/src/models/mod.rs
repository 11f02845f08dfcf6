//! Request models shared between the backend and its clients

pub mod category;
pub mod item;
pub mod movement;
pub mod user;

pub use category::*;
pub use item::*;
pub use movement::*;
pub use user::*;
