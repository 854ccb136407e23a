pub mod contact;
pub mod controller;
pub mod menu;
pub mod navbar;
pub mod navigation;
pub mod reveal;
pub mod scroll_spy;
pub mod skills;

pub use crate::domain::model::{ClickOutcome, ControllerSnapshot, Deferred, TimerTask};
pub use crate::domain::ports::Page;
pub use crate::utils::error::Result;
