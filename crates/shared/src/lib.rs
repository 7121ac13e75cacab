mod command;
mod event;
pub mod mealplan;

pub use command::*;
pub use event::*;
