pub mod ai;
mod assignment;
mod catalog;
mod category;
mod clipboard;
mod food;
mod portion;
mod reorder;
mod section;
mod template;
pub mod validation;

pub use assignment::*;
pub use catalog::*;
pub use category::*;
pub use clipboard::*;
pub use food::*;
pub use portion::*;
pub use reorder::*;
pub use section::*;
pub use template::*;

pub use coachdash_shared::mealplan::{Category, Family, SectionKind};
