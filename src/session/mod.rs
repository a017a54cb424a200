//! Quiz session core: answers, option display order and paging.

mod mapping;
mod pagination;
mod state;

pub use mapping::{DisplayMapping, DisplayOption};
pub use pagination::{NavItem, NavState, PAGE_SIZE, Pager};
pub use state::{Feedback, OptionMark, Session, Stats, Submission};
