pub mod locator;
pub mod record;

pub use locator::{Locator, Strategy, StrategyChain};
pub use record::{BusinessRecord, Rating, DEFAULT_COLUMNS, NO_DESCRIPTION, NO_HOURS, NO_REVIEWS, UNKNOWN_NAME};
