//! Browser session: a Chrome-backed [`View`](crate::view::View) and the
//! search bootstrap that puts it on a results list.

mod chrome;
mod session;

pub use chrome::ChromeView;
pub use session::open_search;
