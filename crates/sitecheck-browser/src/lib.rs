pub mod driver;
pub mod session;

pub use driver::BrowserPage;
pub use session::BrowserSession;
