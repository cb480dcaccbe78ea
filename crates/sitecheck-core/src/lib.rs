pub mod check;
pub mod error;
pub mod locator;
pub mod runner;
pub mod testutil;
pub mod traits;

pub use check::{PageCheck, Step, load_suite, pocket_hub_suite};
pub use error::CheckError;
pub use locator::{Locator, Role};
pub use runner::{RunConfig, run_page, run_suite};
pub use traits::PageDriver;
