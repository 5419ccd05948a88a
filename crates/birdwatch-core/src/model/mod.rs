mod account;
mod alert;
mod analytics;
mod session;
#[cfg(test)]
mod tests;

pub use account::*;
pub use alert::*;
pub use analytics::*;
pub use session::*;
