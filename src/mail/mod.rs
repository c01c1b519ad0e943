//! Mail item access and field extraction

mod export;
mod item;
mod parser;
mod reader;
pub mod types;

pub use item::{HostItem, MailItem};
pub use reader::read_email;
pub use types::EmailData;

#[cfg(test)]
pub use item::{BodyError, fake};
