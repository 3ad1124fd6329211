pub mod notify;
pub mod query;
pub mod recurrence;
pub mod reminder;
pub mod status;
pub mod store;
pub mod validation;

pub use crate::store::{ReminderStore, ReminderStoreBuilder};
