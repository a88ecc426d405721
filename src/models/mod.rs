mod entry;
pub use entry::{Entry, EntryChanges};
