//! Submission history persistence.
//!
//! Provides [`JsonlHistoryStore`], an append-only JSONL file that implements
//! the [`HistoryStore`](godel_application::HistoryStore) port.

mod jsonl_store;

pub use jsonl_store::JsonlHistoryStore;
