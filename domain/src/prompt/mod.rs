//! Prompt domain
//!
//! Templates for the worker prompt and the judge's synthesis prompt.

mod template;

pub use template::PromptTemplate;
