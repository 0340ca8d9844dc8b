//! Question answering over generated unifier artifacts.
//!
//! Loads the CSV and report produced by a pipeline run into a small
//! knowledge base, then answers questions by keyword dispatch: counting
//! and price questions get computed answers, everything else gets the
//! relevant raw context echoed back.

pub mod answer;
pub mod knowledge;

pub use answer::answer_question;
pub use knowledge::KnowledgeBase;
