//! Skill vocabulary and whole-word, case-insensitive term matching.

pub mod matcher;
pub mod vocabulary;

pub use matcher::extract_skills;
pub use vocabulary::Vocabulary;
