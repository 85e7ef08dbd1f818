pub mod categories;
pub mod questions;
pub mod quizzes;
pub mod search;
