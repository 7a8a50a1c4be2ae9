//! Trivia quiz: batch retrieval from the public trivia service and the
//! linear walk through a fetched round.

pub mod client;
pub mod model;
pub mod round;

pub use client::{TriviaClient, ROUND_SIZE};
pub use model::{decode_entities, Category, Difficulty, Question};
pub use round::{Answered, Progress, QuizRound};
