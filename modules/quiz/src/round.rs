use crate::model::Question;

/// Where a round currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<'a> {
    Question {
        /// Zero-based index of the current question.
        index: usize,
        total: usize,
        question: &'a Question,
        /// Set once the current question has been answered.
        answered: Option<Answered>,
    },
    /// Terminal: all questions walked.
    Finished { score: u32, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered {
    pub correct: bool,
}

/// A strict linear walk through one fetched batch of questions with an
/// accumulating score.
#[derive(Debug, Clone)]
pub struct QuizRound {
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answered: Option<Answered>,
}

impl QuizRound {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            answered: None,
        }
    }

    pub fn progress(&self) -> Progress<'_> {
        match self.questions.get(self.current) {
            Some(question) => Progress::Question {
                index: self.current,
                total: self.questions.len(),
                question,
                answered: self.answered,
            },
            None => Progress::Finished {
                score: self.score,
                total: self.questions.len(),
            },
        }
    }

    /// Answer the current question. Only the first answer per question
    /// counts; repeats and answers after the end are ignored (None).
    pub fn answer(&mut self, choice: &str) -> Option<bool> {
        let question = self.questions.get(self.current)?;
        if self.answered.is_some() {
            return None;
        }
        let correct = question.correct == choice;
        if correct {
            self.score += 1;
        }
        self.answered = Some(Answered { correct });
        Some(correct)
    }

    /// Move on to the next question; a no-op until the current one has
    /// been answered.
    pub fn advance(&mut self) {
        if self.answered.take().is_some() {
            self.current += 1;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }
}
