use rand::Rng;

use crate::game::{GameKind, MiniGame, Resolution, Transition};
use crate::level::Level;
use crate::scoring::QUIZ_CORRECT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
    pub explanation: &'static str,
}

pub static QUESTIONS: [Question; 5] = [
    Question {
        prompt: "Which one does not belong?",
        options: ["Apple", "Pear", "Carrot", "Banana"],
        correct: 2,
        explanation: "A carrot is a vegetable; the others are fruit.",
    },
    Question {
        prompt: "How are \"book\" and \"page\" related?",
        options: ["Part of a whole", "Opposites", "Synonyms", "They rhyme"],
        correct: 0,
        explanation: "A page is part of a book.",
    },
    Question {
        prompt: "All roses are flowers, and some flowers are red. So...",
        options: [
            "All roses are red",
            "Some roses may be red",
            "All flowers are roses",
            "Roses cannot be red",
        ],
        correct: 1,
        explanation: "We only know roses are flowers; not every flower is a rose.",
    },
    Question {
        prompt: "Why might the grass be wet?",
        options: [
            "It rained",
            "Someone used a hose",
            "Morning dew",
            "All of the above",
        ],
        correct: 3,
        explanation: "Grass can be wet for many different reasons.",
    },
    Question {
        prompt: "Which word does not fit with the others?",
        options: ["Joy", "Happiness", "Fun", "Table"],
        correct: 3,
        explanation: "A table is an object; the others describe feelings.",
    },
];

/// The question currently on screen and its position in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRound {
    pub index: usize,
    pub question: &'static Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Answer(usize),
    /// Move past the explanation to the next question.
    Continue,
}

/// Critical-thinking game: a fixed bank of questions played once, in order.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    bank: &'static [Question],
    answered: Option<usize>,
    correct_answers: u32,
}

impl QuestionBank {
    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    /// The answer given to the current question, while its explanation shows.
    pub fn answered(&self) -> Option<usize> {
        self.answered
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            bank: &QUESTIONS,
            answered: None,
            correct_answers: 0,
        }
    }
}

impl MiniGame for QuestionBank {
    type Round = QuizRound;
    type Action = QuizAction;

    fn kind(&self) -> GameKind {
        GameKind::Thinking
    }

    fn time_limit_secs(&self) -> Option<u32> {
        None
    }

    fn max_level(&self) -> Option<u32> {
        Some(self.bank.len() as u32)
    }

    fn reset(&mut self) {
        self.correct_answers = 0;
    }

    /// Level `n` is question `n`, 1-based.
    fn generate<R: Rng + ?Sized>(&mut self, level: Level, _rng: &mut R) -> QuizRound {
        self.answered = None;
        let bank = self.bank;
        let index = (level.get() as usize - 1).min(bank.len() - 1);
        QuizRound {
            index,
            question: &bank[index],
        }
    }

    fn apply(&mut self, round: &QuizRound, action: QuizAction, _level: Level) -> Option<Resolution> {
        match action {
            QuizAction::Answer(choice) => {
                if self.answered.is_some() || choice >= round.question.options.len() {
                    return None;
                }
                self.answered = Some(choice);
                if choice == round.question.correct {
                    self.correct_answers += 1;
                    Some(Resolution::stay(QUIZ_CORRECT))
                } else {
                    Some(Resolution::stay(0))
                }
            }
            QuizAction::Continue => {
                if self.answered.is_none() {
                    return None;
                }
                Some(Resolution::then(0, Transition::LevelUp))
            }
        }
    }
}
