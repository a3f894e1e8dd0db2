//! The six mini-games. Each module pairs a round generator with the game
//! type that scores actions against it.

pub mod color_word;
pub mod pairs;
pub mod quiz;
pub mod schulte;
pub mod sequence;
pub mod shapes;

pub use color_word::{ColorMatch, ColorWord, Hue};
pub use pairs::{CardState, Deck, Fruit, MemoryPairs};
pub use quiz::{Question, QuestionBank, QuizAction, QuizRound};
pub use schulte::{SchulteGrid, SchulteTable};
pub use sequence::{Feedback, Pattern, PatternGame, Token};
pub use shapes::{Shape, ShapeGrid, ShapeHunt};
