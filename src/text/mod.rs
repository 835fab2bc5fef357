//! Text preparation for lookups: tokenization and stopwords.

mod stopwords;
mod tokenizer;

pub use stopwords::{Stopwords, STOPWORDS};
pub use tokenizer::Tokenizer;
