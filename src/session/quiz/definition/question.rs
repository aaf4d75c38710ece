use rand::seq::SliceRandom;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionRecord {
    pub text: String,
    pub answer: Option<String>,
    pub ordinal: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenQuestion {
    pub text: String,
    pub ordinal: usize,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChoiceQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl ChoiceQuestion {
    /// Builds a question from options listed in source order, where the first
    /// option is the correct one by upstream prompt convention. Options are
    /// shuffled by identity token so that duplicate option text cannot shift
    /// `correct_index` onto the wrong entry.
    pub fn from_source_order(text: String, options_in_source_order: Vec<String>) -> Self {
        let mut tokens: Vec<usize> = (0..options_in_source_order.len()).collect();
        tokens.shuffle(&mut rand::thread_rng());

        let correct_index = tokens
            .iter()
            .position(|&token| token == 0)
            .expect("Token 0 missing after shuffle");
        let options = tokens
            .iter()
            .map(|&token| options_in_source_order[token].clone())
            .collect();

        ChoiceQuestion {
            text,
            options,
            correct_index,
        }
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_answer_correct(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index
    }
}
