use itertools::Itertools;

use crate::output::{Message, SessionOutput};
use crate::session::quiz::ScoreTier;

#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }

    fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            SettingsRecap { topic, params } => format!(
                "Topic: {}\nMode: {}\nDifficulty: {}\nLanguage: {}",
                if topic.is_empty() {
                    "(not set)"
                } else {
                    topic.as_str()
                },
                params.mode.name(),
                params.difficulty.name(),
                params.language
            ),
            QuestionList(records) => records
                .iter()
                .map(|record| {
                    if record.answer.is_some() {
                        format!(
                            "{}\n   (use `reveal {}` to see the answer)",
                            record.text,
                            record.ordinal + 1
                        )
                    } else {
                        record.text.clone()
                    }
                })
                .join("\n"),
            AnswerReveal(ordinal, answer) => {
                format!("💡 Answer to question {}: {}", ordinal + 1, answer)
            }
            AnswerHidden(ordinal) => format!("Answer to question {} is hidden again.", ordinal + 1),
            NoAnswerAvailable(ordinal) => {
                format!("No answer was generated for question {}.", ordinal + 1)
            }
            QuizBegins(count) => format!(
                "🎓 Quiz time! {} questions. Answer every one of them, then use `submit`.",
                count
            ),
            ChoiceQuestions(questions) => questions
                .iter()
                .map(|question| {
                    let options = question
                        .options
                        .iter()
                        .enumerate()
                        .map(|(index, option)| {
                            format!("   {}) {}", (b'a' + index as u8) as char, option)
                        })
                        .join("\n");
                    format!("{}\n{}", question.text, options)
                })
                .join("\n"),
            OpenQuestions(questions) => {
                let list = questions.iter().map(|question| &question.text).join("\n");
                format!(
                    "{}\nAnswer in your own words with `answer <number> <text>`.",
                    list
                )
            }
            AnswerRecorded {
                ordinal,
                answered,
                total,
            } => format!(
                "✍️ Recorded answer for question {} ({}/{} answered).",
                ordinal + 1,
                answered,
                total
            ),
            IncompleteSubmission(unanswered) => format!(
                "⚠️ {} question(s) still unanswered. Answer all questions before submitting.",
                unanswered
            ),
            GradingBegins => "⏳ Grading your answers...".into(),
            ChoiceResults {
                correct,
                total,
                tier,
            } => format!(
                "🏆 You answered {} out of {} questions correctly!\n{}",
                correct,
                total,
                tier_message(tier)
            ),
            ChoiceVerdicts(verdicts) => verdicts
                .iter()
                .map(|verdict| {
                    let mut lines = format!(
                        "{} {}\n   Your answer: {}",
                        if verdict.is_correct { "✅" } else { "❌" },
                        verdict.question.text,
                        verdict.question.options[verdict.selected_index]
                    );
                    if !verdict.is_correct {
                        lines += &format!(
                            "\n   Correct answer: {}",
                            verdict.question.correct_option()
                        );
                    }
                    lines
                })
                .join("\n"),
            OpenResults { score, tier } => {
                format!("🏆 Overall score: {}%\n{}", score, tier_message(tier))
            }
            OpenVerdicts(verdicts) => verdicts
                .iter()
                .map(|verdict| match &verdict.grade {
                    Some(grade) => format!(
                        "{} {}\n   Your answer: {}\n   Feedback ({}%): {}",
                        if grade.is_correct { "✅" } else { "❌" },
                        verdict.question,
                        verdict.user_answer,
                        grade.score,
                        grade.feedback
                    ),
                    None => format!(
                        "➖ {}\n   Your answer: {}\n   This answer was not graded.",
                        verdict.question, verdict.user_answer
                    ),
                })
                .join("\n"),
        }
    }
}

fn tier_message(tier: &ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Excellent => "Excellent work! 🎉",
        ScoreTier::Good => "Good job! 👍",
        ScoreTier::Fair => "Not bad, keep practicing! 📚",
        ScoreTier::NeedsPractice => "Keep studying and try again! 💪",
    }
}

impl SessionOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        println!("{}", self.interpret_message(message));
    }
}
