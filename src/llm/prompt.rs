use itertools::Itertools;

use crate::llm::{GenerationParams, Mode, SubmittedAnswer};

pub const EVALUATION_SYSTEM_PROMPT: &str = "You are an expert educator evaluating quiz answers. Your task is to assess each answer based on accuracy, completeness, and understanding demonstrated.

EVALUATION CRITERIA:
- Accuracy: Is the information factually correct?
- Completeness: Does the answer adequately address the question?
- Understanding: Does the answer demonstrate genuine comprehension of the topic?
- Relevance: Is the answer relevant to the specific question asked?

SCORING SYSTEM:
- 90-100%: Excellent - Accurate, complete, demonstrates deep understanding
- 70-89%: Good - Mostly accurate and complete, shows good understanding
- 50-69%: Fair - Partially correct, shows some understanding but missing key elements
- 30-49%: Poor - Limited accuracy or understanding, significant gaps
- 0-29%: Very Poor - Incorrect or completely off-topic

FEEDBACK REQUIREMENTS:
- Provide specific, constructive feedback for each answer
- Point out what was correct and what could be improved
- If the answer is incorrect, briefly explain the correct information
- Be encouraging while being honest about areas for improvement
- Keep feedback concise but informative (2-3 sentences maximum)

RESPONSE FORMAT:
Return a JSON array where each object contains:
- questionIndex: number (0-based index)
- userAnswer: string (the user's exact answer)
- feedback: string (your constructive feedback)
- isCorrect: boolean (true if score >= 70%)
- score: number (0-100)

IMPORTANT: Base your evaluation on the original content provided. The questions were generated from this content, so use it as the reference for accuracy.";

/// Instruction prompt for question generation. The format clauses here are
/// load-bearing: the parsers in `session::quiz::definition` rely on numbered
/// questions, `Answer:` labels (qa mode) and `a)`-`d)` option lines with the
/// correct option listed first (choice mode).
pub fn generation_system_prompt(params: &GenerationParams) -> String {
    let base = format!(
        "Write 10 interesting {} questions about the topic provided by the user. Questions should be diverse, useful for quiz or discussion. Write the questions in {}.",
        params.difficulty.name(),
        params.language
    );
    let mode_clause = match params.mode {
        Mode::List => "",
        Mode::Qa => " Please also answer every question. Put each answer on its own line, directly after its question, starting with \"Answer:\".",
        Mode::Choice => " For every question, provide exactly four answer options on separate lines labeled a) b) c) d). The correct option must always be listed first, as option a).",
        Mode::Open => " Do not include the answers.",
    };
    format!(
        "{}{}\n\nFormat your response as a clean numbered list. Make sure questions are clear, specific, and directly related to the content provided.",
        base, mode_clause
    )
}

pub fn generation_user_prompt(topic: &str) -> String {
    format!("Please generate questions based on this text:\n\n{}", topic)
}

pub fn evaluation_prompt(source: &str, answers: &[SubmittedAnswer]) -> String {
    let answer_list = answers
        .iter()
        .enumerate()
        .map(|(index, qa)| {
            format!(
                "\n{}. {}\nUser's Answer: {}\n",
                index + 1,
                qa.question,
                qa.user_answer
            )
        })
        .join("\n");
    format!(
        "Original Content:\n{}\n\nQuestions and User Answers:\n{}\n\nPlease evaluate each answer and provide detailed feedback according to the criteria above.",
        source, answer_list
    )
}
