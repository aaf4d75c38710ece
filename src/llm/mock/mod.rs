use anyhow::*;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::llm::{EvaluationResult, GenerationParams, Generator, Grader, SubmittedAnswer};

#[derive(Clone)]
pub struct MockGenerator {
    completion: Arc<RwLock<String>>,
    call_count: Arc<RwLock<usize>>,
}

impl MockGenerator {
    pub fn new(completion: &str) -> Self {
        MockGenerator {
            completion: Arc::new(RwLock::new(completion.to_owned())),
            call_count: Arc::new(RwLock::new(0)),
        }
    }

    pub fn set_completion(&self, completion: &str) {
        *self.completion.write() = completion.to_owned();
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.read()
    }
}

impl Generator for MockGenerator {
    fn generate(&self, _topic: &str, _params: &GenerationParams) -> Result<String> {
        *self.call_count.write() += 1;
        Ok(self.completion.read().clone())
    }
}

#[derive(Clone)]
pub struct MockGrader {
    results: Arc<RwLock<Option<Vec<EvaluationResult>>>>,
    call_count: Arc<RwLock<usize>>,
}

impl MockGrader {
    /// `None` makes every `evaluate` call fail, mimicking an unreachable
    /// grading collaborator.
    pub fn new(results: Option<Vec<EvaluationResult>>) -> Self {
        MockGrader {
            results: Arc::new(RwLock::new(results)),
            call_count: Arc::new(RwLock::new(0)),
        }
    }

    pub fn set_results(&self, results: Option<Vec<EvaluationResult>>) {
        *self.results.write() = results;
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.read()
    }
}

impl Grader for MockGrader {
    fn evaluate(&self, _source: &str, _answers: &[SubmittedAnswer]) -> Result<Vec<EvaluationResult>> {
        *self.call_count.write() += 1;
        match self.results.read().clone() {
            Some(results) => Ok(results),
            None => Err(anyhow!("Mock grader is unreachable")),
        }
    }
}
