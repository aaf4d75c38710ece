#[derive(Clone, Debug)]
pub struct Settings {
    pub answer_scan_window: usize,
    pub options_per_question: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            answer_scan_window: 9,
            options_per_question: 4,
        }
    }
}
