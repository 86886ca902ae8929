//! Terminal question prompting.

use std::io::{BufRead, Write};

use normcheck_evaluator::error::{NormcheckError, Result};
use normcheck_evaluator::questioner::Questioner;

/// Asks yes/no questions over a line-oriented reader and writer.
///
/// Accepts `y`, `yes`, `n` and `no` in any case; anything else re-prompts.
/// End of input means no answer will ever arrive and fails the question.
pub struct PromptQuestioner<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptQuestioner<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, prompt: &str, id: &str) -> Result<Option<bool>> {
        write!(self.output, "{prompt} (y/n): ")
            .and_then(|()| self.output.flush())
            .map_err(|e| NormcheckError::io("writing prompt", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| NormcheckError::io(format!("reading answer for {id}"), e))?;
        if read == 0 {
            return Err(NormcheckError::answer_unavailable(id, "input closed"));
        }

        Ok(parse_answer(&line))
    }
}

impl<R: BufRead, W: Write> Questioner for PromptQuestioner<R, W> {
    fn ask(&mut self, prompt: &str, id: &str) -> Result<bool> {
        loop {
            if let Some(answer) = self.read_answer(prompt, id)? {
                return Ok(answer);
            }
            writeln!(self.output, "Please answer 'y' or 'n'.")
                .map_err(|e| NormcheckError::io("writing prompt", e))?;
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
