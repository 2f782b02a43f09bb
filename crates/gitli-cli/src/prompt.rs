//! Interactive prompts for issue fields

use gitli_core::IssueType;
use std::io::{self, BufRead, Write};

/// Line-based prompter over any input/output pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// Empty answer keeps `default`; unrecognized answers become `Task`
    pub fn issue_type(&mut self, default: IssueType) -> io::Result<IssueType> {
        let answer = self.ask(&format!(
            "Task type: 1-Task, 2-Bug, 3-Enhancement [{}]: ",
            default.code()
        ))?;
        if answer.is_empty() {
            Ok(default)
        } else {
            Ok(IssueType::parse_lenient(&answer))
        }
    }

    /// Empty answer keeps `current`
    pub fn milestone(&mut self, current: &str) -> io::Result<String> {
        let answer = self.ask(&format!("Milestone: [{}]: ", current))?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// `None` when the answer is blank
    pub fn title(&mut self) -> io::Result<Option<String>> {
        let answer = self.ask("Enter a new title (enter nothing to keep the same): ")?;
        Ok((!answer.is_empty()).then_some(answer))
    }
}
