//! Operator-facing input and output, kept apart from the core so it can be scripted

#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, Write};

pub trait Prompt {
    /// Asks a question and reads one trimmed line. `None` means the input is closed.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    fn tell(&mut self, message: &str);
}

/// Talks to whoever sits at stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl Prompt for StdConsole {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        // unlocked handle, so several consoles may share stdin
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn tell(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Replays canned answers and remembers everything it was told
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub told: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().map(|a| a.trim().to_string()))
    }

    fn tell(&mut self, message: &str) {
        self.told.push(message.to_string());
    }
}

/// Yes/no answer where an empty line means yes
pub fn confirm(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}
