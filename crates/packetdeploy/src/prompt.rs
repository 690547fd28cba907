//! Interactive input.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

/// Source of answers for missing command arguments.
pub trait Prompt {
    /// Ask for one line of input. Blank answers are returned as-is.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read.
    fn ask(&mut self, message: &str) -> io::Result<String>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, message: &str) -> io::Result<String> {
        (**self).ask(message)
    }
}

/// Prompts on the controlling terminal, or reads plain lines from stdin when
/// input is piped.
#[derive(Default)]
pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str) -> io::Result<String> {
        if io::stdin().is_terminal() && Term::stderr().is_term() {
            return Input::<String>::with_theme(&self.theme)
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other);
        }

        read_answer(&mut io::stdin().lock(), &mut io::stderr(), message)
    }
}

/// Write `message` and read one line from `input`, without the line ending.
///
/// End of input before any line is an [`io::ErrorKind::UnexpectedEof`] error.
fn read_answer<R, W>(input: &mut R, out: &mut W, message: &str) -> io::Result<String>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{message}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Canned answers, recording every question asked.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
    pub(crate) asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| (*a).to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> io::Result<String> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer"))
    }
}
