//! Line-oriented console prompts.
//!
//! Every interactive flow in the workspace goes through [`Console`], which is
//! generic over its input and output so tests can drive it with in-memory
//! buffers instead of a terminal.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// A prompt/answer channel over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses as `T` and satisfies `accept`.
    ///
    /// Rejected answers print `retry_message` and re-prompt. Returns
    /// `Ok(None)` at end of input.
    pub fn ask_parsed<T, F>(
        &mut self,
        prompt: &str,
        retry_message: &str,
        accept: F,
    ) -> io::Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                _ => self.say(retry_message)?,
            }
        }
    }

    /// Yes/no question. Only `yes_answer`, ignoring case, counts as yes.
    pub fn confirm(&mut self, prompt: &str, yes_answer: &str) -> io::Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|a| a.eq_ignore_ascii_case(yes_answer)))
    }

    /// Print one line.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Consume the console and hand back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}
