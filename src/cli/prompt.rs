//! Line-based operator prompts
//!
//! Questions are written to any `Write` and answers read from any `BufRead`,
//! so the interactive flows run the same against a terminal or a scripted
//! input. Answers that cannot be coerced to the expected type are reported
//! and the question is asked again; end of input is an error.

use crate::error::{VendorError, VendorResult};
use colored::Colorize;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a message line
    pub fn say(&mut self, message: impl AsRef<str>) -> VendorResult<()> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Report a rejected answer
    pub fn warn(&mut self, message: impl AsRef<str>) -> VendorResult<()> {
        writeln!(self.output, "{}", format!("   {}", message.as_ref()).yellow())?;
        Ok(())
    }

    fn read_answer(&mut self, question: &str) -> VendorResult<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(VendorError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input ended before all questions were answered",
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Non-blank text
    pub fn ask_str(&mut self, question: &str) -> VendorResult<String> {
        loop {
            let answer = self.read_answer(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.warn("Blank values are not allowed.")?;
        }
    }

    /// Text, `None` when left blank
    pub fn ask_optional_str(&mut self, question: &str) -> VendorResult<Option<String>> {
        let answer = self.read_answer(question)?;
        Ok(Some(answer).filter(|a| !a.is_empty()))
    }

    /// A number, `None` when left blank
    pub fn ask_optional_number(&mut self, question: &str) -> VendorResult<Option<f64>> {
        loop {
            let answer = self.read_answer(question)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<f64>() {
                Ok(n) if n.is_finite() => return Ok(Some(n)),
                _ => self.warn(format!("'{}' is not a number.", answer))?,
            }
        }
    }

    /// A non-negative integer
    pub fn ask_index(&mut self, question: &str) -> VendorResult<usize> {
        loop {
            let answer = self.read_answer(question)?;
            match answer.parse::<usize>() {
                Ok(n) => return Ok(n),
                Err(_) => self.warn(format!("'{}' is not a whole number.", answer))?,
            }
        }
    }

    /// One of `options`, chosen by number or by name (case-insensitive)
    ///
    /// Returns `None` when left blank.
    pub fn ask_menu<'a>(
        &mut self,
        question: &str,
        options: &[&'a str],
    ) -> VendorResult<Option<&'a str>> {
        writeln!(self.output, "{}", question)?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, option)?;
        }
        loop {
            let answer = self.read_answer("> ")?;
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(option) = Self::pick(&answer, options) {
                return Ok(Some(option));
            }
            self.warn(format!("'{}' is not one of the options.", answer))?;
        }
    }

    fn pick<'a>(answer: &str, options: &[&'a str]) -> Option<&'a str> {
        if let Ok(n) = answer.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| options.get(i)).copied();
        }
        options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(answer))
            .copied()
    }

    /// true/false (also yes/no), `None` when left blank
    pub fn ask_optional_bool(&mut self, question: &str) -> VendorResult<Option<bool>> {
        loop {
            let answer = self.read_answer(question)?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(None),
                "true" | "t" | "yes" | "y" => return Ok(Some(true)),
                "false" | "f" | "no" | "n" => return Ok(Some(false)),
                _ => self.warn(format!("'{}' is not true or false.", answer))?,
            }
        }
    }

    /// Anything other than yes/y counts as no
    pub fn confirm(&mut self, question: &str) -> VendorResult<bool> {
        let answer = self.read_answer(question)?;
        Ok(matches!(answer.to_lowercase().as_str(), "yes" | "y"))
    }
}
