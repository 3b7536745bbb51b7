use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Line-oriented terminal: prompts on the writer, answers from the reader.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref()).context("Could not write to terminal")
    }

    /// Prints `text` and reads one trimmed line, `None` once input is exhausted.
    pub fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}").context("Could not write to terminal")?;
        self.output.flush().context("Could not flush terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Could not read from terminal")?;
        if read == 0 {
            writeln!(self.output).context("Could not write to terminal")?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until the answer parses and passes `accept`, `None` on end of input.
    pub fn prompt_number<T: std::str::FromStr>(
        &mut self,
        text: &str,
        complaint: &str,
        accept: impl Fn(&T) -> bool,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(text)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                _ => self.say(complaint)?,
            }
        }
    }
}
