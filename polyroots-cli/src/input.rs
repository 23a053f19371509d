use std::io;
use std::io::BufRead;
use std::io::Write;

pub(crate) const PROMPT: &str = "Enter Coefficients of Equation (comma separated):";

/// Show the prompt, then read one line. The line terminator is kept.
pub(crate) fn prompt_line(mut input: impl BufRead, mut prompt: impl Write) -> io::Result<String> {
    write!(prompt, "{PROMPT} ")?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line)
}
