use std::io::{self, BufRead, Write};

/// Line-oriented operator input.
///
/// `ask` returns `None` when input is closed (Ctrl-D), which callers treat
/// as a cancelled prompt. A blank answer means "keep the default".
pub trait Prompter {
    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<Option<String>>;

    /// Yes/no question; anything other than an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]"), None)?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}

/// Prompts on stdout and reads answers from stdin.
pub struct StdinPrompter<R> {
    input: R,
}

impl StdinPrompter<io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        match default {
            Some(default) => write!(stdout, "{label} [{default}]: ")?,
            None => write!(stdout, "{label}: ")?,
        }
        stdout.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(Some(default.unwrap_or_default().to_string()));
        }
        Ok(Some(answer.to_string()))
    }
}

/// Asks until a non-empty answer is given. `None` if the operator cancels.
pub fn ask_required(prompter: &mut dyn Prompter, label: &str) -> io::Result<Option<String>> {
    loop {
        match prompter.ask(label, None)? {
            None => return Ok(None),
            Some(answer) if !answer.is_empty() => return Ok(Some(answer)),
            Some(_) => println!("{label} is required."),
        }
    }
}

/// Asks until the answer parses as a finite number. `None` if the operator cancels.
pub fn ask_number(prompter: &mut dyn Prompter, label: &str, default: f64) -> io::Result<Option<f64>> {
    let default = default.to_string();
    loop {
        match prompter.ask(label, Some(&default))? {
            None => return Ok(None),
            Some(answer) => match answer.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(Some(value)),
                _ => println!("'{answer}' is not a number."),
            },
        }
    }
}

/// A prompter that replays canned answers; `None` entries simulate Ctrl-D.
#[cfg(test)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Option<String>>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<'a>(answers: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            answers: answers.into_iter().map(|a| a.map(str::to_string)).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<Option<String>> {
        self.asked.push(label.to_string());
        Ok(match self.answers.pop_front().flatten() {
            Some(answer) if answer.is_empty() => Some(default.unwrap_or_default().to_string()),
            other => other,
        })
    }
}
