//! Username/password prompt for basic-auth secrets.
//!
//! Prompts go to stderr so stdout stays a clean document stream. When stdin is
//! a terminal the password is read key by key in raw mode, so nothing is
//! echoed.
use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Prompt on the process's stdin/stderr.
pub fn prompt_basic_auth() -> Result<Credentials> {
    let stdin = io::stdin();
    let hide_password = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut prompt = io::stderr();
    if hide_password {
        read_credentials(&mut input, &mut prompt, |_| read_hidden_line())
    } else {
        read_basic_auth(&mut input, &mut prompt)
    }
}

/// Read a username line, then a password line, both from `input`. The
/// username is trimmed; the password only loses its line ending.
pub fn read_basic_auth<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> Result<Credentials> {
    read_credentials(input, prompt, read_line)
}

fn read_credentials<R, W, F>(input: &mut R, prompt: &mut W, read_password: F) -> Result<Credentials>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&mut R) -> Result<String>,
{
    write!(prompt, "Username: ").context("write username prompt")?;
    prompt.flush().context("flush prompt")?;
    let username = read_line(input).context("read username")?;

    write!(prompt, "Password: ").context("write password prompt")?;
    prompt.flush().context("flush prompt")?;
    let password = read_password(input).context("read password")?;
    // Neither a pipe nor raw mode echoes the password's line ending.
    writeln!(prompt).context("write prompt newline")?;

    Ok(Credentials {
        username: username.trim().to_string(),
        password: password.trim_end_matches(['\r', '\n']).to_string(),
    })
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(anyhow!("unexpected end of input"));
    }
    Ok(line)
}

/// Read one line from the terminal without echo.
fn read_hidden_line() -> Result<String> {
    let _raw = RawModeGuard::enter()?;
    let mut line = String::new();
    loop {
        let Event::Key(key) = event::read().context("read terminal event")? else {
            continue;
        };
        match edit_hidden_line(&mut line, key) {
            LineEdit::Continue => {}
            LineEdit::Done => return Ok(line),
            LineEdit::Cancelled => return Err(anyhow!("password entry cancelled")),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineEdit {
    Continue,
    Done,
    Cancelled,
}

fn edit_hidden_line(line: &mut String, key: KeyEvent) -> LineEdit {
    if key.kind == KeyEventKind::Release {
        return LineEdit::Continue;
    }
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => LineEdit::Done,
        KeyCode::Char('c' | 'd') if control => LineEdit::Cancelled,
        KeyCode::Esc => LineEdit::Cancelled,
        KeyCode::Char(ch) if !control => {
            line.push(ch);
            LineEdit::Continue
        }
        KeyCode::Backspace => {
            line.pop();
            LineEdit::Continue
        }
        _ => LineEdit::Continue,
    }
}

/// Raw mode for the life of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
    }
}
