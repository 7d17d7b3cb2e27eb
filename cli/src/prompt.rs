use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use taskdeck_core::{parse_deadline, parse_stored_date};

/// Prints `prompt`, reads one line, and returns it trimmed. `None` means the
/// input stream ended.
pub fn read_trimmed(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered pick from a closed option set. Keeps asking until one of the
/// listed numbers comes back.
pub fn select<T: Copy>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    title: &str,
    options: &[(&str, T)],
) -> io::Result<Option<T>> {
    loop {
        writeln!(out, "{title}")?;
        for (i, (label, _)) in options.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, label)?;
        }
        let Some(answer) = read_trimmed(input, out, "Enter a number: ")? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1].1)),
            _ => writeln!(out, "That is not one of the options, try again.")?,
        }
    }
}

/// Asks for a deadline until it passes validation, explaining each rejection.
pub fn read_deadline(
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<NaiveDate>> {
    let today = Local::now().date_naive();
    loop {
        let Some(answer) = read_trimmed(input, out, "Enter a deadline (DD-MM-YYYY): ")? else {
            return Ok(None);
        };
        match parse_deadline(&answer, today) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => writeln!(out, "{e}, try again.")?,
        }
    }
}

/// A date used for matching, not scheduling: the shape must be right but the
/// past is allowed.
pub fn read_any_date(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<NaiveDate>> {
    loop {
        let Some(answer) = read_trimmed(input, out, prompt)? else {
            return Ok(None);
        };
        match parse_stored_date(&answer) {
            Some(date) => return Ok(Some(date)),
            None => writeln!(out, "Dates look like DD-MM-YYYY, try again.")?,
        }
    }
}

/// Keeps asking until the answer parses as `T`, echoing the parse error.
pub fn read_parsed<T>(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    loop {
        let Some(answer) = read_trimmed(input, out, prompt)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "{e}, try again.")?,
        }
    }
}

pub fn read_status(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<bool>> {
    loop {
        let Some(answer) = read_trimmed(input, out, "Show done or open tasks? ")? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "done" | "true" | "yes" | "1" => return Ok(Some(true)),
            "open" | "false" | "no" | "0" => return Ok(Some(false)),
            _ => writeln!(out, "Answer 'done' or 'open', try again.")?,
        }
    }
}
