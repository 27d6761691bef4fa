use crate::utils::error::AppResult;
use std::io::{self, BufRead, Write};

/// Read one trimmed line; `None` on end of input
pub fn read_line(prompt: &str) -> AppResult<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let Some(input) = read_line(&format!("{} [y/N]: ", prompt))? else {
            return Ok(false);
        };
        match parse_yes_no(&input) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter 'y' or 'n'"),
        }
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" | "o" | "oui" => Some(true),
        "n" | "no" | "non" | "" => Some(false),
        _ => None,
    }
}
