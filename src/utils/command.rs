use crate::utils::error::{AppError, AppResult};

/// Split a session line into words; double or single quotes group words
/// containing spaces, e.g. `add "Base de données" ...`
pub fn split_command_line(line: &str) -> AppResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(AppError::Parse(format!("unterminated {} quote", q)));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_and_quoted_words() {
        assert_eq!(
            split_command_line(r#"add "Base de données" --room A102"#).unwrap(),
            vec!["add", "Base de données", "--room", "A102"]
        );
        assert_eq!(
            split_command_line("  move   2 Mercredi 09:00 ").unwrap(),
            vec!["move", "2", "Mercredi", "09:00"]
        );
        assert_eq!(
            split_command_line(r#"edit 1 --room '' "#).unwrap(),
            vec!["edit", "1", "--room", ""]
        );
        assert!(split_command_line("").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_rejected() {
        assert!(split_command_line(r#"add "Réseaux"#).is_err());
    }
}
