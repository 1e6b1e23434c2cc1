//! REPL command parsing

use yeneta_core::{Difficulty, Error, Language, Result};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    /// Change the learning level
    SetLevel(Difficulty),
    /// Fix the answer language, or `None` to detect it from each question
    SetLanguage(Option<Language>),
    /// Restrict retrieval to a subject, or `None` for all subjects
    SetSubject(Option<String>),
    /// Show the sources behind the last answer
    Sources,
    /// Blank line
    Empty,
    Ask(String),
}

impl ReplCommand {
    pub fn parse(input: &str) -> Result<ReplCommand> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(ReplCommand::Empty);
        }

        match input.to_lowercase().as_str() {
            "help" | ":help" => return Ok(ReplCommand::Help),
            "exit" | "quit" | ":exit" | ":quit" => return Ok(ReplCommand::Exit),
            ":sources" => return Ok(ReplCommand::Sources),
            _ => {}
        }

        let Some(rest) = input.strip_prefix(':') else {
            return Ok(ReplCommand::Ask(input.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "level" => Ok(ReplCommand::SetLevel(Difficulty::from_code(required(
                name, argument,
            )?)?)),
            "lang" | "language" => {
                let code = required(name, argument)?;
                if code.eq_ignore_ascii_case("auto") {
                    Ok(ReplCommand::SetLanguage(None))
                } else {
                    Ok(ReplCommand::SetLanguage(Some(Language::from_code(code)?)))
                }
            }
            "subject" => {
                let subject = required(name, argument)?;
                if subject.eq_ignore_ascii_case("none") || subject.eq_ignore_ascii_case("all") {
                    Ok(ReplCommand::SetSubject(None))
                } else {
                    Ok(ReplCommand::SetSubject(Some(subject.to_string())))
                }
            }
            other => Err(Error::InvalidInput(format!(
                "unknown command ':{}', type 'help' for commands",
                other
            ))),
        }
    }
}

fn required<'a>(name: &str, argument: &'a str) -> Result<&'a str> {
    if argument.is_empty() {
        return Err(Error::InvalidInput(format!(":{} needs an argument", name)));
    }
    Ok(argument)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_question() {
        assert_eq!(
            ReplCommand::parse("  What is a fraction? ").unwrap(),
            ReplCommand::Ask("What is a fraction?".to_string())
        );
    }

    #[test]
    fn test_builtin_words() {
        assert_eq!(ReplCommand::parse("help").unwrap(), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("QUIT").unwrap(), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(ReplCommand::parse(":sources").unwrap(), ReplCommand::Sources);
        assert_eq!(ReplCommand::parse("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_level_command() {
        assert_eq!(
            ReplCommand::parse(":level advanced").unwrap(),
            ReplCommand::SetLevel(Difficulty::Advanced)
        );
        assert!(matches!(
            ReplCommand::parse(":level expert"),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ReplCommand::parse(":level"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_lang_command() {
        assert_eq!(
            ReplCommand::parse(":lang am").unwrap(),
            ReplCommand::SetLanguage(Some(Language::Amharic))
        );
        assert_eq!(
            ReplCommand::parse(":lang auto").unwrap(),
            ReplCommand::SetLanguage(None)
        );
        assert!(ReplCommand::parse(":lang xx").is_err());
    }

    #[test]
    fn test_subject_command() {
        assert_eq!(
            ReplCommand::parse(":subject Earth Science").unwrap(),
            ReplCommand::SetSubject(Some("Earth Science".to_string()))
        );
        assert_eq!(
            ReplCommand::parse(":subject none").unwrap(),
            ReplCommand::SetSubject(None)
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            ReplCommand::parse(":teleport"),
            Err(Error::InvalidInput(_))
        ));
    }
}
