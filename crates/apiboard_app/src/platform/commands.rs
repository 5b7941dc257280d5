use apiboard_core::{Msg, TranslationStyle, UnknownStyle};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  advice              new piece of advice
  cats [ID|all]       pick a category, or fetch new images when none is given
  style <name>        translation style: yoda, pirate, minion, dothraki, valyrian
  translate [text]    translate the given (or previously entered) text
  launch              reload the latest launch
  show                print the dashboard
  help                this message
  quit                leave";

/// One line of user input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' is not a category id")]
    BadCategory(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Style(#[from] UnknownStyle),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "advice" | "a" => Command::Dispatch(vec![Msg::RefreshAdvice]),
        "cats" | "c" => Command::Dispatch(vec![parse_cats(rest)?]),
        "style" | "s" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("style"));
            }
            let style: TranslationStyle = rest.parse()?;
            Command::Dispatch(vec![Msg::TranslationStyleSelected(style)])
        }
        "translate" | "t" => {
            let mut msgs = Vec::with_capacity(2);
            if !rest.is_empty() {
                msgs.push(Msg::TranslationTextChanged(rest.to_string()));
            }
            msgs.push(Msg::TranslateRequested);
            Command::Dispatch(msgs)
        }
        "launch" | "l" => Command::Dispatch(vec![Msg::RefreshLaunch]),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Feedback for a `translate` that would be ignored because there is no text
/// to send, neither in the command nor from an earlier one.
pub fn missing_text_hint(msgs: &[Msg], current_text: &str) -> Option<&'static str> {
    if !msgs.contains(&Msg::TranslateRequested) {
        return None;
    }
    let supplies_text = msgs
        .iter()
        .any(|msg| matches!(msg, Msg::TranslationTextChanged(text) if !text.trim().is_empty()));
    if supplies_text || !current_text.trim().is_empty() {
        None
    } else {
        Some("enter text first: translate <text>")
    }
}

fn parse_cats(arg: &str) -> Result<Msg, CommandError> {
    if arg.is_empty() {
        return Ok(Msg::RefreshCats);
    }
    if arg.eq_ignore_ascii_case("all") {
        return Ok(Msg::CategorySelected(None));
    }
    arg.parse::<u32>()
        .map(|id| Msg::CategorySelected(Some(id)))
        .map_err(|_| CommandError::BadCategory(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn cats_variants() {
        assert_eq!(
            parse("cats"),
            Ok(Some(Command::Dispatch(vec![Msg::RefreshCats])))
        );
        assert_eq!(
            parse("cats 5"),
            Ok(Some(Command::Dispatch(vec![Msg::CategorySelected(Some(5))])))
        );
        assert_eq!(
            parse("CATS All"),
            Ok(Some(Command::Dispatch(vec![Msg::CategorySelected(None)])))
        );
        assert_eq!(
            parse("cats boxes"),
            Err(CommandError::BadCategory("boxes".into()))
        );
    }

    #[test]
    fn translate_with_text_sets_text_first() {
        assert_eq!(
            parse("translate  Be kind. "),
            Ok(Some(Command::Dispatch(vec![
                Msg::TranslationTextChanged("Be kind.".into()),
                Msg::TranslateRequested,
            ])))
        );
        assert_eq!(
            parse("t"),
            Ok(Some(Command::Dispatch(vec![Msg::TranslateRequested])))
        );
    }

    #[test]
    fn style_requires_known_slug() {
        assert_eq!(
            parse("style Minion"),
            Ok(Some(Command::Dispatch(vec![Msg::TranslationStyleSelected(
                TranslationStyle::Minion
            )])))
        );
        assert_eq!(parse("style"), Err(CommandError::MissingArgument("style")));
        assert!(matches!(parse("style klingon"), Err(CommandError::Style(_))));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse("q"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn bare_translate_without_text_gets_a_hint() {
        let Ok(Some(Command::Dispatch(msgs))) = parse("translate") else {
            panic!("translate should dispatch");
        };
        assert_eq!(
            missing_text_hint(&msgs, "  "),
            Some("enter text first: translate <text>")
        );
        assert_eq!(missing_text_hint(&msgs, "Be kind."), None);
    }

    #[test]
    fn translate_with_text_needs_no_hint() {
        let Ok(Some(Command::Dispatch(msgs))) = parse("translate Be kind.") else {
            panic!("translate should dispatch");
        };
        assert_eq!(missing_text_hint(&msgs, ""), None);
        assert_eq!(missing_text_hint(&[Msg::RefreshAdvice], ""), None);
    }
}
