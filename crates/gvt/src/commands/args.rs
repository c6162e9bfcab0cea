//! Parsing of per-command arguments.
//!
//! Command words keep their historical single-dash options (`-m <msg>`,
//! `-last <n>`), so they are parsed here rather than by clap.

/// The file argument: the first word, unless it is an option.
pub fn file_argument(args: &[String]) -> Option<&str> {
    args.first()
        .map(String::as_str)
        .filter(|arg| !arg.starts_with('-'))
}

/// The value following the first `-m`, with surrounding double quotes
/// removed and whitespace trimmed. An empty message counts as none.
pub fn extract_message(args: &[String]) -> Option<String> {
    let position = args.iter().position(|arg| arg == "-m")?;
    let raw = args.get(position + 1)?;

    let unquoted = raw.strip_prefix('"').unwrap_or(raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    let message = unquoted.trim();

    (!message.is_empty()).then(|| message.to_string())
}

/// The history limit from `-last <n>`.
///
/// A positive count keeps that many entries and a negative one keeps none.
/// Zero, a missing value or anything that is not an integer means "the
/// whole history".
pub fn history_limit(args: &[String]) -> Option<usize> {
    let [flag, value, ..] = args else {
        return None;
    };
    if flag != "-last" {
        return None;
    }

    match value.parse::<i64>() {
        Ok(n) if n > 0 => Some(usize::try_from(n).unwrap_or(usize::MAX)),
        Ok(n) if n < 0 => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::argv;

    #[test]
    fn test_file_argument() {
        assert_eq!(file_argument(&argv(&["a.txt", "-m", "x"])), Some("a.txt"));
        assert_eq!(file_argument(&argv(&["-m", "x"])), None);
        assert_eq!(file_argument(&[]), None);
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(&argv(&["a.txt", "-m", "\"first draft\""])).as_deref(),
            Some("first draft")
        );
        assert_eq!(
            extract_message(&argv(&["a.txt", "-m", "  spaced  "])).as_deref(),
            Some("spaced")
        );
        assert_eq!(extract_message(&argv(&["a.txt", "-m"])), None);
        assert_eq!(extract_message(&argv(&["a.txt", "-m", "\"\""])), None);
        assert_eq!(extract_message(&argv(&["a.txt"])), None);
    }

    #[test]
    fn test_history_limit() {
        assert_eq!(history_limit(&argv(&["-last", "3"])), Some(3));
        assert_eq!(history_limit(&argv(&["-last", "+3"])), Some(3));
        assert_eq!(history_limit(&argv(&["-last", "0"])), None);
        assert_eq!(history_limit(&argv(&["-last", "-2"])), Some(0));
        assert_eq!(history_limit(&argv(&["-last", "many"])), None);
        assert_eq!(history_limit(&argv(&["-last", " 3"])), None);
        assert_eq!(history_limit(&argv(&["-last"])), None);
        assert_eq!(history_limit(&argv(&["3"])), None);
        assert_eq!(history_limit(&[]), None);
    }
}
