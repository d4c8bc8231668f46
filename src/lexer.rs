//! Splitting of raw input lines into subcommands and argument tokens.
//!
//! There is no quoting, escaping or expansion: a token is a maximal run of
//! non-whitespace characters and `&` is the only operator.

/// Delimiter separating commands that run in parallel.
pub const PARALLEL_DELIMITER: char = '&';

/// Split a line on every `&`, keeping the pieces in order.
///
/// Pieces are neither trimmed nor validated, so a trailing `&` produces a trailing
/// empty piece which tokenizes to nothing.
pub fn split_parallel(line: &str) -> Vec<&str> {
    line.split(PARALLEL_DELIMITER).collect()
}

/// Split a subcommand into whitespace-separated arguments.
///
/// Runs of whitespace count as a single separator and empty fields are dropped, so a
/// blank string yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_delimiter_is_whole_line() {
        assert_eq!(split_parallel("ls -la /tmp"), vec!["ls -la /tmp"]);
        assert_eq!(split_parallel(""), vec![""]);
    }

    #[test]
    fn test_split_keeps_untrimmed_pieces() {
        assert_eq!(split_parallel("ls & ls"), vec!["ls ", " ls"]);
        assert_eq!(split_parallel("a&&b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_trailing_delimiter_yields_empty_piece() {
        let pieces = split_parallel("sleep 1 &");
        assert_eq!(pieces, vec!["sleep 1 ", ""]);
        assert!(tokenize(pieces[1]).is_empty());
    }

    #[test]
    fn test_tokenize_collapses_whitespace_runs() {
        assert_eq!(tokenize("  ls \t -l\t/tmp  "), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_tokenize_blank_is_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t \r ").is_empty());
    }

    #[test]
    fn test_tokenize_rejoin_is_stable_on_normalized_input() {
        for line in ["echo a b c", "path /bin /usr/bin", "x"] {
            let tokens = tokenize(line);
            assert_eq!(tokens.join(" "), line);
            assert_eq!(tokenize(&tokens.join(" ")), tokens);
        }
    }

    #[test]
    fn test_tokenize_does_not_interpret_quotes() {
        assert_eq!(tokenize("echo \"a b\""), vec!["echo", "\"a", "b\""]);
    }
}
