//! Input file parsing
//!
//! One request per line: `arrival_time target_track`. Lines whose first
//! character is `#` and blank lines are skipped. Tokens after the second are
//! ignored.

use crate::error::CliError;
use std::fs;
use tracing::debug;

/// Read `(arrival_time, target_track)` pairs from `path`
pub fn read_requests(path: &str) -> Result<Vec<(usize, i64)>, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::InputUnavailable {
        path: path.to_string(),
        source,
    })?;
    let pairs = parse_requests(&contents)?;
    debug!(path, requests = pairs.len(), "input loaded");
    Ok(pairs)
}

pub fn parse_requests(contents: &str) -> Result<Vec<(usize, i64)>, CliError> {
    let mut pairs = Vec::new();

    for (index, raw) in contents.lines().enumerate() {
        if raw.starts_with('#') {
            continue;
        }
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = || CliError::MalformedLine {
            line: index + 1,
            content: raw.to_string(),
        };
        let mut fields = line.split_whitespace();
        let arrival = fields
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(malformed)?;
        let track = fields
            .next()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(malformed)?;

        pairs.push((arrival, track));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let input = "#io generator\n#numio=2 maxtracks=128\n0 39\n\n   \n7 -4\n";
        assert_eq!(parse_requests(input).unwrap(), vec![(0, 39), (7, -4)]);
    }

    #[test]
    fn test_comment_marker_must_start_the_line() {
        assert!(matches!(
            parse_requests("0 5\n  # indented note\n"),
            Err(CliError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        assert_eq!(parse_requests("3 12 extra\n").unwrap(), vec![(3, 12)]);
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        assert_eq!(parse_requests("0 5\r\n1 6\r\n").unwrap(), vec![(0, 5), (1, 6)]);
    }

    #[test]
    fn test_short_line_rejected() {
        let err = parse_requests("0 10\n4\n").unwrap_err();
        match err {
            CliError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_and_negative_arrival_rejected() {
        assert!(matches!(
            parse_requests("zero 10\n"),
            Err(CliError::MalformedLine { line: 1, .. })
        ));
        assert!(matches!(
            parse_requests("-1 10\n"),
            Err(CliError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input_is_empty_workload() {
        assert!(parse_requests("# nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_requests("/definitely/not/here.txt").unwrap_err();
        assert_eq!(err.to_string(), "Not a valid inputfile </definitely/not/here.txt>");
    }
}
