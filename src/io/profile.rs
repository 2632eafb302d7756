//! Parsing of comma-separated day profiles (`"0, 1, 3, 6"`).
//!
//! Blank tokens are skipped, so trailing commas and double commas are fine.
//! Anything else that is not a finite number is an input error, raised before
//! the model sees the vector.

use crate::error::AppError;

/// Parse a comma-separated list of numbers.
pub fn parse_profile(text: &str) -> Result<Vec<f64>, AppError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(idx, token)| {
            let value: f64 = token.parse().map_err(|_| {
                AppError::input(format!("Profile entry {} ('{token}') is not a number.", idx + 1))
            })?;
            if !value.is_finite() {
                return Err(AppError::input(format!(
                    "Profile entry {} ('{token}') must be finite.",
                    idx + 1
                )));
            }
            Ok(value)
        })
        .collect()
}

/// Render a profile the way `parse_profile` reads it.
pub fn format_profile(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_whitespace_and_blanks() {
        assert_eq!(
            parse_profile(" 0, 1,3 ,, 6.5, ").unwrap(),
            vec![0.0, 1.0, 3.0, 6.5]
        );
        assert!(parse_profile("").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_profile("1, two, 3").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("two"));
        assert!(parse_profile("1, inf").is_err());
    }

    #[test]
    fn format_is_readable_back() {
        let v = vec![0.0, 1.0, 2.5];
        assert_eq!(format_profile(&v), "0, 1, 2.5");
        assert_eq!(parse_profile(&format_profile(&v)).unwrap(), v);
    }
}
