use std::io::{BufRead, Write};

use crate::AppError;

pub const CONFIRM_DELETE_GAME: &str = "Ви впевнені, що хочете видалити цю гру?";
pub const CONFIRM_DELETE_CATEGORY: &str = "Ви впевнені, що хочете видалити цю категорію?";

/// Asks a yes/no question. Only an explicit yes (`y`, `yes`, `т`, `так`) counts;
/// an empty line or end of input is a no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool, AppError> {
    let io_error = |e: std::io::Error| AppError::LocalState(e.to_string());
    write!(output, "{question} [y/N] ").map_err(io_error)?;
    output.flush().map_err(io_error)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(io_error)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes" | "т" | "так"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = confirm(&mut answer.as_bytes(), &mut output, CONFIRM_DELETE_GAME).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_only_explicit_yes() {
        assert!(ask("y\n").0);
        assert!(ask("  Так \n").0);
        assert!(!ask("\n").0);
        assert!(!ask("").0);
        assert!(!ask("no\n").0);
        assert!(!ask("yess\n").0);
    }

    #[test]
    fn prints_the_question() {
        let (_, printed) = ask("n\n");
        assert_eq!(printed, "Ви впевнені, що хочете видалити цю гру? [y/N] ");
    }
}
