use std::io::{BufRead, Write};

/// Print a prompt and block until the operator presses Enter.
pub fn prompt_enter(message: &str) -> anyhow::Result<()> {
    print!("{message}");
    std::io::stdout().flush()?;
    wait_for_ack(&mut std::io::stdin().lock())?;
    Ok(())
}

fn wait_for_ack(reader: &mut impl BufRead) -> std::io::Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}

/// Case-insensitive substring match.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ci_mixed_case() {
        assert!(contains_ci("DOWNLOAD JSON", "Download"));
        assert!(contains_ci("Create", "CREATE"));
    }

    #[test]
    fn test_contains_ci_miss() {
        assert!(!contains_ci("Cancel", "create"));
    }

    #[test]
    fn test_wait_for_ack_consumes_one_line() {
        let mut input = std::io::Cursor::new(b"\nsecond line\n".to_vec());
        wait_for_ack(&mut input).unwrap();
        assert_eq!(input.position(), 1);
    }
}
