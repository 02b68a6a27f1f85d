use std::io::{self, BufRead, Write};

/// 交互式确认，仅接受 y / yes（大小写不敏感）。
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim_end_matches(&['\r', '\n'][..]).trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    )
}
