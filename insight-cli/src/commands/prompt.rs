//! Line-based prompts and numbered menus for interactive use.

use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Print `prompt` and read one trimmed line. `Ok(None)` at end of input.
pub(crate) fn read_line(prompt: &str) -> Result<Option<String>, CliError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Ask a yes/no question. Only `y` or `yes` confirms.
pub(crate) fn confirm(prompt: &str) -> Result<bool, CliError> {
    let answer = read_line(&format!("{} (y/N) ", prompt))?;
    Ok(matches!(
        answer.as_deref().map(str::to_lowercase).as_deref(),
        Some("y") | Some("yes")
    ))
}

/// What a menu action asks of its menu loop.
pub(crate) enum Step {
    /// Stay in the menu and show this notification.
    Stay(String),
    /// Leave the menu, showing this notification in the parent.
    Back(String),
}

/// Print the pending notification, the intro, and numbered options, then
/// read a selection by number or by option text.
///
/// Returns the index of the chosen option, or `None` at end of input.
pub(crate) fn select<S: AsRef<str>>(
    intro: &str,
    options: &[S],
    notification: &mut Option<String>,
) -> Result<Option<usize>, CliError> {
    loop {
        if let Some(note) = notification.take() {
            println!();
            println!("** {}", note.if_supports_color(Stdout, |t| t.yellow()));
            println!();
        }
        println!("{}", intro.if_supports_color(Stdout, |t| t.bold()));
        println!();
        for (i, option) in options.iter().enumerate() {
            println!("{}. {}", i + 1, option.as_ref());
        }

        let Some(input) = read_line("")? else {
            return Ok(None);
        };
        if let Some(index) = parse_selection(&input, options) {
            return Ok(Some(index));
        }
        *notification = Some("Couldn't find option, try again".to_string());
    }
}

/// Match input against a 1-based option number or an option label.
pub(crate) fn parse_selection<S: AsRef<str>>(input: &str, options: &[S]) -> Option<usize> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }
    options
        .iter()
        .position(|o| o.as_ref().eq_ignore_ascii_case(input))
}
