//! Render the included candidates into the block of text that accompanies
//! the prompt in the outgoing model request.

use super::fitter::FitResult;

/// Join included candidates in fit order, each under a numbered header
/// carrying its id and date. Empty when nothing was included.
pub fn assemble_context(result: &FitResult) -> String {
    result
        .included
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "[{}] {} ({})\n{}",
                i + 1,
                c.id,
                c.timestamp.format("%Y-%m-%d"),
                c.text.trim_end()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Append the assembled context to `prompt`. Returns the prompt unchanged
/// when nothing fit.
pub fn augment_prompt(prompt: &str, result: &FitResult) -> String {
    if result.is_empty() {
        return prompt.to_string();
    }
    format!("{prompt}\n\n{}\n", assemble_context(result))
}
