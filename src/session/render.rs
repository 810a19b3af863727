//! Filling a prompt's blanks with response text.

use crate::cards::{CardCatalog, PromptId, ResponseId};
use crate::core::RenderStyle;

/// Render a submission against its prompt for display.
///
/// - A prompt without blanks gets the single response appended after a
///   space, emphasized.
/// - Otherwise each blank marker, left to right, is replaced by the next
///   response with trailing periods stripped, emphasized.
///
/// Submission already enforces the card count. If fewer responses than
/// blanks are given, the remaining markers are left in place; extra
/// responses are ignored.
///
/// ```
/// use czar::cards::{CardCatalog, PromptId, ResponseId};
/// use czar::core::RenderStyle;
/// use czar::session::render_submission;
///
/// let catalog = CardCatalog::new(
///     vec!["_ is why I can't sleep.".to_string()],
///     vec!["Owls.".to_string()],
///     "_",
/// ).unwrap();
///
/// let text = render_submission(&catalog, &RenderStyle::default(), PromptId::new(0), &[ResponseId::new(0)]);
/// assert_eq!(text, "<strong>Owls</strong> is why I can't sleep.");
/// ```
#[must_use]
pub fn render_submission(
    catalog: &CardCatalog,
    style: &RenderStyle,
    prompt: PromptId,
    responses: &[ResponseId],
) -> String {
    let text = catalog.prompt_text(prompt);

    if catalog.blank_count(prompt) == 0 {
        return match responses.first() {
            Some(&response) => format!("{} {}", text, style.emphasize(catalog.response_text(response))),
            None => text.to_string(),
        };
    }

    // Splitting keeps marker-like text inside responses from being filled.
    let marker = catalog.blank_marker();
    let mut pieces = text.split(marker);
    let mut rendered = pieces.next().unwrap_or_default().to_string();
    let mut fills = responses.iter();
    for piece in pieces {
        match fills.next() {
            Some(&response) => {
                let fill = catalog.response_text(response).trim_end_matches('.');
                rendered.push_str(&style.emphasize(fill));
            }
            None => rendered.push_str(marker),
        }
        rendered.push_str(piece);
    }
    rendered
}
