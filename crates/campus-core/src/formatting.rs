/// Pad or truncate `text` to exactly `width` characters, left-aligned.
///
/// ```
/// use campus_core::formatting::fit_width;
///
/// assert_eq!(fit_width("Soup", 6), "Soup  ");
/// assert_eq!(fit_width("Lasagne", 5), "Lasa…");
/// ```
pub fn fit_width(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
