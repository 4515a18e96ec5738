use crate::fonts::TextMeasure;

/// Drop every character the built-in font cannot show.
///
/// Keeps tab, line feed, carriage return and printable ASCII. Total and
/// idempotent: every input has an output and sanitizing twice changes nothing.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r' | ' '..='~'))
        .collect()
}

/// Split a document into raw lines on `\n` or `\r\n`. An empty document is a
/// single empty line.
pub fn document_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Greedy word wrap.
///
/// Words are separated by runs of whitespace. A word is appended to the
/// current line while the joined candidate measures `<= max_width`; otherwise
/// the line is closed and the word starts the next one. A single word wider
/// than `max_width` sits alone on its line and overflows. Blank input yields
/// no lines.
pub fn wrap_line(
    line: &str,
    max_width: f32,
    measure: &impl TextMeasure,
    font_size: f32,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.width(&candidate, font_size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
