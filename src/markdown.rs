use ratatui::text::{Line, Span, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{PortraitError, Result};

/// Turns a long-form markdown document into terminal lines of a given width.
pub trait DocumentRenderer: Send + Sync + std::fmt::Debug {
    fn render(&self, markdown: &str, width: u16) -> Result<Text<'static>>;
}

/// Markdown renderer backed by `tui-markdown`, word-wrapped to the view width.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str, width: u16) -> Result<Text<'static>> {
        if width == 0 {
            return Err(PortraitError::Render("cannot render at zero width".into()));
        }

        let parsed = tui_markdown::from_str(markdown);
        let lines: Vec<Line<'static>> = parsed
            .lines
            .into_iter()
            .flat_map(|line| wrap_line(line, width as usize))
            .collect();

        Ok(Text::from(lines))
    }
}

/// Greedy word wrap that keeps span styles.
///
/// Words wider than `width` are split at character boundaries. Whitespace at
/// the start of a continuation line is dropped; indentation of the first
/// line is kept.
pub fn wrap_line(line: Line<'_>, width: usize) -> Vec<Line<'static>> {
    let style = line.style;
    let alignment = line.alignment;
    let finish = |spans: Vec<Span<'static>>| {
        let mut l = Line::from(spans).style(style);
        if let Some(a) = alignment {
            l = l.alignment(a);
        }
        l
    };

    if line.width() <= width {
        let spans = line
            .spans
            .into_iter()
            .map(|s| Span::styled(s.content.into_owned(), s.style))
            .collect();
        return vec![finish(spans)];
    }

    let mut out = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;
    let mut wrapped = false;

    for span in &line.spans {
        for token in split_words(&span.content) {
            let token_width = token.width();
            if token.chars().all(char::is_whitespace) {
                if used == 0 && wrapped {
                    continue;
                }
                if used + token_width > width {
                    out.push(finish(std::mem::take(&mut current)));
                    used = 0;
                    wrapped = true;
                    continue;
                }
                current.push(Span::styled(token.to_string(), span.style));
                used += token_width;
                continue;
            }

            if used > 0 && used + token_width > width {
                out.push(finish(std::mem::take(&mut current)));
                used = 0;
                wrapped = true;
            }

            if token_width <= width {
                current.push(Span::styled(token.to_string(), span.style));
                used += token_width;
                continue;
            }

            // A single word longer than the line.
            let mut chunk = String::new();
            for ch in token.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if used + ch_width > width && used > 0 {
                    if !chunk.is_empty() {
                        current.push(Span::styled(std::mem::take(&mut chunk), span.style));
                    }
                    out.push(finish(std::mem::take(&mut current)));
                    used = 0;
                    wrapped = true;
                }
                chunk.push(ch);
                used += ch_width;
            }
            if !chunk.is_empty() {
                current.push(Span::styled(chunk, span.style));
            }
        }
    }

    if !current.is_empty() {
        out.push(finish(current));
    }
    out
}

/// Splits into alternating runs of whitespace and non-whitespace.
fn split_words(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, ch) in s.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&s[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < s.len() {
        tokens.push(&s[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Modifier, Style};

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn short_line_untouched() {
        let wrapped = wrap_line(Line::from("hello world"), 20);
        assert_eq!(plain(&wrapped), ["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundary() {
        let wrapped = wrap_line(Line::from("the quick brown fox jumps"), 10);
        assert_eq!(plain(&wrapped), ["the quick ", "brown fox ", "jumps"]);
        for line in &wrapped {
            assert!(line.width() <= 10);
        }
    }

    #[test]
    fn splits_overlong_word() {
        let wrapped = wrap_line(Line::from("abcdefghij"), 4);
        assert_eq!(plain(&wrapped), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_styles_across_wrap() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::raw("plain words "), Span::styled("bold words", bold)]);
        let wrapped = wrap_line(line, 12);
        assert_eq!(plain(&wrapped), ["plain words ", "bold words"]);
        assert!(wrapped[1].spans.iter().all(|s| s.style == bold));
    }

    #[test]
    fn keeps_first_line_indent() {
        let wrapped = wrap_line(Line::from("    indented text goes here"), 14);
        assert_eq!(plain(&wrapped)[0], "    indented ");
    }

    #[test]
    fn split_words_alternates() {
        assert_eq!(split_words("a  bc d"), ["a", "  ", "bc", " ", "d"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn renders_markdown_to_width() {
        let doc = "# Title\n\nSome words that definitely need to be wrapped somewhere.";
        let text = MarkdownRenderer.render(doc, 20).unwrap();
        let rendered = plain(&text.lines).join("\n");
        assert!(rendered.contains("Title"));
        assert!(text.lines.iter().all(|l| l.width() <= 20));
    }

    #[test]
    fn zero_width_is_an_error() {
        assert!(matches!(
            MarkdownRenderer.render("text", 0),
            Err(PortraitError::Render(_))
        ));
    }
}
