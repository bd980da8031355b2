use pdf_writer::{Content, Name, Str};

use crate::fonts::{StandardFont, to_winansi_bytes};
use crate::model::{Alignment, Paragraph, Run};

pub(super) struct WordChunk {
    pub(super) font: StandardFont,
    pub(super) text: String,
    pub(super) font_size: f32,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
}

pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
}

pub(super) struct ParagraphLayout {
    pub(super) lines: Vec<TextLine>,
    pub(super) font_size: f32,
    pub(super) ascender_ratio: f32,
    pub(super) leading: f32,
    pub(super) space_after: f32,
}

impl ParagraphLayout {
    pub(super) fn height(&self) -> f32 {
        self.lines.len() as f32 * self.leading + self.space_after
    }

    #[cfg(test)]
    pub(super) fn max_line_width(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.total_width)
            .fold(0.0f32, f32::max)
    }
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Cut a word that is wider than the line into pieces that each fit.
/// Every piece holds at least one character so progress is guaranteed.
fn split_long_word(word: &str, font: StandardFont, font_size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0f32;
    for ch in word.chars() {
        let cw = font.char_width_1000(ch) * font_size / 1000.0;
        if !current.is_empty() && current_w + cw > max_width {
            pieces.push(std::mem::take(&mut current));
            current_w = 0.0;
        }
        current.push(ch);
        current_w += cw;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Layout runs into wrapped lines.
/// No space is inserted between runs unless the preceding text ended with
/// whitespace or the new run starts with whitespace.
pub(super) fn build_paragraph_lines(runs: &[Run], max_width: f32) -> Vec<TextLine> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let mut prev_ended_with_ws = false;
    let mut prev_space_w: f32 = 0.0;

    for run in runs {
        let space_w = run.font.space_width(run.font_size);
        let starts_with_ws = run.text.starts_with(char::is_whitespace);

        for (i, word) in run.text.split_whitespace().enumerate() {
            let ww = run.font.word_width(word, run.font_size);
            let pieces = if ww > max_width && max_width > 0.0 {
                split_long_word(word, run.font, run.font_size, max_width)
            } else {
                vec![word.to_string()]
            };

            for (pi, piece) in pieces.into_iter().enumerate() {
                let pw = run.font.word_width(&piece, run.font_size);
                let need_space = pi == 0
                    && !current_chunks.is_empty()
                    && (i > 0 || starts_with_ws || prev_ended_with_ws);
                let effective_space_w = if i > 0 || starts_with_ws {
                    space_w
                } else {
                    prev_space_w
                };
                let proposed_x = if need_space {
                    current_x + effective_space_w
                } else {
                    current_x
                };

                if !current_chunks.is_empty() && (pi > 0 || proposed_x + pw > max_width) {
                    lines.push(finish_line(&mut current_chunks));
                    current_x = 0.0;
                } else {
                    current_x = proposed_x;
                }

                current_chunks.push(WordChunk {
                    font: run.font,
                    text: piece,
                    font_size: run.font_size,
                    x_offset: current_x,
                    width: pw,
                });
                current_x += pw;
            }
        }

        prev_ended_with_ws = run.text.ends_with(char::is_whitespace);
        prev_space_w = space_w;
    }

    if !current_chunks.is_empty() {
        lines.push(finish_line(&mut current_chunks));
    }
    lines
}

pub(super) fn layout_paragraph(para: &Paragraph, max_width: f32) -> ParagraphLayout {
    let lines = if para.is_text_empty() {
        vec![]
    } else {
        build_paragraph_lines(&para.runs, max_width)
    };
    let tallest = para
        .runs
        .iter()
        .max_by(|a, b| {
            (a.font_size * a.font.ascender_ratio()).total_cmp(&(b.font_size * b.font.ascender_ratio()))
        });
    ParagraphLayout {
        lines,
        font_size: tallest.map_or(10.0, |r| r.font_size),
        ascender_ratio: tallest.map_or(0.75, |r| r.font.ascender_ratio()),
        leading: para.leading,
        space_after: para.space_after,
    }
}

/// Render pre-built lines applying the paragraph alignment.
/// `top` is the upper edge of the first line box.
pub(super) fn render_paragraph_lines(
    content: &mut Content,
    layout: &ParagraphLayout,
    alignment: Alignment,
    margin_left: f32,
    text_width: f32,
    top: f32,
) {
    if layout.lines.iter().all(|l| l.chunks.is_empty()) {
        return;
    }

    let first_baseline_y = top - layout.font_size * layout.ascender_ratio;
    let mut cur_font: Option<StandardFont> = None;
    let mut cur_font_size: f32 = -1.0;

    content.begin_text();
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;

    for (line_num, line) in layout.lines.iter().enumerate() {
        let y = first_baseline_y - line_num as f32 * layout.leading;
        let line_start_x = match alignment {
            Alignment::Center => margin_left + (text_width - line.total_width) / 2.0,
            Alignment::Right => margin_left + text_width - line.total_width,
            Alignment::Left => margin_left,
        };

        for chunk in &line.chunks {
            if cur_font != Some(chunk.font) || cur_font_size != chunk.font_size {
                content.set_font(Name(chunk.font.pdf_name().as_bytes()), chunk.font_size);
                cur_font = Some(chunk.font);
                cur_font_size = chunk.font_size;
            }

            let x = line_start_x + chunk.x_offset;
            content.next_line(x - td_x, y - td_y);
            td_x = x;
            td_y = y;

            content.show(Str(&to_winansi_bytes(&chunk.text)));
        }
    }
    content.end_text();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Run {
        Run::new(text, StandardFont::TimesRoman, 10.0)
    }

    #[test]
    fn short_text_is_one_line() {
        let lines = build_paragraph_lines(&[run("Brown powder")], 200.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].chunks.len(), 2);
        // "Brown" = 667+333+500+722+500 = 2722, space = 250
        assert!((lines[0].chunks[1].x_offset - 29.72).abs() < 1e-3);
    }

    #[test]
    fn wraps_at_width() {
        let text = "Since the product is derived from natural origin there is likely to be minor color variation";
        let lines = build_paragraph_lines(&[run(text)], 100.0);
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(line.total_width <= 100.0 + 1e-3, "line too wide: {}", line.total_width);
        }
        let words: usize = lines.iter().map(|l| l.chunks.len()).sum();
        assert_eq!(words, text.split_whitespace().count());
    }

    #[test]
    fn overlong_word_is_broken_to_fit() {
        let lines = build_paragraph_lines(&[run("Polyhydroxyalkanoate-derivatives-mixture")], 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.total_width <= 40.0 + 1e-3);
        }
        let rejoined: String = lines
            .iter()
            .flat_map(|l| l.chunks.iter().map(|c| c.text.as_str()))
            .collect();
        assert_eq!(rejoined, "Polyhydroxyalkanoate-derivatives-mixture");
    }

    #[test]
    fn adjacent_runs_without_whitespace_stay_joined() {
        let runs = [run("USP"), run("<921>")];
        let lines = build_paragraph_lines(&runs, 200.0);
        assert_eq!(lines.len(), 1);
        let first_w = StandardFont::TimesRoman.word_width("USP", 10.0);
        assert!((lines[0].chunks[1].x_offset - first_w).abs() < 1e-4);
    }

    #[test]
    fn empty_paragraph_has_no_height() {
        let para = Paragraph::new(run("   "));
        let layout = layout_paragraph(&para, 100.0);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.height(), 0.0);
    }
}
