//! Lenient parsing of generated narrative markdown.
//!
//! Narrative section bodies arrive from the generation endpoint, so the
//! parser supports the block and inline subset the reports actually use
//! (headings, bullet lists, paragraphs, `**bold**`, `*italic*`) and never
//! fails: unmatched markers degrade to literal text instead of erroring,
//! because malformed machine-generated input must still render.

/// A fragment of text with inline decorations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    /// Creates an undecorated span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A block-level construct of a narrative body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkdownBlock {
    /// `#`..`######` heading with its level.
    Heading { level: u8, spans: Vec<Span> },
    /// A run of consecutive plain lines joined into one paragraph.
    Paragraph(Vec<Span>),
    /// A run of consecutive `-`/`*`/`•` bullet lines.
    Bullets(Vec<Vec<Span>>),
}

/// Parses a narrative body into block-level constructs.
pub fn parse_markdown(input: &str) -> Vec<MarkdownBlock> {
    let mut blocks = Vec::new();
    let mut paragraph = String::new();
    let mut bullets: Vec<Vec<Span>> = Vec::new();

    let flush_paragraph = |buffer: &mut String, blocks: &mut Vec<MarkdownBlock>| {
        if !buffer.trim().is_empty() {
            blocks.push(MarkdownBlock::Paragraph(parse_inline(buffer.trim())));
        }
        buffer.clear();
    };

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_bullets(&mut bullets, &mut blocks);
            continue;
        }

        if let Some((level, rest)) = heading_line(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_bullets(&mut bullets, &mut blocks);
            blocks.push(MarkdownBlock::Heading {
                level,
                spans: parse_inline(rest),
            });
            continue;
        }

        if let Some(rest) = bullet_line(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            bullets.push(parse_inline(rest));
            continue;
        }

        flush_bullets(&mut bullets, &mut blocks);
        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(trimmed);
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    flush_bullets(&mut bullets, &mut blocks);
    blocks
}

fn flush_bullets(bullets: &mut Vec<Vec<Span>>, blocks: &mut Vec<MarkdownBlock>) {
    if !bullets.is_empty() {
        blocks.push(MarkdownBlock::Bullets(std::mem::take(bullets)));
    }
}

fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    rest.strip_prefix(' ')
        .map(|text| (hashes as u8, text.trim()))
}

fn bullet_line(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "\u{2022} "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    None
}

/// Parses inline decorations within one line or paragraph.
///
/// A `**` or `*` marker only opens a run when a matching closer exists
/// later in the input; otherwise the characters pass through literally.
pub fn parse_inline(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut index = 0;

    while index < input.len() {
        let rest = &input[index..];

        if rest.starts_with("**") {
            if bold || rest[2..].contains("**") {
                flush(&mut buffer, &mut spans, bold, italic);
                bold = !bold;
                index += 2;
                continue;
            }
        } else if rest.starts_with('*') {
            if italic || rest[1..].contains('*') {
                flush(&mut buffer, &mut spans, bold, italic);
                italic = !italic;
                index += 1;
                continue;
            }
        }

        let ch = rest.chars().next().unwrap_or_default();
        buffer.push(ch);
        index += ch.len_utf8().max(1);
    }

    flush(&mut buffer, &mut spans, bold, italic);
    spans
}

fn flush(buffer: &mut String, spans: &mut Vec<Span>, bold: bool, italic: bool) {
    if buffer.is_empty() {
        return;
    }
    spans.push(Span {
        text: std::mem::take(buffer),
        bold,
        italic,
    });
}
