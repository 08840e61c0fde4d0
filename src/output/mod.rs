// mysqlbackuptool/src/output/mod.rs
//! Terminal output rendering.
//!
//! Status text is built as a [`StyledLine`] of spans with an emphasis level,
//! then rendered either with ANSI color codes or as plain text. Business logic
//! never embeds escape sequences directly.

/// Emphasis level of a span within a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Regular status text.
    Plain,
    /// A database name or path.
    Name,
    /// Section delimiters and headline text.
    Strong,
    /// Debug-channel markers.
    Detail,
}

impl Emphasis {
    fn ansi_code(self) -> &'static str {
        match self {
            Emphasis::Plain => "\x1b[0;37m",
            Emphasis::Name => "\x1b[1;34m",
            Emphasis::Strong => "\x1b[1;37m",
            Emphasis::Detail => "\x1b[1;32m",
        }
    }
}

#[derive(Debug, Clone)]
struct Span {
    text: String,
    emphasis: Emphasis,
}

/// A single line of status output, assembled from emphasised spans.
#[derive(Debug, Clone, Default)]
pub struct StyledLine {
    spans: Vec<Span>,
}

impl StyledLine {
    pub fn new() -> Self {
        StyledLine { spans: Vec::new() }
    }

    pub fn push(mut self, text: impl Into<String>, emphasis: Emphasis) -> Self {
        self.spans.push(Span {
            text: text.into(),
            emphasis,
        });
        self
    }

    pub fn plain(self, text: impl Into<String>) -> Self {
        self.push(text, Emphasis::Plain)
    }

    pub fn name(self, text: impl Into<String>) -> Self {
        self.push(text, Emphasis::Name)
    }

    pub fn strong(self, text: impl Into<String>) -> Self {
        self.push(text, Emphasis::Strong)
    }

    pub fn detail(self, text: impl Into<String>) -> Self {
        self.push(text, Emphasis::Detail)
    }

    /// Renders the line as a String, with ANSI codes when `colorize` is set.
    pub fn render(&self, colorize: bool) -> String {
        let mut out = String::new();
        for span in &self.spans {
            if colorize {
                out.push_str(span.emphasis.ansi_code());
            }
            out.push_str(&span.text);
        }
        if colorize && !self.spans.is_empty() {
            out.push_str("\x1b[0m");
        }
        out
    }
}

/// Writes a styled line to stdout with a trailing newline.
pub fn display(line: &StyledLine, colorize: bool) {
    println!("{}", line.render(colorize));
}

/// Convenience for the common `[name]\ttext` status shape.
pub fn tagged_line(name: &str, text: &str) -> StyledLine {
    StyledLine::new()
        .plain("[")
        .name(name)
        .plain(format!("]\t{}", text))
}

/// Section delimiter emitted around each database's output block.
pub fn section_delimiter() -> StyledLine {
    StyledLine::new().strong("============================================")
}
