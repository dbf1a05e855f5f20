//! Styled text streams.
//!
//! A [`TextStream`] is what the renderer produces: text runs annotated with
//! the emphasis that was active when they were emitted, interleaved with the
//! on/off markers that bracket each emphasis region. Flattening turns the
//! markers into ANSI SGR escapes for a terminal, or drops them for plain
//! output.

use serde::Serialize;

/// Emphasis state of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Style {
    Plain,
    Bold,
    Italic,
}

impl Style {
    /// ANSI escape that turns this style on. Empty for [`Style::Plain`].
    pub fn on(self) -> &'static str {
        match self {
            Style::Plain => "",
            Style::Bold => "\x1b[1m",
            Style::Italic => "\x1b[3m",
        }
    }

    /// ANSI escape that turns this style off. Empty for [`Style::Plain`].
    pub fn off(self) -> &'static str {
        match self {
            Style::Plain => "",
            Style::Bold => "\x1b[22m",
            Style::Italic => "\x1b[23m",
        }
    }
}

/// A contiguous span of text with one emphasis state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRun {
    pub text: String,
    pub style: Style,
}

/// One element of a [`TextStream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Run(StyleRun),
    On(Style),
    Off(Style),
    LineBreak,
}

/// Ordered sequence of styled runs and emphasis markers.
///
/// Markers can only be emitted through [`TextStream::styled`], which closes
/// every region it opens, so a stream is balanced by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStream {
    spans: Vec<Span>,
    active: Vec<Style>,
}

impl TextStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text using the innermost active emphasis as its style.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.active.last().copied().unwrap_or(Style::Plain);
        self.spans.push(Span::Run(StyleRun { text: text.to_string(), style }));
    }

    pub fn line_break(&mut self) {
        self.spans.push(Span::LineBreak);
    }

    /// Brackets everything `body` emits with the on/off markers of `style`.
    ///
    /// The pair is emitted even when `body` adds nothing.
    pub fn styled<F>(&mut self, style: Style, body: F)
    where
        F: FnOnce(&mut TextStream),
    {
        if style == Style::Plain {
            body(self);
            return;
        }

        self.spans.push(Span::On(style));
        self.active.push(style);
        body(self);
        self.active.pop();
        self.spans.push(Span::Off(style));
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The text runs only, in order.
    pub fn runs(&self) -> impl Iterator<Item = &StyleRun> {
        self.spans.iter().filter_map(|span| match span {
            Span::Run(run) => Some(run),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Flattens the stream with ANSI escapes around emphasis regions.
    pub fn to_ansi(&self) -> String {
        self.flatten(true)
    }

    /// Flattens the stream without any escape sequences.
    pub fn plain_text(&self) -> String {
        self.flatten(false)
    }

    fn flatten(&self, with_markers: bool) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                Span::Run(run) => out.push_str(&run.text),
                Span::On(style) if with_markers => out.push_str(style.on()),
                Span::Off(style) if with_markers => out.push_str(style.off()),
                Span::On(_) | Span::Off(_) => {}
                Span::LineBreak => out.push('\n'),
            }
        }
        out
    }
}
