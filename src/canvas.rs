//! The drawing surface the layout engine writes to.
//!
//! The engine only ever talks to a [`PageCanvas`]: it measures text, opens and closes
//! pages, and hands over positioned runs. Positions are top-down: `y` is the distance
//! from the top edge of the page to the top of the run's line box.

use crate::colour::Colour;
use crate::document::Document;
use crate::layout::Margins;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::resolver::FontSet;
use crate::style::TextStyle;
use crate::units::Pt;
use pdf_writer::Content;

/// Text measurement, the one thing layout needs to know about fonts
pub trait TextMeasure {
    /// Advance width of `text` set in `style`
    fn text_width(&self, text: &str, style: &TextStyle) -> Pt;

    /// Ascent and (usually negative) descent of the face behind `style`
    fn vertical_metrics(&self, style: &TextStyle) -> (Pt, Pt);
}

/// One line of text in a line box of `height`, its top-left corner at (`x`, `y`)
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub height: Pt,
    pub style: TextStyle,
}

/// A filled (and optionally outlined) box, its top-left corner at (`x`, `y`)
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRun {
    pub x: Pt,
    pub y: Pt,
    pub width: Pt,
    pub height: Pt,
    pub fill: Colour,
    pub stroke: Option<Colour>,
}

pub trait PageCanvas: TextMeasure {
    fn page_size(&self) -> PageSize;

    /// Open a fresh page; later runs land on it
    fn begin_page(&mut self);

    /// Close the open page, if any
    fn end_page(&mut self);

    /// Pages begun so far
    fn page_count(&self) -> usize;

    fn draw_text(&mut self, run: TextRun);

    fn draw_box(&mut self, run: BoxRun);

    /// Mark the open page as the target of a bookmark nested at `level` (1 = top)
    fn bookmark(&mut self, _level: u8, _title: &str) {}
}

/// Where the baseline of a run sits, measured down from the top of the page. The glyph
/// box (ascent to descent) is centred in the line box.
pub fn baseline_from_top(y: Pt, height: Pt, ascent: Pt, descent: Pt) -> Pt {
    y + (height - (ascent - descent)) / 2.0 + ascent
}

/// A canvas that lays pages into a [`Document`] for PDF output
pub struct PdfCanvas {
    document: Document,
    fonts: FontSet,
    page_size: PageSize,
    margins: Margins,
    current: Option<Page>,
    pages_begun: usize,
    // (level, bookmark index) of the innermost open bookmarks
    open_bookmarks: Vec<(u8, usize)>,
}

impl PdfCanvas {
    /// `fonts` must be registered in `document`
    pub fn new(
        document: Document,
        fonts: FontSet,
        page_size: PageSize,
        margins: Margins,
    ) -> PdfCanvas {
        PdfCanvas {
            document,
            fonts,
            page_size,
            margins,
            current: None,
            pages_begun: 0,
            open_bookmarks: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Close any open page and hand back the finished document
    pub fn finish(mut self) -> Document {
        self.end_page();
        self.document
    }

    fn font(&self, style: &TextStyle) -> Option<&crate::font::Font> {
        self.document.fonts.get(self.fonts.resolve(style.variant))
    }

    fn page(&mut self) -> &mut Page {
        if self.current.is_none() {
            self.begin_page();
        }
        let (size, margins) = (self.page_size, &self.margins);
        self.current
            .get_or_insert_with(|| Page::new(size, Some(margins.clone())))
    }
}

impl TextMeasure for PdfCanvas {
    fn text_width(&self, text: &str, style: &TextStyle) -> Pt {
        self.font(style)
            .map(|font| font.text_width(text, style.size))
            .unwrap_or_default()
    }

    fn vertical_metrics(&self, style: &TextStyle) -> (Pt, Pt) {
        self.font(style)
            .map(|font| (font.ascent(style.size), font.descent(style.size)))
            .unwrap_or((style.size * 0.8, style.size * -0.2))
    }
}

impl PageCanvas for PdfCanvas {
    fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn begin_page(&mut self) {
        self.end_page();
        self.current = Some(Page::new(self.page_size, Some(self.margins.clone())));
        self.pages_begun += 1;
    }

    fn end_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }
    }

    fn page_count(&self) -> usize {
        self.pages_begun
    }

    fn draw_text(&mut self, run: TextRun) {
        if run.text.is_empty() {
            return;
        }
        let (ascent, descent) = self.vertical_metrics(&run.style);
        let baseline = baseline_from_top(run.y, run.height, ascent, descent);
        let span = SpanLayout {
            font: SpanFont {
                id: self.fonts.resolve(run.style.variant),
                size: run.style.size,
            },
            colour: run.style.colour,
            coords: (run.x, self.page_size.1 - baseline),
            text: run.text,
        };
        self.page().add_span(span);
    }

    fn draw_box(&mut self, run: BoxRun) {
        let bottom = self.page_size.1 - run.y - run.height;
        let mut content = Content::new();
        set_fill(&mut content, run.fill);
        if let Some(stroke) = run.stroke {
            set_stroke(&mut content, stroke);
            content.set_line_width(0.5);
        }
        content.rect(run.x.0, bottom.0, run.width.0, run.height.0);
        if run.stroke.is_some() {
            content.fill_nonzero_and_stroke();
        } else {
            content.fill_nonzero();
        }
        self.page().add_content(content);
    }

    fn bookmark(&mut self, level: u8, title: &str) {
        // the open page is added to the document when it ends, after all pages before it
        let page_index = self.document.page_count();
        while matches!(self.open_bookmarks.last(), Some(&(open, _)) if open >= level) {
            self.open_bookmarks.pop();
        }
        let parent = self.open_bookmarks.last().map(|&(_, index)| index);
        let index = self.document.add_bookmark(parent, title, page_index);
        self.open_bookmarks.push((level, index));
    }
}

fn set_fill(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}

/// Fixed-advance metrics: every character is `advance` em wide. Useful for dry runs and
/// for testing layout without font files.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonoMetrics {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        MonoMetrics {
            advance: 0.5,
            ascent: 0.8,
            descent: -0.2,
        }
    }
}

impl TextMeasure for MonoMetrics {
    fn text_width(&self, text: &str, style: &TextStyle) -> Pt {
        style.size * (self.advance * text.chars().count() as f32)
    }

    fn vertical_metrics(&self, style: &TextStyle) -> (Pt, Pt) {
        (style.size * self.ascent, style.size * self.descent)
    }
}

/// Everything drawn on one page of a [`RecordingCanvas`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordedPage {
    pub texts: Vec<TextRun>,
    pub boxes: Vec<BoxRun>,
}

impl RecordedPage {
    /// The text of every run, in drawing order
    pub fn lines(&self) -> Vec<&str> {
        self.texts.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A bookmark recorded by a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBookmark {
    pub level: u8,
    pub title: String,
    pub page_index: usize,
}

/// A canvas that keeps every run in memory instead of producing PDF objects
pub struct RecordingCanvas<M: TextMeasure> {
    pub metrics: M,
    pub page_size: PageSize,
    pub pages: Vec<RecordedPage>,
    pub bookmarks: Vec<RecordedBookmark>,
    open: bool,
}

impl<M: TextMeasure> RecordingCanvas<M> {
    pub fn new(metrics: M, page_size: PageSize) -> RecordingCanvas<M> {
        RecordingCanvas {
            metrics,
            page_size,
            pages: Vec::new(),
            bookmarks: Vec::new(),
            open: false,
        }
    }

    pub fn is_page_open(&self) -> bool {
        self.open
    }

    fn page(&mut self) -> &mut RecordedPage {
        if !self.open {
            self.begin_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl<M: TextMeasure> TextMeasure for RecordingCanvas<M> {
    fn text_width(&self, text: &str, style: &TextStyle) -> Pt {
        self.metrics.text_width(text, style)
    }

    fn vertical_metrics(&self, style: &TextStyle) -> (Pt, Pt) {
        self.metrics.vertical_metrics(style)
    }
}

impl<M: TextMeasure> PageCanvas for RecordingCanvas<M> {
    fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn begin_page(&mut self) {
        self.pages.push(RecordedPage::default());
        self.open = true;
    }

    fn end_page(&mut self) {
        self.open = false;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn draw_text(&mut self, run: TextRun) {
        self.page().texts.push(run);
    }

    fn draw_box(&mut self, run: BoxRun) {
        self.page().boxes.push(run);
    }

    fn bookmark(&mut self, level: u8, title: &str) {
        let page_index = self.pages.len().saturating_sub(1);
        self.bookmarks.push(RecordedBookmark {
            level,
            title: title.to_string(),
            page_index,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn mono_metrics_scale_with_size() {
        let metrics = MonoMetrics::default();
        assert_eq!(metrics.text_width("abcd", &TextStyle::regular(Pt(10.0))), Pt(20.0));
        assert_eq!(metrics.text_width("", &TextStyle::regular(Pt(10.0))), Pt(0.0));
        assert_eq!(
            metrics.vertical_metrics(&TextStyle::regular(Pt(10.0))),
            (Pt(8.0), Pt(-2.0))
        );
    }

    #[test]
    fn baseline_centres_glyph_box() {
        // 18pt box, 10pt glyph box (8 up, 2 down): 4pt above, baseline 8pt below that
        assert_eq!(baseline_from_top(Pt(100.0), Pt(18.0), Pt(8.0), Pt(-2.0)), Pt(112.0));
    }

    #[test]
    fn recording_canvas_opens_pages_on_demand() {
        let mut canvas = RecordingCanvas::new(MonoMetrics::default(), A4);
        canvas.draw_text(TextRun {
            text: "hello".into(),
            x: Pt(0.0),
            y: Pt(0.0),
            height: Pt(10.0),
            style: TextStyle::regular(Pt(10.0)),
        });
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.pages[0].lines(), vec!["hello"]);
        canvas.end_page();
        assert!(!canvas.is_page_open());
    }
}
