//! The flow engine: turns an ordered list of blocks into pages.
//!
//! The engine owns a writing cursor (`current_y`, measured down from the top edge of the
//! page) and the active text style. Every block is broken into lines; before each line
//! is drawn the engine checks whether it would cross the bottom margin and, if so, closes
//! the page (footer), opens a new one (header) and draws the line there. Breaks are
//! decided line by line with no lookahead, so a paragraph may continue across pages and
//! a heading may end up as the last line of a page.

use crate::block::{heading_label, Align, Block, Manuscript};
use crate::canvas::{BoxRun, PageCanvas, PdfCanvas, RecordingCanvas, TextMeasure, TextRun};
use crate::colour::colours;
use crate::config::FlowConfig;
use crate::decorator::PageDecorator;
use crate::document::Document;
use crate::layout::LineWrap;
use crate::resolver::LoadedFamily;
use crate::style::{Slant, TextStyle, Variant, Weight};
use crate::units::Pt;
use crate::PDFError;

/// Cursor and page geometry, owned by the engine for the length of one render
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    /// Top of the next line, measured down from the top edge of the page
    pub current_y: Pt,
    /// 1-based number of the open page; 0 before the first page opens
    pub page_number: usize,
    pub page_height: Pt,
    pub margin_left: Pt,
    pub margin_right: Pt,
    pub margin_top: Pt,
    pub margin_bottom: Pt,
    pub printable_width: Pt,
}

impl PageState {
    fn new(config: &FlowConfig) -> PageState {
        PageState {
            current_y: config.margins.top,
            page_number: 0,
            page_height: config.page_size.1,
            margin_left: config.margins.left,
            margin_right: config.margins.right,
            margin_top: config.margins.top,
            margin_bottom: config.margins.bottom,
            printable_width: config.printable_width(),
        }
    }

    /// The lowest point body lines may reach
    pub fn limit(&self) -> Pt {
        self.page_height - self.margin_bottom
    }

    /// Whether a line of `height` still fits above the bottom margin
    pub fn fits(&self, height: Pt) -> bool {
        self.current_y + height <= self.limit()
    }
}

pub struct FlowEngine<C: PageCanvas> {
    canvas: C,
    config: FlowConfig,
    decorator: Box<dyn PageDecorator>,
    state: PageState,
    style: TextStyle,
}

impl<C: PageCanvas> FlowEngine<C> {
    /// Set up an engine drawing onto `canvas`. Fails with [`PDFError::InvalidConfig`]
    /// when the configuration leaves no room for a line on an empty page.
    pub fn new<D: PageDecorator + 'static>(
        canvas: C,
        config: FlowConfig,
        decorator: D,
    ) -> Result<FlowEngine<C>, PDFError> {
        config.validate()?;
        Ok(FlowEngine {
            canvas,
            state: PageState::new(&config),
            style: TextStyle::regular(config.body_size),
            config,
            decorator: Box::new(decorator),
        })
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The style body lines are currently drawn in
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Close the last page and hand back the canvas. A document with no content still
    /// gets one (decorated) page.
    pub fn finish(mut self) -> C {
        self.ensure_started();
        self.decorator
            .footer(&mut self.canvas, self.state.page_number, &self.config);
        self.canvas.end_page();
        log::debug!("finished after {} pages", self.state.page_number);
        self.canvas
    }

    /// Render every block of `manuscript` in order
    pub fn render_manuscript(&mut self, manuscript: &Manuscript) -> Result<(), PDFError> {
        for block in manuscript.blocks() {
            self.render(block)?;
        }
        Ok(())
    }

    pub fn render(&mut self, block: &Block) -> Result<(), PDFError> {
        log::trace!("rendering {} block on page {}", block.kind(), self.state.page_number);
        match block {
            Block::Heading {
                level,
                number,
                text,
            } => self.render_heading(number, text, *level),
            Block::Paragraph { text } => {
                self.render_paragraph(text);
                Ok(())
            }
            Block::StyledLine {
                text,
                weight,
                slant,
            } => {
                self.render_styled_line(text, *weight, *slant);
                Ok(())
            }
            Block::Bullet { text, indent } => self.render_bullet(text, *indent),
            Block::NumberedItem {
                index,
                text,
                indent,
            } => self.render_numbered(*index, text, *indent),
            Block::LabelValue { label, value } => {
                self.render_label_value(label, value);
                Ok(())
            }
            Block::Verbatim { lines } => {
                self.render_verbatim(lines);
                Ok(())
            }
            Block::TitleBlock {
                text,
                align,
                size,
                weight,
            } => self.render_title_block(text, *align, *size, *weight),
            Block::CoverArt {
                caption,
                width,
                height,
            } => self.render_cover_art(caption, *width, *height),
            Block::Gap(height) => {
                self.render_gap(*height);
                Ok(())
            }
            Block::PageBreak => {
                self.break_page();
                Ok(())
            }
        }
    }

    /// Body text in the regular face, wrapped to the full column, followed by the
    /// paragraph gap
    pub fn render_paragraph(&mut self, text: &str) {
        self.ensure_started();
        self.style = self.body_style();
        let line_height = self.config.line_height();
        for line in self.wrap(text, LineWrap::column(self.state.printable_width)) {
            self.draw_line(line, self.state.margin_left, line_height);
        }
        self.advance(self.config.paragraph_gap);
    }

    /// Wrapped body-size text in any weight and slant. The body style is restored after.
    pub fn render_styled_line(&mut self, text: &str, weight: Weight, slant: Slant) {
        self.ensure_started();
        self.style = TextStyle::new(Variant::new(weight, slant), self.config.body_size);
        let line_height = self.config.line_height();
        for line in self.wrap(text, LineWrap::column(self.state.printable_width)) {
            self.draw_line(line, self.state.margin_left, line_height);
        }
        self.style = self.body_style();
    }

    /// A bold heading line (or lines) with space around it. Also bookmarks the page the
    /// heading starts on.
    pub fn render_heading(&mut self, number: &str, title: &str, level: u8) -> Result<(), PDFError> {
        let heading = *self
            .config
            .heading(level)
            .ok_or_else(|| PDFError::BlockUnsupported {
                block: "heading",
                reason: format!("level {level} is not one of 1, 2 or 3"),
            })?;
        self.ensure_started();

        let label = heading_label(number, title);
        let line_height = self.config.heading_line_height(&heading);
        self.style = TextStyle::bold(heading.size);
        self.advance(heading.space_before);
        let lines = self.wrap(&label, LineWrap::column(self.state.printable_width));
        for (i, line) in lines.into_iter().enumerate() {
            self.draw_line(line, self.state.margin_left, line_height);
            if i == 0 {
                self.canvas.bookmark(level, &label);
            }
        }
        self.advance(heading.space_after);
        self.style = self.body_style();
        Ok(())
    }

    pub fn render_bullet(&mut self, text: &str, indent: Pt) -> Result<(), PDFError> {
        self.render_bullet_or_numbered("•", text, indent)
    }

    pub fn render_numbered(&mut self, index: u32, text: &str, indent: Pt) -> Result<(), PDFError> {
        self.render_bullet_or_numbered(&format!("{index}."), text, indent)
    }

    /// A marker followed by wrapped text, all shifted right by `indent`. Continuation
    /// lines line up under the text, not under the marker. An indent that leaves no room
    /// for text after the marker is `BlockUnsupported`.
    pub fn render_bullet_or_numbered(
        &mut self,
        marker: &str,
        text: &str,
        indent: Pt,
    ) -> Result<(), PDFError> {
        let marker = format!("{marker} ");
        let style = self.body_style();
        let marker_x = self.state.margin_left + indent;
        let text_x = marker_x + self.canvas.text_width(&marker, &style);
        let width = self.state.margin_left + self.state.printable_width - text_x;
        if width <= Pt(0.0) {
            return Err(PDFError::BlockUnsupported {
                block: "list item",
                reason: format!(
                    "a {}pt indent leaves no room for text in the {}pt column",
                    indent.0, self.state.printable_width.0
                ),
            });
        }

        self.ensure_started();
        self.style = style;
        let line_height = self.config.line_height();

        for (i, line) in self.wrap(text, LineWrap::column(width)).into_iter().enumerate() {
            if i == 0 {
                self.ensure_room(line_height);
                self.put(&marker, marker_x, line_height, self.style);
            }
            self.draw_line(line, text_x, line_height);
        }
        Ok(())
    }

    /// A bold label with regular text directly after it on the same baseline. Value text
    /// that doesn't fit wraps back to the left margin.
    pub fn render_label_value(&mut self, label: &str, value: &str) {
        self.ensure_started();
        self.style = self.body_style();
        let line_height = self.config.line_height();
        let label_style = TextStyle::bold(self.config.body_size);
        let left = self.state.margin_left;
        let label_width = self.canvas.text_width(label, &label_style);
        let wrap = LineWrap::hanging(
            self.state.printable_width - label_width,
            self.state.printable_width,
        )
        .deferring_first();

        for (i, line) in self.wrap(value, wrap).into_iter().enumerate() {
            if i == 0 {
                self.ensure_room(line_height);
                self.put(label, left, line_height, label_style);
                self.draw_line(line, left + label_width, line_height);
            } else {
                self.draw_line(line, left, line_height);
            }
        }
    }

    /// Literal lines in the smaller italic face. Lines are never wrapped; a page break
    /// can only fall between them.
    pub fn render_verbatim<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.ensure_started();
        self.style = TextStyle::italic(self.config.verbatim_size);
        let line_height = self.config.line_height();
        for line in lines.iter().flat_map(|l| l.as_ref().split('\n')) {
            self.draw_line(line.trim_end().to_string(), self.state.margin_left, line_height);
        }
        self.style = self.body_style();
    }

    /// Large text on the first page. Title lines never trigger page breaks: content that
    /// would cross the bottom margin is a configuration error.
    pub fn render_title_block(
        &mut self,
        text: &str,
        align: Align,
        size: Pt,
        weight: Weight,
    ) -> Result<(), PDFError> {
        self.ensure_started();
        if self.state.page_number != 1 {
            return Err(PDFError::BlockUnsupported {
                block: "title",
                reason: format!(
                    "title blocks belong on the first page, not page {}",
                    self.state.page_number
                ),
            });
        }

        let style = TextStyle::new(Variant::new(weight, Slant::Upright), size);
        let line_height = self.config.line_height_for(size);
        let lines = LineWrap::column(self.state.printable_width)
            .wrap(text, |s| self.canvas.text_width(s, &style));
        for line in lines {
            if !self.state.fits(line_height) {
                return Err(PDFError::TitlePageOverflow);
            }
            let width = self.canvas.text_width(&line, &style);
            let free = self.state.printable_width - width;
            let x = self.state.margin_left
                + match align {
                    Align::Left => Pt(0.0),
                    Align::Center => free / 2.0,
                    Align::Right => free,
                }
                .max(Pt(0.0));
            self.put(&line, x, line_height, style);
            self.state.current_y += line_height;
        }
        Ok(())
    }

    /// A grey framed box with a centred caption, kept whole: it moves to the next page
    /// when it doesn't fit on this one
    pub fn render_cover_art(
        &mut self,
        caption: &str,
        width: Pt,
        height: Pt,
    ) -> Result<(), PDFError> {
        self.ensure_started();
        let printable_height = self.state.limit() - self.state.margin_top;
        if height > printable_height {
            return Err(PDFError::BlockUnsupported {
                block: "cover art",
                reason: format!(
                    "{}pt tall box can't fit in {}pt of printable height",
                    height.0, printable_height.0
                ),
            });
        }
        self.ensure_room(height);

        let width = width.min(self.state.printable_width);
        let x = self.state.margin_left + (self.state.printable_width - width) / 2.0;
        let top = self.state.current_y;
        self.canvas.draw_box(BoxRun {
            x,
            y: top,
            width,
            height,
            fill: colours::LIGHT_GREY,
            stroke: Some(colours::MID_GREY),
        });

        let style = TextStyle::italic(self.config.body_size).with_colour(colours::MID_GREY);
        let line_height = self.config.line_height();
        let lines = LineWrap::column(width).wrap(caption, |s| self.canvas.text_width(s, &style));
        let mut y = top + (height - line_height * lines.len() as f32).max(Pt(0.0)) / 2.0;
        for line in lines {
            if y + line_height > top + height {
                break;
            }
            let line_width = self.canvas.text_width(&line, &style);
            let line_x = x + (width - line_width).max(Pt(0.0)) / 2.0;
            self.state.current_y = y;
            self.put(&line, line_x, line_height, style);
            y += line_height;
        }

        self.state.current_y = top + height;
        self.advance(self.config.paragraph_gap);
        Ok(())
    }

    /// Vertical space. Space that runs past the bottom margin is dropped rather than
    /// carried onto the next page.
    pub fn render_gap(&mut self, height: Pt) {
        self.ensure_started();
        self.advance(height);
    }

    /// Close the current page and continue on a fresh one. The active style carries over
    /// untouched: the next line is drawn with it, whatever the decorator drew in between.
    /// Called before anything else, it closes an empty first page.
    pub fn break_page(&mut self) {
        self.ensure_started();
        let from = self.state.page_number;
        let at = self.state.current_y;
        self.decorator.footer(&mut self.canvas, from, &self.config);
        self.canvas.end_page();
        self.open_page();
        log::debug!(
            "page {from} full at y={}pt, continuing on page {}",
            at.0,
            self.state.page_number
        );
    }

    fn body_style(&self) -> TextStyle {
        TextStyle::regular(self.config.body_size)
    }

    fn ensure_started(&mut self) {
        if self.state.page_number == 0 {
            self.open_page();
        }
    }

    fn open_page(&mut self) {
        self.canvas.begin_page();
        self.state.page_number += 1;
        self.state.current_y = self.state.margin_top;
        if self.state.page_number > 1 {
            self.decorator
                .header(&mut self.canvas, self.state.page_number, &self.config);
        }
    }

    /// Break the page if a line of `height` would cross the bottom margin
    fn ensure_room(&mut self, height: Pt) {
        if !self.state.fits(height) {
            self.break_page();
        }
    }

    fn advance(&mut self, height: Pt) {
        self.state.current_y = (self.state.current_y + height).min(self.state.limit());
    }

    fn wrap(&self, text: &str, wrap: LineWrap) -> Vec<String> {
        wrap.wrap(text, |s| self.canvas.text_width(s, &self.style))
    }

    /// Draw a run at the cursor without moving it
    fn put(&mut self, text: &str, x: Pt, height: Pt, style: TextStyle) {
        if text.trim().is_empty() {
            return;
        }
        self.canvas.draw_text(TextRun {
            text: text.to_string(),
            x,
            y: self.state.current_y,
            height,
            style,
        });
    }

    /// Draw one line in the active style, breaking the page first if needed, and move
    /// the cursor below it
    fn draw_line(&mut self, text: String, x: Pt, height: Pt) {
        self.ensure_room(height);
        if !text.is_empty() {
            self.canvas.draw_text(TextRun {
                text,
                x,
                y: self.state.current_y,
                height,
                style: self.style,
            });
        }
        self.state.current_y += height;
    }
}

impl<M: TextMeasure> FlowEngine<RecordingCanvas<M>> {
    /// Lay `manuscript` out in memory only, measuring text with `metrics`. Useful for
    /// counting pages before committing to output.
    pub fn dry_run<D: PageDecorator + 'static>(
        manuscript: &Manuscript,
        config: FlowConfig,
        metrics: M,
        decorator: D,
    ) -> Result<RecordingCanvas<M>, PDFError> {
        let canvas = RecordingCanvas::new(metrics, config.page_size);
        let mut engine = FlowEngine::new(canvas, config, decorator)?;
        engine.render_manuscript(manuscript)?;
        Ok(engine.finish())
    }
}

/// Lay `manuscript` out into a new PDF [`Document`] set in `family`
pub fn render_document<D: PageDecorator + 'static>(
    manuscript: &Manuscript,
    config: FlowConfig,
    family: LoadedFamily,
    decorator: D,
) -> Result<Document, PDFError> {
    let mut document = Document::default();
    let fonts = family.register(&mut document);
    let canvas = PdfCanvas::new(document, fonts, config.page_size, config.margins.clone());
    let mut engine = FlowEngine::new(canvas, config, decorator)?;
    engine.render_manuscript(manuscript)?;
    Ok(engine.finish().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{MonoMetrics, RecordedPage};
    use crate::decorator::{RunningTitle, Undecorated};
    use crate::layout::Margins;
    use crate::units::Mm;

    type Engine = FlowEngine<RecordingCanvas<MonoMetrics>>;

    fn engine(config: FlowConfig) -> Engine {
        let canvas = RecordingCanvas::new(MonoMetrics::default(), config.page_size);
        FlowEngine::new(canvas, config, RunningTitle::new("Running title"))
            .expect("valid config")
    }

    /// Body runs only, without header and footer
    fn body(page: &RecordedPage, config: &FlowConfig) -> Vec<TextRun> {
        page.texts
            .iter()
            .filter(|r| r.y >= config.margins.top && r.y < config.body_bottom())
            .cloned()
            .collect()
    }

    /// Lines that fit on one page of the default config (18pt lines)
    fn lines_per_page(config: &FlowConfig) -> usize {
        let height = config.margins.printable_height(config.page_size);
        (height.0 / config.line_height().0).floor() as usize
    }

    /// A word wide enough that every word of a paragraph lands on its own line (12pt mono
    /// characters are 6pt wide; the default column is ~453pt)
    fn one_word_per_line(count: usize) -> String {
        vec!["x".repeat(60); count].join(" ")
    }

    #[test]
    fn paragraph_wraps_within_the_column() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        let text = lipsum::lipsum(200);
        engine.render_paragraph(&text);
        let canvas = engine.finish();

        let runs: Vec<TextRun> = canvas.pages.iter().flat_map(|p| body(p, &config)).collect();
        assert!(runs.len() > 1);
        for run in runs.iter() {
            let width = canvas.text_width(&run.text, &run.style);
            assert!(width <= config.printable_width(), "{:?} overflows", run.text);
            assert_eq!(run.x, config.margins.left);
        }
        let joined: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined.join(" "), text);
    }

    #[test]
    fn two_pages_of_text_make_two_pages() {
        let config = FlowConfig::default();
        let n = lines_per_page(&config);
        let mut engine = engine(config.clone());
        engine.render_paragraph(&one_word_per_line(n + 5));
        let canvas = engine.finish();

        assert_eq!(canvas.pages.len(), 2);
        let first = canvas.pages[0].lines();
        let second = canvas.pages[1].lines();
        assert!(!first.contains(&"Running title"));
        assert_eq!(second.first(), Some(&"Running title"));
        assert_eq!(first.last(), Some(&"Page 1"));
        assert_eq!(second.last(), Some(&"Page 2"));
        assert_eq!(body(&canvas.pages[0], &config).len(), n);
        assert_eq!(body(&canvas.pages[1], &config).len(), 5);
    }

    #[test]
    fn continuation_starts_at_the_top_margin() {
        let config = FlowConfig::default();
        let n = lines_per_page(&config);
        let mut engine = engine(config.clone());
        engine.render_paragraph(&one_word_per_line(n + 1));
        let canvas = engine.finish();
        let second = body(&canvas.pages[1], &config);
        assert_eq!(second[0].y, config.margins.top);
    }

    #[test]
    fn style_survives_a_page_break() {
        let config = FlowConfig::default();
        let n = lines_per_page(&config);
        let mut engine = engine(config.clone());
        engine.render_styled_line(&one_word_per_line(n + 3), Weight::Bold, Slant::Italic);
        assert_eq!(engine.style().variant, Variant::REGULAR);
        let canvas = engine.finish();

        for page in canvas.pages.iter() {
            for run in body(page, &config) {
                assert_eq!(run.style.variant, Variant::BOLD_ITALIC);
                assert_eq!(run.style.size, config.body_size);
                assert_eq!(run.style.colour, colours::BLACK);
            }
        }
        assert_eq!(body(&canvas.pages[1], &config).len(), 3);
    }

    #[test]
    fn cursor_stays_inside_the_body_area() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        let mut blocks = Manuscript::new();
        for i in 0..40 {
            blocks
                .heading(1, i.to_string(), "Section")
                .paragraph(lipsum::lipsum(60))
                .bullet(lipsum::lipsum(25))
                .label_value("Label: ", lipsum::lipsum(20))
                .verbatim(["let x = 1;", "let y = 2;"])
                .gap(Mm(30.0));
        }
        for block in blocks.blocks() {
            engine.render(block).expect("renders");
            let state = engine.state();
            assert!(state.current_y >= state.margin_top);
            assert!(state.current_y <= state.limit());
        }
    }

    #[test]
    fn heading_then_long_paragraph_page_count() {
        let mut config = FlowConfig::default();
        config.paragraph_gap = Pt(0.0);
        config.headings[0] = crate::config::HeadingStyle {
            size: Pt(12.0),
            line_height: None,
            space_before: Pt(0.0),
            space_after: Pt(0.0),
        };
        let n = lines_per_page(&config);
        let paragraph_lines = 6 * n - 10;

        let mut blocks = Manuscript::new();
        blocks
            .heading(1, "1", "X")
            .paragraph(one_word_per_line(paragraph_lines));
        let canvas = FlowEngine::dry_run(
            &blocks,
            config.clone(),
            MonoMetrics::default(),
            RunningTitle::new("Running title"),
        )
        .expect("renders");

        let expected = (1 + paragraph_lines).div_ceil(n);
        assert_eq!(canvas.pages.len(), expected);
        for (i, page) in canvas.pages.iter().enumerate() {
            assert_eq!(page.lines().contains(&"Running title"), i > 0);
            assert_eq!(page.lines().last().copied(), Some(format!("Page {}", i + 1).as_str()));
        }
    }

    #[test]
    fn label_value_exactly_filling_the_line_does_not_wrap() {
        // 510pt column: a 5 char label (30pt) leaves exactly 80 chars (480pt)
        let config = FlowConfig::default()
            .page_size((Pt(630.0), Pt(800.0)))
            .margins(Margins::all(Pt(60.0)));
        let value = vec!["abcdefgh"; 9].join(" ");
        assert_eq!(value.len(), 80);

        let mut engine = engine(config.clone());
        engine.render_label_value("Key: ", &value);
        let canvas = engine.finish();
        let runs = body(&canvas.pages[0], &config);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Key: ");
        assert_eq!(runs[0].style.variant, Variant::BOLD);
        assert_eq!(runs[1].text, value);
        assert_eq!(runs[1].style.variant, Variant::REGULAR);
        assert_eq!(runs[1].x, Pt(90.0));
        assert_eq!(runs[0].y, runs[1].y);
    }

    #[test]
    fn label_value_wraps_back_to_the_margin() {
        let config = FlowConfig::default()
            .page_size((Pt(630.0), Pt(800.0)))
            .margins(Margins::all(Pt(60.0)));
        let value = vec!["abcdefgh"; 12].join(" ");

        let mut engine = engine(config.clone());
        engine.render_label_value("Key: ", &value);
        let canvas = engine.finish();
        let runs = body(&canvas.pages[0], &config);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2].x, config.margins.left);
        assert!(runs[2].y > runs[1].y);
    }

    #[test]
    fn bullet_continuation_aligns_under_text() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        let indent: Pt = Mm(10.0).into();
        engine.render_bullet(&lipsum::lipsum(80), indent).expect("renders");
        let canvas = engine.finish();
        let runs = body(&canvas.pages[0], &config);

        assert_eq!(runs[0].text, "• ");
        assert_eq!(runs[0].x, config.margins.left + indent);
        // "• " is two 6pt characters
        let text_x = config.margins.left + indent + Pt(12.0);
        assert_eq!(runs[0].y, runs[1].y);
        for run in runs.iter().skip(1) {
            assert_eq!(run.x, text_x);
            let right = run.x + canvas.text_width(&run.text, &run.style);
            assert!(right <= config.margins.left + config.printable_width());
        }
        assert!(runs.len() > 3);
    }

    #[test]
    fn numbered_marker() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        engine.render_numbered(7, "Seventh item", Pt(0.0)).expect("renders");
        let canvas = engine.finish();
        assert_eq!(canvas.pages[0].lines()[..2], ["7. ", "Seventh item"]);
    }

    #[test]
    fn list_indent_wider_than_the_column_is_unsupported() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        assert!(matches!(
            engine.render_bullet("Too far right", Mm(200.0).into()),
            Err(PDFError::BlockUnsupported { block: "list item", .. })
        ));
        assert!(matches!(
            engine.render_numbered(2, "Too far right", config.printable_width()),
            Err(PDFError::BlockUnsupported { block: "list item", .. })
        ));
        assert_eq!(engine.state().page_number, 0);

        engine.render_bullet("Fits", Mm(10.0).into()).expect("renders");
        let canvas = engine.finish();
        assert_eq!(canvas.pages.len(), 1);
        assert_eq!(canvas.pages[0].lines(), vec!["• ", "Fits", "Page 1"]);
    }

    #[test]
    fn verbatim_never_wraps_and_breaks_between_lines() {
        let config = FlowConfig::default();
        let n = lines_per_page(&config);
        let long_line = "y".repeat(200);
        let lines: Vec<String> = (0..n + 2).map(|_| long_line.clone()).collect();

        let mut engine = engine(config.clone());
        engine.render_verbatim(&lines);
        let canvas = engine.finish();
        let first = body(&canvas.pages[0], &config);
        let second = body(&canvas.pages[1], &config);
        assert_eq!(first.len(), n);
        assert_eq!(second.len(), 2);
        assert!(first.iter().all(|r| r.text == long_line));
        assert_eq!(first[0].style.variant, Variant::ITALIC);
        assert_eq!(first[0].style.size, config.verbatim_size);
    }

    #[test]
    fn heading_levels_outside_one_to_three_are_unsupported() {
        let mut engine = engine(FlowConfig::default());
        assert!(matches!(
            engine.render_heading("1", "Too deep", 4),
            Err(PDFError::BlockUnsupported { block: "heading", .. })
        ));
    }

    #[test]
    fn headings_are_bold_and_restore_body_style() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        engine.render_heading("4.1.", "Goals", 2).expect("renders");
        assert_eq!(*engine.style(), TextStyle::regular(config.body_size));
        engine.render_paragraph("Body");
        let canvas = engine.finish();
        let runs = body(&canvas.pages[0], &config);
        assert_eq!(runs[0].text, "4.1. Goals");
        assert_eq!(runs[0].style.variant, Variant::BOLD);
        assert_eq!(runs[1].style.variant, Variant::REGULAR);
        assert_eq!(canvas.bookmarks[0].title, "4.1. Goals");
    }

    #[test]
    fn heading_at_page_bottom_is_bookmarked_on_the_next_page() {
        let config = FlowConfig::default();
        let n = lines_per_page(&config);
        let mut engine = engine(config.clone());
        engine.render_paragraph(&one_word_per_line(n));
        engine.render_heading("2", "Next", 1).expect("renders");
        let canvas = engine.finish();
        assert_eq!(canvas.bookmarks[0].page_index, 1);
        assert_eq!(body(&canvas.pages[1], &config)[0].text, "2. Next");
    }

    #[test]
    fn title_block_only_on_first_page() {
        let mut engine = engine(FlowConfig::default());
        engine
            .render_title_block("TITLE", Align::Center, Pt(24.0), Weight::Bold)
            .expect("first page is fine");
        engine.break_page();
        assert!(matches!(
            engine.render_title_block("LATE", Align::Center, Pt(24.0), Weight::Bold),
            Err(PDFError::BlockUnsupported { block: "title", .. })
        ));
    }

    #[test]
    fn title_block_is_centred() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        engine
            .render_title_block("MINERVA\nsub", Align::Center, Pt(24.0), Weight::Bold)
            .expect("renders");
        let canvas = engine.finish();
        let runs = body(&canvas.pages[0], &config);
        assert_eq!(runs.len(), 2);
        for run in runs {
            let width = canvas.text_width(&run.text, &run.style);
            let centre = run.x + width / 2.0;
            let column_centre = config.margins.left + config.printable_width() / 2.0;
            assert!((centre.0 - column_centre.0).abs() < 0.01);
            assert_eq!(run.style.variant, Variant::BOLD);
        }
    }

    #[test]
    fn oversized_title_page_is_an_error() {
        let mut engine = engine(FlowConfig::default());
        engine.render_gap(Mm(240.0).into());
        assert!(matches!(
            engine.render_title_block("TITLE", Align::Center, Pt(24.0), Weight::Bold),
            Err(PDFError::TitlePageOverflow)
        ));
    }

    #[test]
    fn gaps_are_clamped_at_the_bottom_margin() {
        let mut engine = engine(FlowConfig::default());
        engine.render_gap(Mm(1000.0).into());
        assert_eq!(engine.state().current_y, engine.state().limit());
        assert_eq!(engine.state().page_number, 1);
        engine.render_paragraph("next");
        assert_eq!(engine.state().page_number, 2);
    }

    #[test]
    fn cover_art_moves_whole_to_the_next_page() {
        let config = FlowConfig::default();
        let mut engine = engine(config.clone());
        engine.render_gap(Mm(200.0).into());
        engine
            .render_cover_art("Cover", Mm(80.0).into(), Mm(80.0).into())
            .expect("renders");
        let canvas = engine.finish();
        assert!(canvas.pages[0].boxes.is_empty());
        let placed = &canvas.pages[1].boxes[0];
        assert_eq!(placed.y, config.margins.top);
        assert!(canvas.pages[1].lines().contains(&"Cover"));
    }

    #[test]
    fn cover_art_taller_than_a_page_is_unsupported() {
        let mut engine = engine(FlowConfig::default());
        assert!(matches!(
            engine.render_cover_art("Huge", Mm(80.0).into(), Mm(300.0).into()),
            Err(PDFError::BlockUnsupported { block: "cover art", .. })
        ));
    }

    #[test]
    fn forced_page_break() {
        let mut blocks = Manuscript::new();
        blocks.paragraph("one").page_break().paragraph("two");
        let canvas = FlowEngine::dry_run(
            &blocks,
            FlowConfig::default(),
            MonoMetrics::default(),
            Undecorated,
        )
        .expect("renders");
        assert_eq!(canvas.pages.len(), 2);
        assert_eq!(canvas.pages[1].lines(), vec!["two"]);
    }

    #[test]
    fn page_break_before_any_content_closes_an_empty_first_page() {
        let mut engine = engine(FlowConfig::default());
        engine.break_page();
        engine.render_paragraph("x");
        let canvas = engine.finish();

        assert_eq!(canvas.pages.len(), 2);
        assert_eq!(canvas.pages[0].lines(), vec!["Page 1"]);
        assert_eq!(canvas.pages[1].lines(), vec!["Running title", "x", "Page 2"]);
        for page in canvas.pages.iter() {
            assert!(!page.lines().contains(&"Page 0"));
        }
    }

    #[test]
    fn leading_page_break_block() {
        let mut blocks = Manuscript::new();
        blocks.page_break().paragraph("after");
        let canvas = FlowEngine::dry_run(
            &blocks,
            FlowConfig::default(),
            MonoMetrics::default(),
            RunningTitle::new("Running title"),
        )
        .expect("renders");
        assert_eq!(canvas.pages.len(), 2);
        assert_eq!(canvas.pages[0].lines(), vec!["Page 1"]);
        assert_eq!(canvas.pages[1].lines()[1], "after");
    }

    #[test]
    fn empty_manuscript_still_has_a_page() {
        let canvas = FlowEngine::dry_run(
            &Manuscript::new(),
            FlowConfig::default(),
            MonoMetrics::default(),
            RunningTitle::new("Running title"),
        )
        .expect("renders");
        assert_eq!(canvas.pages.len(), 1);
        assert_eq!(canvas.pages[0].lines(), vec!["Page 1"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FlowConfig::default().margins(Margins::all(Mm(150.0)));
        let canvas = RecordingCanvas::new(MonoMetrics::default(), config.page_size);
        assert!(matches!(
            FlowEngine::new(canvas, config, Undecorated),
            Err(PDFError::InvalidConfig(_))
        ));
    }
}
