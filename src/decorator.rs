//! Running headers and footers.
//!
//! The flow engine calls a [`PageDecorator`] whenever a page opens (header, never on the
//! first page) and closes (footer, on every page). Decorations are drawn in the zones
//! between the body margins and the page edges, with their own explicit style, so the
//! body style is untouched when control returns to the engine.

use crate::canvas::{PageCanvas, TextRun};
use crate::colour::colours;
use crate::config::FlowConfig;
use crate::style::TextStyle;
use crate::units::Pt;

pub trait PageDecorator {
    /// Stamp the top of a page that is about to receive body content
    fn header(&self, canvas: &mut dyn PageCanvas, page_number: usize, config: &FlowConfig);

    /// Stamp the bottom of a page that is about to be closed
    fn footer(&self, canvas: &mut dyn PageCanvas, page_number: usize, config: &FlowConfig);
}

/// Pages without headers or footers
#[derive(Debug, Default, Copy, Clone)]
pub struct Undecorated;

impl PageDecorator for Undecorated {
    fn header(&self, _: &mut dyn PageCanvas, _: usize, _: &FlowConfig) {}

    fn footer(&self, _: &mut dyn PageCanvas, _: usize, _: &FlowConfig) {}
}

/// A centred running title at the top of every page but the first, and a centred
/// `"<label> <n>"` page number at the bottom of every page, both small grey italics
#[derive(Debug, Clone, PartialEq)]
pub struct RunningTitle {
    pub title: String,
    pub page_label: String,
}

impl RunningTitle {
    pub fn new<S: ToString>(title: S) -> RunningTitle {
        RunningTitle {
            title: title.to_string(),
            page_label: "Page".to_string(),
        }
    }

    /// Word printed before the page number
    pub fn page_label<S: ToString>(mut self, label: S) -> RunningTitle {
        self.page_label = label.to_string();
        self
    }

    pub fn footer_text(&self, page_number: usize) -> String {
        format!("{} {}", self.page_label, page_number)
    }

    fn style(config: &FlowConfig) -> TextStyle {
        TextStyle::italic(config.decoration_size).with_colour(colours::MID_GREY)
    }

    fn draw_centred(canvas: &mut dyn PageCanvas, text: &str, y: Pt, config: &FlowConfig) {
        let style = Self::style(config);
        let width = canvas.text_width(text, &style);
        let left = config.margins.left;
        let x = left + (config.printable_width() - width) / 2.0;
        canvas.draw_text(TextRun {
            text: text.to_string(),
            x: x.max(left),
            y,
            height: config.decoration_height,
            style,
        });
    }
}

impl PageDecorator for RunningTitle {
    fn header(&self, canvas: &mut dyn PageCanvas, _page_number: usize, config: &FlowConfig) {
        Self::draw_centred(canvas, &self.title, config.header_offset, config);
    }

    fn footer(&self, canvas: &mut dyn PageCanvas, page_number: usize, config: &FlowConfig) {
        let y = config.page_size.1 - config.footer_offset;
        Self::draw_centred(canvas, &self.footer_text(page_number), y, config);
    }
}
