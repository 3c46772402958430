use crate::layout::Margins;
use crate::pagesize::{PageSize, A4};
use crate::units::{Mm, Pt};
use crate::PDFError;

/// How a heading level is set
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeadingStyle {
    pub size: Pt,
    /// Height of each heading line; `None` uses the body line height
    pub line_height: Option<Pt>,
    pub space_before: Pt,
    pub space_after: Pt,
}

/// Page geometry and typographic settings for the flow engine.
///
/// The defaults describe an A4 page with 25mm margins, 12pt body text and 1.5 line
/// spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub body_size: Pt,
    pub line_spacing: f32,
    /// Extra space after every paragraph
    pub paragraph_gap: Pt,
    pub verbatim_size: Pt,
    /// Heading levels 1, 2 and 3
    pub headings: [HeadingStyle; 3],
    /// Distance from the top edge of the page to the running header's line box
    pub header_offset: Pt,
    /// Distance from the bottom edge of the page to the footer's line box
    pub footer_offset: Pt,
    pub decoration_size: Pt,
    /// Height of the header and footer line boxes
    pub decoration_height: Pt,
}

impl Default for FlowConfig {
    fn default() -> Self {
        FlowConfig {
            page_size: A4,
            margins: Margins::all(Mm(25.0)),
            body_size: Pt(12.0),
            line_spacing: 1.5,
            paragraph_gap: Mm(1.0).into(),
            verbatim_size: Pt(11.0),
            headings: [
                HeadingStyle {
                    size: Pt(14.0),
                    line_height: Some(Mm(8.0).into()),
                    space_before: Mm(4.0).into(),
                    space_after: Mm(2.0).into(),
                },
                HeadingStyle {
                    size: Pt(12.0),
                    line_height: None,
                    space_before: Mm(2.0).into(),
                    space_after: Mm(1.0).into(),
                },
                HeadingStyle {
                    size: Pt(12.0),
                    line_height: None,
                    space_before: Mm(1.0).into(),
                    space_after: Pt(0.0),
                },
            ],
            header_offset: Mm(12.0).into(),
            footer_offset: Mm(20.0).into(),
            decoration_size: Pt(9.0),
            decoration_height: Mm(8.0).into(),
        }
    }
}

impl FlowConfig {
    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn body_size(mut self, size: Pt) -> Self {
        self.body_size = size;
        self
    }

    pub fn line_spacing(mut self, factor: f32) -> Self {
        self.line_spacing = factor;
        self
    }

    /// Height of one line of body text. Derived from the body size and spacing factor on
    /// every call, so changing either changes the line height everywhere.
    pub fn line_height(&self) -> Pt {
        self.body_size * self.line_spacing
    }

    /// Height of a line of text set at `size`
    pub fn line_height_for(&self, size: Pt) -> Pt {
        size * self.line_spacing
    }

    /// The style of a heading level, if the level is one of 1, 2 or 3
    pub fn heading(&self, level: u8) -> Option<&HeadingStyle> {
        match level {
            1..=3 => self.headings.get(level as usize - 1),
            _ => None,
        }
    }

    pub fn heading_line_height(&self, style: &HeadingStyle) -> Pt {
        style.line_height.unwrap_or_else(|| self.line_height())
    }

    pub fn printable_width(&self) -> Pt {
        self.margins.printable_width(self.page_size)
    }

    /// The lowest point (from the top edge) body content may reach
    pub fn body_bottom(&self) -> Pt {
        self.page_size.1 - self.margins.bottom
    }

    /// Check that every body and heading line fits on an empty page, so that a page break
    /// always makes room for the line that triggered it, and that the header and footer
    /// zones stay clear of the body area. Title lines are sized per block and are checked
    /// while rendering instead.
    pub fn validate(&self) -> Result<(), PDFError> {
        let bad_spacing = self.line_spacing.is_nan() || self.line_spacing <= 0.0;
        let bad_size = self.body_size.0.is_nan() || self.body_size.0 <= 0.0;
        if bad_spacing || bad_size {
            return Err(PDFError::InvalidConfig(format!(
                "body size {} and line spacing {} must be positive",
                self.body_size.0, self.line_spacing
            )));
        }
        if self.printable_width() <= Pt(0.0) {
            return Err(PDFError::InvalidConfig(
                "left and right margins leave no printable width".to_string(),
            ));
        }

        let printable_height = self.margins.printable_height(self.page_size);
        let tallest = self
            .headings
            .iter()
            .map(|h| self.heading_line_height(h))
            .fold(self.line_height(), Pt::max);
        if tallest > printable_height {
            return Err(PDFError::InvalidConfig(format!(
                "a {}pt line does not fit in the {}pt printable height",
                tallest.0, printable_height.0
            )));
        }

        let header_bottom = self.header_offset + self.decoration_height;
        if header_bottom > self.margins.top {
            return Err(PDFError::InvalidConfig(format!(
                "the header ends {}pt from the top edge, below the {}pt top margin",
                header_bottom.0, self.margins.top.0
            )));
        }
        if self.footer_offset > self.margins.bottom {
            return Err(PDFError::InvalidConfig(format!(
                "the footer starts {}pt from the bottom edge, above the {}pt bottom margin",
                self.footer_offset.0, self.margins.bottom.0
            )));
        }
        if self.footer_offset < self.decoration_height {
            return Err(PDFError::InvalidConfig(format!(
                "a {}pt footer doesn't fit {}pt from the bottom edge",
                self.decoration_height.0, self.footer_offset.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_line_height_is_18pt() {
        let config = FlowConfig::default();
        assert_eq!(config.line_height(), Pt(18.0));
        let mm: Mm = config.line_height().into();
        assert!((mm.0 - 6.35).abs() < 0.01);
    }

    #[test]
    fn line_height_follows_size_and_spacing() {
        let config = FlowConfig::default().body_size(Pt(10.0)).line_spacing(2.0);
        assert_eq!(config.line_height(), Pt(20.0));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(FlowConfig::default().validate().is_ok());
    }

    #[test]
    fn heading_levels() {
        let config = FlowConfig::default();
        assert_eq!(config.heading(1).map(|h| h.size), Some(Pt(14.0)));
        assert!(config.heading(0).is_none());
        assert!(config.heading(4).is_none());
        let sub = config.heading(2).expect("level 2 exists");
        assert_eq!(config.heading_line_height(sub), config.line_height());
    }

    #[test]
    fn margins_too_wide_are_invalid() {
        let config = FlowConfig::default().margins(Margins::symmetric(Mm(10.0), Mm(110.0)));
        assert!(matches!(config.validate(), Err(PDFError::InvalidConfig(_))));
    }

    #[test]
    fn margins_too_tall_are_invalid() {
        let config = FlowConfig::default().margins(Margins::symmetric(Mm(145.0), Mm(10.0)));
        assert!(matches!(config.validate(), Err(PDFError::InvalidConfig(_))));
    }

    #[test]
    fn header_reaching_into_the_body_is_invalid() {
        // header box spans 12mm..20mm, body starts at 15mm
        let mut config = FlowConfig::default();
        config.margins.top = Mm(15.0).into();
        assert!(matches!(config.validate(), Err(PDFError::InvalidConfig(_))));

        config.margins.top = Mm(21.0).into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn footer_reaching_into_the_body_is_invalid() {
        // footer box spans 20mm..12mm above the bottom edge, body ends 15mm above it
        let mut config = FlowConfig::default();
        config.margins.bottom = Mm(15.0).into();
        assert!(matches!(config.validate(), Err(PDFError::InvalidConfig(_))));

        config.margins.bottom = Mm(20.0).into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn footer_hanging_off_the_page_is_invalid() {
        let mut config = FlowConfig::default();
        config.footer_offset = Mm(5.0).into();
        assert!(matches!(config.validate(), Err(PDFError::InvalidConfig(_))));
    }
}
