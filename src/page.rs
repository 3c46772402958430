use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Content, Finish, Name, Pdf};

/// A font face at a given size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text positioned on a page. `coords` is the start of the baseline, in PDF
/// page space (origin at the bottom-left).
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    RawContent(Vec<u8>),
}

/// A single page: its size, the box content is meant to stay in, and what's drawn on it
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents, in drawing order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a new page of the given size. Without margins, the content box covers the
    /// whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        // consecutive spans share one text object
        if let Some(PageContents::Text(spans)) = self.contents.last_mut() {
            spans.push(span);
        } else {
            self.contents.push(PageContents::Text(vec![span]));
        }
    }

    /// Add arbitrary [`pdf_writer::Content`] (rules, boxes) to the page
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(PageContents::RawContent(content.finish()));
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get(RefType::Page(page_index)).ok_or(PDFError::PageMissing)?;
        let page_tree = refs.get(RefType::PageTree).ok_or(PDFError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(i.index())) {
                resource_fonts.pair(Name(format!("F{}", i.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, &compressed)
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}
