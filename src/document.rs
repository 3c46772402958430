use crate::{
    font::Font,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;
use std::path::Path;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write] or [Document::write_to_path]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Get the 0-based index of a page given its ID
    pub fn index_of_page(&self, page: Id<Page>) -> Option<usize> {
        self.page_order.iter().position(|&p| p == page)
    }

    /// The page at a 0-based position in the document
    pub fn page_at(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|&id| self.pages.get(id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can refer to them by id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add a bookmark in the document outline pointing to a page with a given index,
    /// returning the bookmark's index for use as a later `parent`
    pub fn add_bookmark<S: ToString>(
        &mut self,
        parent: Option<usize>,
        title: S,
        page_index: usize,
    ) -> usize {
        self.outline
            .add_bookmark(parent, page_index, title.to_string())
    }

    /// Render the entire document to PDF bytes in memory
    pub fn render(&self) -> Result<Vec<u8>, PDFError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, so bookmarks can refer to them
        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (i, font) in self.fonts.iter() {
            font.write(&mut refs, i, &mut writer);
        }

        for (page_index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, &self.fonts, &mut writer)?;
        }

        let has_outline = !self.outline.is_empty();
        if has_outline {
            self.outline
                .write(&mut refs, &mut writer)
                .ok_or(PDFError::PageMissing)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines) = refs.get(RefType::Outlines).filter(|_| has_outline) {
            catalog.outlines(outlines);
        }
        catalog.finish();

        Ok(writer.finish())
    }

    /// Write the entire document to the writer. The whole document is rendered in memory
    /// first, so nothing reaches `w` if rendering fails.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), PDFError> {
        let bytes = self.render()?;
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }

    /// Render the document and write it to `path`. The bytes go to a temporary file next
    /// to the destination, which is then renamed over it, so a failed write never leaves a
    /// half-written file behind.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), PDFError> {
        let path = path.as_ref();
        let bytes = self.render()?;

        let failure = |source: std::io::Error| PDFError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let file_name = path
            .file_name()
            .ok_or_else(|| failure(std::io::Error::other("destination has no file name")))?;
        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(file_name);
        temp_name.push(".partial");
        let temp_path = path.with_file_name(temp_name);

        let written = std::fs::write(&temp_path, &bytes)
            .and_then(|_| std::fs::rename(&temp_path, path));
        if let Err(e) = written {
            // best effort, the temporary may not exist
            let _ = std::fs::remove_file(&temp_path);
            return Err(failure(e));
        }

        log::info!(
            "wrote {} ({} pages, {} bytes)",
            path.display(),
            self.page_count(),
            bytes.len()
        );
        Ok(())
    }
}
