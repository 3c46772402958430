use pdf_writer::{Finish, Pdf, TextStr};

use crate::refs::{ObjectReferences, RefType};

/// The document outline (bookmarks). Entries form a tree through their `parent` index;
/// each entry fits its whole page into view.
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub parent: Option<usize>,
    pub page_index: usize,
    pub title: String,
}

impl Outline {
    /// Add a bookmark below `parent` (or at the top level), returning its index
    pub fn add_bookmark(
        &mut self,
        parent: Option<usize>,
        page_index: usize,
        title: String,
    ) -> usize {
        self.entries.push(OutlineEntry {
            parent: parent.filter(|&p| p < self.entries.len()),
            page_index,
            title,
        });
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn children(&self, parent: Option<usize>) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.parent == parent)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of visible descendants below `parent`; everything is written expanded
    fn descendants(&self, parent: usize) -> i32 {
        self.children(Some(parent))
            .into_iter()
            .map(|child| 1 + self.descendants(child))
            .sum()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<()> {
        let outlines_id = refs.gen(RefType::Outlines);
        for i in 0..self.entries.len() {
            refs.gen(RefType::OutlineEntry(i));
        }

        let top = self.children(None);
        let mut outline = writer.outline(outlines_id);
        if let (Some(&first), Some(&last)) = (top.first(), top.last()) {
            outline.first(refs.get(RefType::OutlineEntry(first))?);
            outline.last(refs.get(RefType::OutlineEntry(last))?);
            outline.count(self.entries.len() as i32);
        }
        outline.finish();

        for (i, entry) in self.entries.iter().enumerate() {
            let siblings = self.children(entry.parent);
            let position = siblings.iter().position(|&s| s == i)?;
            let kids = self.children(Some(i));

            let mut item = writer.outline_item(refs.get(RefType::OutlineEntry(i))?);
            item.parent(match entry.parent {
                Some(parent) => refs.get(RefType::OutlineEntry(parent))?,
                None => outlines_id,
            });
            item.title(TextStr(entry.title.as_str()));
            if position > 0 {
                item.prev(refs.get(RefType::OutlineEntry(siblings[position - 1]))?);
            }
            if let Some(&next) = siblings.get(position + 1) {
                item.next(refs.get(RefType::OutlineEntry(next))?);
            }
            if let (Some(&first), Some(&last)) = (kids.first(), kids.last()) {
                item.first(refs.get(RefType::OutlineEntry(first))?);
                item.last(refs.get(RefType::OutlineEntry(last))?);
                item.count(self.descendants(i));
            }
            item.dest()
                .page(refs.get(RefType::Page(entry.page_index))?)
                .fit();
        }

        Some(())
    }
}
