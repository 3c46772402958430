use crate::style::{Slant, Weight};
use crate::units::{Mm, Pt};

/// Horizontal placement of title lines
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// One unit of document content. Each kind has a fixed way of being laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A numbered section title; `level` 1 is a section, 2 a subsection, 3 a minor heading
    Heading {
        level: u8,
        number: String,
        text: String,
    },
    /// Body text, wrapped to the column
    Paragraph { text: String },
    /// Wrapped text in a given weight and slant, with no paragraph gap after it
    StyledLine {
        text: String,
        weight: Weight,
        slant: Slant,
    },
    /// A `•` item, shifted right by `indent`
    Bullet { text: String, indent: Pt },
    /// An `N.` item, shifted right by `indent`
    NumberedItem { index: u32, text: String, indent: Pt },
    /// A bold label immediately followed by regular text on the same line
    LabelValue { label: String, value: String },
    /// Literal lines in a smaller italic face, never wrapped
    Verbatim { lines: Vec<String> },
    /// Large text on the title page. Lines split on `\n` and are aligned one by one.
    TitleBlock {
        text: String,
        align: Align,
        size: Pt,
        weight: Weight,
    },
    /// A framed placeholder box standing in for cover art, with a centred caption
    CoverArt {
        caption: String,
        width: Pt,
        height: Pt,
    },
    /// Vertical space
    Gap(Pt),
    /// Continue on a fresh page
    PageBreak,
}

/// Default indent of bullet and numbered items
pub const LIST_INDENT: Mm = Mm(10.0);

impl Block {
    /// A short name for the kind of block, for logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::StyledLine { .. } => "styled line",
            Block::Bullet { .. } => "bullet",
            Block::NumberedItem { .. } => "numbered item",
            Block::LabelValue { .. } => "label/value",
            Block::Verbatim { .. } => "verbatim",
            Block::TitleBlock { .. } => "title",
            Block::CoverArt { .. } => "cover art",
            Block::Gap(_) => "gap",
            Block::PageBreak => "page break",
        }
    }
}

/// The text of a heading line: `"1. Topic"` for a bare number, `"4.1. Goals"` when the
/// number already ends in a period, just the title when there is no number
pub fn heading_label(number: &str, text: &str) -> String {
    let number = number.trim();
    if number.is_empty() {
        text.to_string()
    } else if number.ends_with('.') {
        format!("{number} {text}")
    } else {
        format!("{number}. {text}")
    }
}

/// An ordered list of blocks, in render order. Built up front and never changed while
/// it's being rendered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Manuscript {
    blocks: Vec<Block>,
}

impl Manuscript {
    pub fn new() -> Manuscript {
        Manuscript::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn heading<N: ToString, S: ToString>(
        &mut self,
        level: u8,
        number: N,
        text: S,
    ) -> &mut Self {
        self.push(Block::Heading {
            level,
            number: number.to_string(),
            text: text.to_string(),
        })
    }

    pub fn paragraph<S: ToString>(&mut self, text: S) -> &mut Self {
        self.push(Block::Paragraph {
            text: text.to_string(),
        })
    }

    pub fn styled<S: ToString>(&mut self, text: S, weight: Weight, slant: Slant) -> &mut Self {
        self.push(Block::StyledLine {
            text: text.to_string(),
            weight,
            slant,
        })
    }

    pub fn bold<S: ToString>(&mut self, text: S) -> &mut Self {
        self.styled(text, Weight::Bold, Slant::Upright)
    }

    pub fn italic<S: ToString>(&mut self, text: S) -> &mut Self {
        self.styled(text, Weight::Regular, Slant::Italic)
    }

    pub fn bullet<S: ToString>(&mut self, text: S) -> &mut Self {
        self.push(Block::Bullet {
            text: text.to_string(),
            indent: LIST_INDENT.into(),
        })
    }

    pub fn numbered<S: ToString>(&mut self, index: u32, text: S) -> &mut Self {
        self.push(Block::NumberedItem {
            index,
            text: text.to_string(),
            indent: LIST_INDENT.into(),
        })
    }

    pub fn label_value<L: ToString, V: ToString>(&mut self, label: L, value: V) -> &mut Self {
        self.push(Block::LabelValue {
            label: label.to_string(),
            value: value.to_string(),
        })
    }

    pub fn verbatim<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.push(Block::Verbatim {
            lines: lines.into_iter().map(|l| l.to_string()).collect(),
        })
    }

    pub fn title<S: ToString>(&mut self, text: S, size: Pt, weight: Weight) -> &mut Self {
        self.push(Block::TitleBlock {
            text: text.to_string(),
            align: Align::Center,
            size,
            weight,
        })
    }

    pub fn cover_art<S: ToString>(&mut self, caption: S, width: Pt, height: Pt) -> &mut Self {
        self.push(Block::CoverArt {
            caption: caption.to_string(),
            width,
            height,
        })
    }

    pub fn gap<D: Into<Pt>>(&mut self, height: D) -> &mut Self {
        self.push(Block::Gap(height.into()))
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.push(Block::PageBreak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_labels() {
        assert_eq!(heading_label("1", "Topic"), "1. Topic");
        assert_eq!(heading_label("4.1.", "Goals"), "4.1. Goals");
        assert_eq!(heading_label("", "Appendix"), "Appendix");
    }

    #[test]
    fn builder_keeps_order() {
        let mut doc = Manuscript::new();
        doc.heading(1, "1", "Topic")
            .paragraph("Body")
            .bullet("Item")
            .gap(Mm(2.0))
            .page_break();
        let kinds: Vec<&str> = doc.blocks().iter().map(Block::kind).collect();
        assert_eq!(kinds, vec!["heading", "paragraph", "bullet", "gap", "page break"]);
    }

    #[test]
    fn list_items_get_the_default_indent() {
        let mut doc = Manuscript::new();
        doc.numbered(3, "Third");
        match &doc.blocks()[0] {
            Block::NumberedItem { index, indent, .. } => {
                assert_eq!(*index, 3);
                assert_eq!(*indent, Pt::from(LIST_INDENT));
            }
            other => panic!("unexpected block {other:?}"),
        }
    }
}
