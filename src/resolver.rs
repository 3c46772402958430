//! Picks the one font family a document is set in.
//!
//! A family is only usable when all four of its faces load and its regular face has glyphs
//! for every script the document's text is written in. Candidates are tried in order; the
//! first usable one wins.

use crate::document::Document;
use crate::font::Font;
use crate::style::Variant;
use crate::PDFError;
use id_arena::Id;
use std::path::{Path, PathBuf};

/// A writing system the chosen family has to cover
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Script {
    Latin,
    Cyrillic,
}

impl Script {
    /// Characters that must all map to real glyphs for the script to count as covered
    pub fn sample(self) -> &'static str {
        match self {
            Script::Latin => "AZaz09.,;:!?()-",
            Script::Cyrillic => "АЯабвгдежзийклмнопрстуфхцчшщъьюя",
        }
    }
}

/// The four font files making up one family on disk
#[derive(Debug, Clone, PartialEq)]
pub struct FontFamily {
    pub name: String,
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

impl FontFamily {
    /// A family whose files all sit in `dir`, named `<stem><suffix>.ttf`
    pub fn in_dir<P: AsRef<Path>>(
        name: &str,
        dir: P,
        stem: &str,
        suffixes: [&str; 4],
    ) -> FontFamily {
        let dir = dir.as_ref();
        let [regular, bold, italic, bold_italic] =
            suffixes.map(|suffix| dir.join(format!("{stem}{suffix}.ttf")));
        FontFamily {
            name: name.to_string(),
            regular,
            bold,
            italic,
            bold_italic,
        }
    }

    pub fn times_new_roman<P: AsRef<Path>>(dir: P) -> FontFamily {
        FontFamily::in_dir(
            "Times New Roman",
            dir,
            "Times_New_Roman",
            ["", "_Bold", "_Italic", "_Bold_Italic"],
        )
    }

    pub fn dejavu_serif<P: AsRef<Path>>(dir: P) -> FontFamily {
        FontFamily::in_dir(
            "DejaVu Serif",
            dir,
            "DejaVuSerif",
            ["", "-Bold", "-Italic", "-BoldItalic"],
        )
    }

    pub fn liberation_serif<P: AsRef<Path>>(dir: P) -> FontFamily {
        FontFamily::in_dir(
            "Liberation Serif",
            dir,
            "LiberationSerif",
            ["-Regular", "-Bold", "-Italic", "-BoldItalic"],
        )
    }

    /// File backing a variant
    pub fn path(&self, variant: Variant) -> &Path {
        match variant.index() {
            0 => &self.regular,
            1 => &self.bold,
            2 => &self.italic,
            _ => &self.bold_italic,
        }
    }

    fn load(&self) -> Result<LoadedFamily, String> {
        let mut faces = Vec::with_capacity(4);
        for variant in Variant::ALL {
            let path = self.path(variant);
            let bytes = std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
            let font = Font::load(bytes).map_err(|e| format!("{}: {e}", path.display()))?;
            faces.push(font);
        }
        LoadedFamily::from_fonts(&self.name, faces).map_err(|e| e.to_string())
    }
}

/// The four parsed faces of a family, ready to be registered with a [`Document`]
pub struct LoadedFamily {
    pub name: String,
    faces: [Font; 4],
}

impl LoadedFamily {
    /// Build a family from already-loaded faces, in [`Variant::ALL`] order
    pub fn from_fonts(name: &str, faces: Vec<Font>) -> Result<LoadedFamily, PDFError> {
        let faces: [Font; 4] = faces.try_into().map_err(|faces: Vec<Font>| {
            PDFError::FontUnavailable {
                tried: name.to_string(),
                reason: format!("expected 4 faces, got {}", faces.len()),
            }
        })?;
        Ok(LoadedFamily {
            name: name.to_string(),
            faces,
        })
    }

    /// Parse a family from raw font bytes, in [`Variant::ALL`] order
    pub fn from_bytes(name: &str, faces: [Vec<u8>; 4]) -> Result<LoadedFamily, PDFError> {
        let faces = faces
            .into_iter()
            .map(Font::load)
            .collect::<Result<Vec<Font>, PDFError>>()?;
        LoadedFamily::from_fonts(name, faces)
    }

    pub fn face(&self, variant: Variant) -> &Font {
        &self.faces[variant.index()]
    }

    /// The first script (if any) whose sample characters the regular face can't draw
    pub fn missing_script(&self, scripts: &[Script]) -> Option<Script> {
        let regular = self.face(Variant::REGULAR);
        scripts
            .iter()
            .copied()
            .find(|script| !script.sample().chars().all(|ch| regular.covers(ch)))
    }

    /// Move the faces into the document's font arena
    pub fn register(self, document: &mut Document) -> FontSet {
        let LoadedFamily { name, faces } = self;
        let ids = faces.map(|font| document.add_font(font));
        FontSet { family: name, ids }
    }
}

/// A family registered in a [`Document`]. Resolving a variant can't fail: all four faces
/// were registered up front.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSet {
    pub family: String,
    ids: [Id<Font>; 4],
}

impl FontSet {
    pub fn resolve(&self, variant: Variant) -> Id<Font> {
        self.ids[variant.index()]
    }
}

/// Walks a chain of candidate families and loads the first usable one
#[derive(Debug, Clone)]
pub struct FontResolver {
    pub candidates: Vec<FontFamily>,
    pub required_scripts: Vec<Script>,
}

impl Default for FontResolver {
    /// Times New Roman, then DejaVu Serif, then Liberation Serif, from the usual Linux
    /// font directories; the text must cover Latin and Cyrillic
    fn default() -> Self {
        FontResolver {
            candidates: vec![
                FontFamily::times_new_roman("/usr/share/fonts/truetype/msttcorefonts"),
                FontFamily::dejavu_serif("/usr/share/fonts/truetype/dejavu"),
                FontFamily::liberation_serif("/usr/share/fonts/truetype/liberation"),
            ],
            required_scripts: vec![Script::Latin, Script::Cyrillic],
        }
    }
}

impl FontResolver {
    pub fn new(candidates: Vec<FontFamily>, required_scripts: Vec<Script>) -> FontResolver {
        FontResolver {
            candidates,
            required_scripts,
        }
    }

    /// Put a family at the front of the chain
    pub fn prefer(mut self, family: FontFamily) -> FontResolver {
        self.candidates.insert(0, family);
        self
    }

    /// Load the first candidate whose faces all parse and cover every required script
    pub fn load(&self) -> Result<LoadedFamily, PDFError> {
        let mut reasons: Vec<String> = Vec::with_capacity(self.candidates.len());
        for candidate in self.candidates.iter() {
            match candidate.load() {
                Ok(family) => match family.missing_script(&self.required_scripts) {
                    None => {
                        log::debug!("using font family {}", candidate.name);
                        return Ok(family);
                    }
                    Some(script) => {
                        log::debug!("font family {} lacks {script:?} glyphs", candidate.name);
                        reasons.push(format!("{} has no {script:?} glyphs", candidate.name));
                    }
                },
                Err(reason) => {
                    log::debug!("font family {} unavailable: {reason}", candidate.name);
                    reasons.push(reason);
                }
            }
        }

        Err(PDFError::FontUnavailable {
            tried: self
                .candidates
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            reason: if reasons.is_empty() {
                "no candidate families configured".to_string()
            } else {
                reasons.join("; ")
            },
        })
    }

    /// Load the family and register it with `document`
    pub fn register(&self, document: &mut Document) -> Result<FontSet, PDFError> {
        Ok(self.load()?.register(document))
    }
}
