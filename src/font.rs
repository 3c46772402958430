use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TTF or OTF face. Faces are embedded in their entirety in the generated PDF.
///
/// Inside a [`Document`](crate::Document), fonts are referred to by their arena id; the
/// layout engine never holds a `Font` directly, it asks a [`FontSet`](crate::FontSet) for
/// the id matching a style variant.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if it carries one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given
    /// font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face().units_per_em() as f32;
        scaling * self.face().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the
    /// given font size. Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let scaling: Pt = size / self.face().units_per_em() as f32;
        scaling * self.face().descender() as f32
    }

    /// Whether the face maps `ch` to a real glyph
    pub fn covers(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0).filter(|&i| i > 0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// The glyph drawn for `ch`: its own glyph, else U+FFFD, else '?', else `.notdef`
    pub fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| {
                log::warn!("font has no glyph for {ch:?}, using a replacement");
                self.replacement_glyph_id()
            })
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Horizontal advance of a single character at the given size. Characters without a
    /// glyph advance by the replacement glyph they will be drawn with.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let scaling: Pt = size / self.face().units_per_em() as f32;
        let gid = self
            .glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0);
        scaling * self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / self.face().units_per_em() as f32;

        // cid -> scaled advance, sorted so that runs of consecutive ids can be grouped
        let mut id_widths: Vec<(u16, f32)> = self
            .glyphs_sizing(&self.glyph_ids())
            .into_iter()
            .map(|(cid, (_, (width, _)))| (cid, width as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(id, _)| *id);

        // the most popular width becomes the default
        let mut widths_counts: HashMap<u32, usize> = HashMap::new();
        for (_, width) in id_widths.iter() {
            *widths_counts.entry(width.to_bits()).or_insert(0) += 1;
        }
        let most_common_width = widths_counts
            .iter()
            .max_by_key(|&(&bits, &count)| (count, bits))
            .map(|(&bits, _)| f32::from_bits(bits))
            .unwrap_or(1000.0);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        let mut runs = id_widths.into_iter();
        if let Some((first_cid, first_width)) = runs.next() {
            let mut start_cid: u16 = first_cid;
            let mut current_widths: Vec<f32> = vec![first_width];
            for (cid, width) in runs {
                if (cid - start_cid) as usize > current_widths.len() {
                    widths.consecutive(start_cid, current_widths.clone());
                    start_cid = cid;
                    current_widths.clear();
                }
                current_widths.push(width);
            }
            widths.consecutive(start_cid, current_widths);
        }
        widths.finish();

        cid_font.default_width(most_common_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let sizing = self.glyphs_sizing(&self.glyph_ids());
        let max_width = sizing.values().map(|&(_, (w, _))| w).max().unwrap_or_default();
        let max_height = sizing.values().map(|&(_, (_, h))| h).max().unwrap_or_default();
        let sum_width: usize = sizing.values().map(|&(_, (w, _))| w as usize).sum();
        let avg_width = sum_width as f32 / sizing.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face();
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.replace(' ', "-").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags: FontFlags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: face.descender() as f32 * scaling,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .unwrap_or_else(|| face.capital_height().unwrap_or_default()) as f32
                * scaling,
        );
        // TODO: derive from the OS/2 weight class instead of a fixed stem width
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn glyph_ids(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0)
                            .and_modify(|existing| *existing = (*existing).min(ch))
                            .or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyphs_sizing(&self, ids: &HashMap<u16, char>) -> HashMap<u16, (char, (u16, i16))> {
        let face = self.face();
        let mut ids_augmented: HashMap<u16, (char, (u16, i16))> = HashMap::new();
        for (&id, &ch) in ids.iter() {
            if let Some(gid) = face.glyph_index(ch) {
                if let Some(h_advance) = face.glyph_hor_advance(gid) {
                    let height = face
                        .glyph_bounding_box(gid)
                        .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                        .unwrap_or(1000);
                    ids_augmented.insert(id, (ch, (h_advance, height)));
                }
            }
        }
        ids_augmented
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map: String = r#"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo
<< /Registry (Adobe)
/Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
"#
        .replace("\r\n", "\n");

        let mut ids: Vec<(u16, char)> = self.glyph_ids().into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries sharing a high byte
        for block in ids.chunk_by(|a, b| a.0 >> 8 == b.0 >> 8) {
            for block in block.chunks(100) {
                map.push_str(&format!("{} beginbfchar\n", block.len()));
                for &(id, ch) in block {
                    let mut utf16 = [0u16; 2];
                    let encoded: String = ch
                        .encode_utf16(&mut utf16)
                        .iter()
                        .map(|unit| format!("{unit:04x}"))
                        .collect();
                    map.push_str(&format!("<{id:04x}> <{encoded}>\n"));
                }
                map.push_str("endbfchar\n");
            }
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}
