use crate::{
    layout::FontMetrics,
    refs::{ObjectReferences, RefType},
    RenderError,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded in their
/// entirety in the generated PDF, so large fonts may dramatically increase the size of
/// the generated PDF.
///
/// A font answers glyph metric queries (through [FontMetrics]) for layout, and knows how to
/// write itself into a PDF once it has been added to a [crate::Document].
pub struct Font {
    pub face: OwnedFace,
}

/// Per-glyph data gathered when embedding: the character a glyph was mapped from, its
/// advance and its height, in design units
struct GlyphInfo {
    ch: char,
    advance: u16,
    height: i16,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Parse a second, independent copy of this font, e.g. to embed it into another document
    pub fn reload(&self) -> Result<Font, RenderError> {
        Font::load(self.face.as_slice().to_vec())
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the full name of the font, if the font carries one
    pub fn name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if the font carries one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face()
            .glyph_index(ch)
            .map(|i| i.0)
            .filter(|&index| index > 0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// The glyph drawn for `ch`: its own glyph, the replacement glyph, or `.notdef`
    pub fn glyph_id_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .unwrap_or(0)
    }

    fn design_to_pdf(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    fn glyphs(&self) -> HashMap<u16, GlyphInfo> {
        // Adapted from printpdf
        let face = self.face();
        let mut map: HashMap<u16, GlyphInfo> = HashMap::new();
        let Some(cmap) = face.tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                let Some(gid) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                else {
                    return;
                };
                let Some(advance) = face.glyph_hor_advance(gid) else {
                    return;
                };
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                map.entry(gid.0).or_insert(GlyphInfo {
                    ch,
                    advance,
                    height,
                });
            });
        }

        map
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &HashMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);

        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = self.design_to_pdf();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        // the most popular advance becomes the default width
        let mut advance_counts: HashMap<u16, usize> = HashMap::new();
        for glyph in glyphs.values() {
            *advance_counts.entry(glyph.advance).or_insert(0) += 1;
        }
        let default_width = advance_counts
            .iter()
            .max_by_key(|&(&advance, &count)| (count, advance))
            .map(|(&advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        let mut widths: Vec<(u16, f32)> = glyphs
            .iter()
            .map(|(&gid, glyph)| (gid, glyph.advance as f32 * scaling))
            .collect();
        widths.sort_by_key(|&(gid, _)| gid);

        // write runs of consecutive glyph ids as one block each
        let mut writer_widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (gid, width) in widths {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => run.push(width),
                Some(start) => {
                    writer_widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(width);
                }
                None => {
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            writer_widths.consecutive(start, run.drain(..));
        }
        writer_widths.finish();

        cid_font.default_width(default_width);
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
        glyphs: &HashMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);
        let face = self.face();
        let scaling = self.design_to_pdf();

        let max_width = glyphs.values().map(|g| g.advance).max().unwrap_or_default();
        let max_height = glyphs.values().map(|g| g.height).max().unwrap_or_default();
        let sum_width: usize = glyphs.values().map(|g| g.advance as usize).sum();
        let avg_width = sum_width as f32 / glyphs.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let family = self.family().unwrap_or_else(|| name.clone());

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max.max(max_height)) as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        // TODO: derive the stem width from the OS/2 weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &HashMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = glyphs.iter().map(|(&gid, g)| (gid, g.ch)).collect();
        ids.sort_by_key(|&(gid, _)| gid);

        // bfchar blocks hold at most 100 entries that share a high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (gid, ch) in ids {
            match blocks.last_mut() {
                Some(block)
                    if block.len() < 100 && block[0].0 >> 8 == gid >> 8 =>
                {
                    block.push((gid, ch))
                }
                _ => blocks.push(vec![(gid, ch)]),
            }
        }

        for block in blocks {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let glyphs = self.glyphs();

        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl FontMetrics for Font {
    fn units_per_em(&self) -> u16 {
        self.face().units_per_em()
    }

    fn ascender(&self) -> i16 {
        self.face().ascender()
    }

    fn descender(&self) -> i16 {
        self.face().descender()
    }

    fn glyph_advance(&self, ch: char) -> Option<u16> {
        self.glyph_id(ch)
            .map(|gid| self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default())
    }

    fn replacement_advance(&self) -> u16 {
        self.replacement_glyph_id()
            .and_then(|gid| self.face().glyph_hor_advance(GlyphId(gid)))
            .unwrap_or_default()
    }
}
