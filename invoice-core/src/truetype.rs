use std::collections::BTreeMap;

use crate::error::{RenderError, Result};

/// Measurement data extracted from a TrueType font.
///
/// Holds just enough of the font to answer width queries in the same
/// 1/1000 em convention as the builtin tables. Glyph outlines and
/// embedding data stay with the rendering collaborator.
#[derive(Debug)]
pub struct TrueTypeMetrics {
    family_name: String,
    units_per_em: u16,
    /// Unicode codepoint -> glyph ID
    cmap: BTreeMap<u32, u16>,
    /// Glyph ID -> advance width in font units
    advances: BTreeMap<u16, u16>,
    default_advance: u16,
}

impl TrueTypeMetrics {
    /// Parse metrics from raw .ttf bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| RenderError::FontParse(e.to_string()))?;

        let units_per_em = face.units_per_em();
        let family_name = extract_family_name(&face).unwrap_or_else(|| "Unknown".to_string());

        // Build cmap: Unicode -> GlyphID
        let mut cmap = BTreeMap::new();
        let subtables = face
            .tables()
            .cmap
            .ok_or_else(|| RenderError::FontParse("font has no cmap table".to_string()))?;
        for subtable in subtables.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let Some(gid) = subtable.glyph_index(cp) {
                    cmap.insert(cp, gid.0);
                }
            });
        }

        // Advance widths from hmtx
        let mut advances = BTreeMap::new();
        for gid in 0..face.number_of_glyphs() {
            let width = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
            advances.insert(gid, width);
        }
        // Missing characters fall back to glyph 0 (notdef)
        let default_advance = advances.get(&0).copied().unwrap_or(0);

        Ok(TrueTypeMetrics {
            family_name,
            units_per_em,
            cmap,
            advances,
            default_advance,
        })
    }

    /// The font's family name, or "Unknown" if the name table lacks one.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Width of a character in 1/1000 em units.
    pub fn char_width(&self, ch: char) -> u16 {
        let gid = self.cmap.get(&(ch as u32)).copied().unwrap_or(0);
        let raw = self
            .advances
            .get(&gid)
            .copied()
            .unwrap_or(self.default_advance);
        ((raw as u32 * 1000) / self.units_per_em as u32) as u16
    }

    /// Measure text width in the units of `font_size`.
    pub fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        let total: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        total as f64 * font_size / 1000.0
    }
}

/// Extract the font family name from the name table.
fn extract_family_name(face: &ttf_parser::Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .and_then(|name| name.to_string())
}
