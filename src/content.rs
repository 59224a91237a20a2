//! Content stream rendering for page contents.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{GroupLayout, LineLayout, PageContents, RectLayout, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;
use unicode_segmentation::UnicodeSegmentation;

/// Renders page contents to a PDF content stream.
///
/// `opacities` is the page's table of opacity graphics states; a group whose opacity is
/// below 1 selects `/GS{index}` from it.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
    opacities: &[f32],
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    write_contents(&mut content, contents, fonts, opacities)?;
    Ok(content)
}

fn write_contents(
    content: &mut Vec<u8>,
    contents: &[PageContents],
    fonts: &Arena<Font>,
    opacities: &[f32],
) -> Result<(), std::io::Error> {
    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(content, spans, fonts)?,
            PageContents::Rectangle(rect) => render_rectangle(content, rect)?,
            PageContents::Line(line) => render_line(content, line)?,
            PageContents::Group(group) => render_group(content, group, fonts, opacities)?,
        }
    }
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_group(
    content: &mut Vec<u8>,
    group: &GroupLayout,
    fonts: &Arena<Font>,
    opacities: &[f32],
) -> Result<(), std::io::Error> {
    if group.contents.is_empty() {
        return Ok(());
    }

    write!(content, "q\n")?;
    if !group.transform.is_identity() {
        let t = &group.transform;
        write!(content, "{} {} {} {} {} {} cm\n", t.a, t.b, t.c, t.d, t.e, t.f)?;
    }
    if let Some(index) = opacity_index(opacities, group.opacity) {
        write!(content, "/GS{index} gs\n")?;
    }
    write_contents(content, &group.contents, fonts, opacities)?;
    write!(content, "Q\n")?;
    Ok(())
}

/// The graphics state drawing at `opacity` selects, or `None` for fully opaque drawing
pub(crate) fn opacity_index(opacities: &[f32], opacity: f32) -> Option<usize> {
    if opacity >= 1.0 {
        return None;
    }
    opacities
        .iter()
        .position(|o| o.to_bits() == opacity.to_bits())
}

#[allow(clippy::write_with_newline)]
fn render_rectangle(content: &mut Vec<u8>, rect: &RectLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_colour(content, rect.fill)?;
    write!(
        content,
        "{} {} {} {} re\nf\n",
        *rect.rect.x1,
        *rect.rect.y1,
        *rect.rect.width(),
        *rect.rect.height()
    )?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_line(content: &mut Vec<u8>, line: &LineLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write_stroke_colour(content, line.colour)?;
    write!(content, "{} w\n", *line.thickness)?;
    write!(content, "{} {} m\n", *line.start.0, *line.start.1)?;
    write!(content, "{} {} l\n", *line.end.0, *line.end.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;

    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        *current_font.size
    )?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        let Some(font) = fonts.get(current_font.id) else {
            continue;
        };

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        if *span.character_spacing == 0.0 || *current_font.size == 0.0 {
            write!(content, "<")?;
            write_glyphs(content, font, &span.text)?;
            write!(content, "> Tj\n")?;
        } else {
            // TJ offsets are in thousandths of a text space unit and move the pen backwards
            let adjustment = -*span.character_spacing * 1000.0 / *current_font.size;
            write!(content, "[")?;
            for (i, grapheme) in span.text.graphemes(true).enumerate() {
                if i > 0 {
                    write!(content, " {adjustment} ")?;
                }
                write!(content, "<")?;
                write_glyphs(content, font, grapheme)?;
                write!(content, ">")?;
            }
            write!(content, "] TJ\n")?;
        }
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

fn write_glyphs(content: &mut Vec<u8>, font: &Font, text: &str) -> Result<(), std::io::Error> {
    for ch in text.chars() {
        write!(content, "{:04x}", font.glyph_id_or_replacement(ch))?;
    }
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} K\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, Rect, Transform};
    use crate::Pt;

    fn render(contents: &[PageContents], opacities: &[f32]) -> String {
        let fonts: Arena<Font> = Arena::new();
        String::from_utf8(render_contents(contents, &fonts, opacities).expect("can render"))
            .expect("content is ascii")
    }

    #[test]
    fn rectangles_fill_and_lines_stroke() {
        let rendered = render(
            &[
                PageContents::Rectangle(RectLayout {
                    rect: Rect::from_origin(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0)),
                    fill: colours::WHITE,
                }),
                PageContents::Line(LineLayout {
                    start: (Pt(0.0), Pt(0.0)),
                    end: (Pt(5.0), Pt(0.0)),
                    thickness: Pt(2.0),
                    colour: colours::BLACK,
                }),
            ],
            &[],
        );
        assert!(rendered.contains("1 g\n10 20 30 40 re\nf\n"));
        assert!(rendered.contains("0 G\n2 w\n0 0 m\n5 0 l\nS\n"));
    }

    #[test]
    fn groups_select_their_opacity_state() {
        let group = |opacity| {
            PageContents::Group(GroupLayout {
                transform: Transform::translate(Pt(1.0), Pt(2.0)),
                opacity,
                contents: vec![PageContents::Line(LineLayout {
                    start: (Pt(0.0), Pt(0.0)),
                    end: (Pt(1.0), Pt(1.0)),
                    thickness: Pt(1.0),
                    colour: colours::BLACK,
                })],
            })
        };
        let rendered = render(&[group(0.5), group(0.25), group(1.0)], &[0.5, 0.25]);
        assert!(rendered.contains("1 0 0 1 1 2 cm\n/GS0 gs\n"));
        assert!(rendered.contains("/GS1 gs\n"));
        assert_eq!(rendered.matches(" gs\n").count(), 2);
    }

    #[test]
    fn empty_groups_draw_nothing() {
        let rendered = render(
            &[PageContents::Group(GroupLayout {
                transform: Transform::identity(),
                opacity: 0.5,
                contents: Vec::new(),
            })],
            &[0.5],
        );
        assert!(rendered.is_empty());
    }
}
