//! Turns the high-level contents of a page into PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::RawContent(c) => {
                write!(&mut content, "q\n")?;
                content.write_all(c.as_slice())?;
                write!(&mut content, "\nQ\n")?;
            }
        }
    }

    Ok(content)
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

    write_font(content, current_font)?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
        write!(content, "<")?;
        if let Some(font) = fonts.get(current_font.id) {
            for ch in span.text.chars() {
                write!(content, "{:04x}", font.glyph_or_fallback(ch))?;
            }
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_content_is_wrapped_in_a_graphics_state() {
        let fonts: Arena<Font> = Arena::new();
        let rendered = render_contents(&[PageContents::RawContent(b"0 0 m".to_vec())], &fonts)
            .expect("can render");
        assert_eq!(rendered, b"q\n0 0 m\nQ\n");
    }

    #[test]
    fn grey_and_rgb_colours() {
        let mut out = Vec::new();
        write_colour(&mut out, Colour::Grey { g: 0.5 }).expect("can write");
        write_colour(&mut out, Colour::RGB { r: 1.0, g: 0.0, b: 0.0 }).expect("can write");
        assert_eq!(String::from_utf8_lossy(&out), "0.5 g\n1 0 0 rg\n");
    }
}
