use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::Pt;
use crate::RenderError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn from a single baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
    /// Extra space between graphemes
    pub character_spacing: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub fill: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub start: (Pt, Pt),
    pub end: (Pt, Pt),
    pub thickness: Pt,
    pub colour: Colour,
}

/// Contents drawn through a shared transform and opacity
#[derive(Clone, PartialEq, Debug)]
pub struct GroupLayout {
    pub transform: Transform,
    /// 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
    pub contents: Vec<PageContents>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Rectangle(RectLayout),
    Line(LineLayout),
    Group(GroupLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Everything drawn on the page, in drawing order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_origin(Pt(0.0), Pt(0.0), size.0, size.1),
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_rectangle(&mut self, rect: Rect, fill: Colour) {
        self.contents
            .push(PageContents::Rectangle(RectLayout { rect, fill }));
    }


    /// Draw `contents` through `transform` at `opacity`. Opacity is clamped to `0.0..=1.0`.
    pub fn add_group(&mut self, transform: Transform, opacity: f32, contents: Vec<PageContents>) {
        self.contents.push(PageContents::Group(GroupLayout {
            transform,
            opacity: opacity.clamp(0.0, 1.0),
            contents,
        }));
    }

    /// Every distinct translucent opacity used on the page, in first-use order
    pub(crate) fn opacities(&self) -> Vec<f32> {
        fn collect(contents: &[PageContents], found: &mut Vec<f32>) {
            for content in contents {
                if let PageContents::Group(group) = content {
                    if group.opacity < 1.0 && !found.iter().any(|o| o.to_bits() == group.opacity.to_bits())
                    {
                        found.push(group.opacity);
                    }
                    collect(&group.contents, found);
                }
            }
        }

        let mut found = Vec::new();
        collect(&self.contents, &mut found);
        found
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), RenderError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(RenderError::PageMissing)?;
        let page_tree = refs
            .get(RefType::PageTree)
            .ok_or(RenderError::PageMissing)?;

        let opacities = self.opacities();
        let states: Vec<_> = (0..opacities.len())
            .map(|i| refs.gen(RefType::GraphicsState(page_index, i)))
            .collect();
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (i, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(i.index())) {
                resource_fonts.pair(Name(format!("F{}", i.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_states = resources.ext_g_states();
        for (i, state) in states.iter().enumerate() {
            resource_states.pair(Name(format!("GS{i}").as_bytes()), *state);
        }
        resource_states.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        for (opacity, state) in opacities.iter().zip(states.iter()) {
            writer
                .ext_graphics(*state)
                .non_stroking_alpha(*opacity)
                .stroking_alpha(*opacity);
        }

        let rendered = render_contents(&self.contents, fonts, &opacities)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colours, pagesize};

    #[test]
    fn groups_register_each_opacity_once() {
        let mut page = Page::new(pagesize::A4);
        page.add_group(Transform::identity(), 0.5, Vec::new());
        page.add_group(
            Transform::identity(),
            1.0,
            vec![PageContents::Group(GroupLayout {
                transform: Transform::identity(),
                opacity: 0.25,
                contents: Vec::new(),
            })],
        );
        page.add_group(Transform::identity(), 0.5, Vec::new());
        page.add_group(Transform::identity(), 7.0, Vec::new());
        assert_eq!(page.opacities(), vec![0.5, 0.25]);
    }

    #[test]
    fn page_size_is_the_media_box() {
        let mut page = Page::new((Pt(100.0), Pt(200.0)));
        page.add_rectangle(
            Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
            colours::BLACK,
        );
        assert_eq!(page.width(), Pt(100.0));
        assert_eq!(page.height(), Pt(200.0));
        assert_eq!(page.contents.len(), 1);
    }
}
