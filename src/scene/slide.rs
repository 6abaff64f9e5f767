use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, CanvasFormat};
use crate::foundation::error::{PostError, PostResult};
use crate::scene::model::{
    Decoration, Element, ElementId, ElementRef, ImageElement, SlideId, TextLabel,
};

/// Role of a slide inside a multi-slide post; gates the dynamic overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Opening slide: name, "since" caption and swirl ornaments.
    Start,
    /// Body slide: optional story-text box.
    #[default]
    Content,
    /// Closing slide: quote and thanks.
    End,
}

/// One exportable composition.
///
/// Elements live in three per-kind collections; draw order across them is fixed by the
/// compositor (decorations, then images, then text), and within each collection follows
/// insertion order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slide {
    /// Slide id.
    pub id: SlideId,
    /// Slide role.
    pub kind: SlideKind,
    /// Photos in draw order.
    #[serde(default)]
    pub images: Vec<ImageElement>,
    /// Text labels in draw order.
    #[serde(default)]
    pub text_labels: Vec<TextLabel>,
    /// User decorations in draw order.
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    /// Background fill.
    pub background: Color,
    /// Free-form story text shown on content slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_text: Option<String>,
}

impl Slide {
    /// Empty slide of `kind` with a background fill.
    pub fn new(id: SlideId, kind: SlideKind, background: Color) -> Self {
        Self {
            id,
            kind,
            images: Vec::new(),
            text_labels: Vec::new(),
            decorations: Vec::new(),
            background,
            story_text: None,
        }
    }

    /// Look up any element by id.
    pub fn find(&self, id: ElementId) -> Option<ElementRef<'_>> {
        if let Some(e) = self.images.iter().find(|e| e.id == id) {
            return Some(ElementRef::Image(e));
        }
        if let Some(e) = self.text_labels.iter().find(|e| e.id == id) {
            return Some(ElementRef::Text(e));
        }
        self.decorations
            .iter()
            .find(|e| e.id == id)
            .map(ElementRef::Decoration)
    }

    /// `true` when an element with `id` exists on this slide.
    pub fn contains(&self, id: ElementId) -> bool {
        self.find(id).is_some()
    }

    pub fn image_mut(&mut self, id: ElementId) -> Option<&mut ImageElement> {
        self.images.iter_mut().find(|e| e.id == id)
    }

    pub fn text_mut(&mut self, id: ElementId) -> Option<&mut TextLabel> {
        self.text_labels.iter_mut().find(|e| e.id == id)
    }

    pub fn decoration_mut(&mut self, id: ElementId) -> Option<&mut Decoration> {
        self.decorations.iter_mut().find(|e| e.id == id)
    }

    /// Remove an element from whichever collection owns it.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        if let Some(i) = self.images.iter().position(|e| e.id == id) {
            return Some(Element::Image(self.images.remove(i)));
        }
        if let Some(i) = self.text_labels.iter().position(|e| e.id == id) {
            return Some(Element::Text(self.text_labels.remove(i)));
        }
        if let Some(i) = self.decorations.iter().position(|e| e.id == id) {
            return Some(Element::Decoration(self.decorations.remove(i)));
        }
        None
    }

    /// Insert an owned element at the top of its collection.
    pub fn push(&mut self, element: Element) {
        match element {
            Element::Image(e) => self.images.push(e),
            Element::Text(e) => self.text_labels.push(e),
            Element::Decoration(e) => self.decorations.push(e),
        }
    }

    /// Element ids bottom-to-top in draw order.
    pub fn z_order(&self) -> Vec<ElementId> {
        self.decorations
            .iter()
            .map(|e| e.id)
            .chain(self.images.iter().map(|e| e.id))
            .chain(self.text_labels.iter().map(|e| e.id))
            .collect()
    }

    /// Total number of elements.
    pub fn element_count(&self) -> usize {
        self.images.len() + self.text_labels.len() + self.decorations.len()
    }
}

/// Optional facts about the animal shown in overlays.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimalInfo {
    /// "Since" caption, e.g. the adoption date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Ordered slides sharing one canvas format.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Working title.
    pub name: String,
    /// Selected post category id (see [`crate::EditorConfig::categories`]).
    pub category_id: String,
    /// Animal name used in overlays and export file names; may be empty.
    #[serde(default)]
    pub animal_name: String,
    /// Extra overlay facts.
    #[serde(default)]
    pub animal_info: AnimalInfo,
    /// Output format shared by every slide.
    pub format: CanvasFormat,
    /// Slides in export order; never empty.
    pub slides: Vec<Slide>,
}

impl Project {
    /// Project with a single first slide.
    pub fn new(
        name: impl Into<String>,
        category_id: impl Into<String>,
        format: CanvasFormat,
        first: Slide,
    ) -> Self {
        Self {
            name: name.into(),
            category_id: category_id.into(),
            animal_name: String::new(),
            animal_info: AnimalInfo::default(),
            format,
            slides: vec![first],
        }
    }

    /// Fixed canvas of the project's format.
    pub fn canvas(&self) -> Canvas {
        self.format.canvas()
    }

    /// Slide at `index`.
    pub fn slide(&self, index: usize) -> PostResult<&Slide> {
        self.slides.get(index).ok_or_else(|| {
            PostError::validation(format!(
                "slide index {index} out of range (project has {})",
                self.slides.len()
            ))
        })
    }

    /// Insert a slide at `index` (clamped to the end).
    pub fn insert_slide(&mut self, index: usize, slide: Slide) -> usize {
        let at = index.min(self.slides.len());
        self.slides.insert(at, slide);
        at
    }

    /// Remove the slide at `index`. Removing the last remaining slide is refused.
    pub fn remove_slide(&mut self, index: usize) -> PostResult<Slide> {
        if self.slides.len() <= 1 {
            return Err(PostError::validation(
                "cannot delete the last remaining slide",
            ));
        }
        self.slide(index)?;
        Ok(self.slides.remove(index))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/slide.rs"]
mod tests;
