use super::*;
use crate::scene::model::{DecorationKind, IdAllocator, TextAlign};

fn text(id: ElementId) -> TextLabel {
    TextLabel {
        id,
        text: "früher".to_string(),
        font_family: "Arial".to_string(),
        font_size: 32.0,
        fill: Color::WHITE,
        background: None,
        background_opacity: 1.0,
        padding: 12.0,
        stroke: None,
        align: TextAlign::Left,
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
    }
}

fn deco(id: ElementId) -> Decoration {
    Decoration {
        id,
        kind: DecorationKind::Swirl,
        source: None,
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        opacity: 1.0,
        tint: None,
    }
}

#[test]
fn find_and_remove_cover_every_collection() {
    let mut ids = IdAllocator::default();
    let mut slide = Slide::new(ids.slide(), SlideKind::Start, Color::WHITE);
    let t = ids.element();
    let d = ids.element();
    slide.push(Element::Text(text(t)));
    slide.push(Element::Decoration(deco(d)));

    assert!(matches!(slide.find(t), Some(ElementRef::Text(_))));
    assert!(matches!(slide.find(d), Some(ElementRef::Decoration(_))));
    assert_eq!(slide.z_order(), vec![d, t]);
    assert_eq!(slide.element_count(), 2);

    let removed = slide.remove(t).unwrap();
    assert_eq!(removed.id(), t);
    assert!(!slide.contains(t));
    assert!(slide.remove(t).is_none());
}

#[test]
fn last_slide_cannot_be_removed() {
    let mut ids = IdAllocator::default();
    let first = Slide::new(ids.slide(), SlideKind::Start, Color::WHITE);
    let mut project = Project::new("p", "vermittlung", CanvasFormat::Instagram, first);
    assert!(project.remove_slide(0).is_err());
    assert_eq!(project.slides.len(), 1);

    let at = project.insert_slide(99, Slide::new(ids.slide(), SlideKind::End, Color::BLACK));
    assert_eq!(at, 1);
    assert!(project.remove_slide(5).is_err());
    let removed = project.remove_slide(0).unwrap();
    assert_eq!(removed.kind, SlideKind::Start);
    assert_eq!(project.slides.len(), 1);
    assert!(project.remove_slide(0).is_err());
}

#[test]
fn project_canvas_follows_format() {
    let mut ids = IdAllocator::default();
    let p = Project::new(
        "p",
        "c",
        CanvasFormat::Story,
        Slide::new(ids.slide(), SlideKind::Content, Color::WHITE),
    );
    assert_eq!(p.canvas().height, 1920);
    assert!(p.slide(1).is_err());
}
