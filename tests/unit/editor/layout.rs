use super::*;

fn square() -> Canvas {
    Canvas {
        width: 1080,
        height: 1080,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn side_by_side_first_slot_matches_reference_box() {
    let r = slot_box(Arrangement::SideBySide, square(), 0, 2);
    assert!(approx(r.x0, 21.6));
    assert!(approx(r.y0, 162.0));
    assert!(approx(r.width(), 486.0));
    assert!(approx(r.height(), 756.0));

    let second = slot_box(Arrangement::SideBySide, square(), 1, 2);
    assert!(approx(second.x0, 561.6));
}

#[test]
fn stacked_slots_share_x_and_split_height() {
    let a = slot_box(Arrangement::Stacked, square(), 0, 2);
    let b = slot_box(Arrangement::Stacked, square(), 1, 2);
    assert!(approx(a.x0, 108.0));
    assert!(approx(a.y0, 54.0));
    assert!(approx(b.y0, 540.0));
    assert!(approx(a.width(), 864.0));
    assert!(approx(a.height(), 432.0));
}

#[test]
fn grid_subdivides_and_wraps() {
    let c = square();
    let cells: Vec<Rect> = (0..4).map(|i| slot_box(Arrangement::Grid, c, i, 4)).collect();
    assert!(approx(cells[0].x0, 27.0));
    assert!(approx(cells[1].x0, 567.0));
    assert!(approx(cells[2].y0, 567.0));
    assert!(approx(cells[3].width(), 486.0));
    assert_eq!(slot_box(Arrangement::Grid, c, 4, 4), cells[0]);

    let single = slot_box(Arrangement::Single, c, 0, 1);
    assert!(approx(single.width(), 972.0));
}

#[test]
fn placement_fits_aspect_and_alternates_tilt() {
    let p = place_image(
        Size::new(400.0, 300.0),
        Arrangement::SideBySide,
        square(),
        0,
        2,
    );
    assert!(approx(p.x, 21.6));
    assert!(approx(p.width, 486.0));
    assert!(approx(p.height, 364.5));
    assert_eq!(p.rotation, -3.0);
    assert_eq!(p.scale_x, 1.0);

    let q = place_image(Size::new(300.0, 600.0), Arrangement::SideBySide, square(), 1, 2);
    assert!(approx(q.height, 756.0));
    assert!(approx(q.width, 378.0));
    assert_eq!(q.rotation, 3.0);
}
