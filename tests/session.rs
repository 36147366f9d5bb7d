use std::rc::Rc;

use rstest::{fixture, rstest};
use table_painter::memory::{Attribute, MemorySelection, MemoryShape, MemoryTable};
use table_painter::settings::builtin_default;
use table_painter::{
    apply_default_to_selection, apply_template, capture, capture_from_selection, BorderSide,
    CellStyle, Color, DashPattern, FillKind, Propagator, SettingsStore, ShapeId, Sides, State,
};

fn header() -> CellStyle {
    CellStyle {
        fill_kind: FillKind::Solid,
        fill_color: Color(0x3C1E0A),
        fill_transparency: 0.1,
        font_name: "Segoe UI".to_string(),
        font_size: 13.0,
        font_bold: true,
        font_italic: false,
        font_color: Color::WHITE,
        margins: Sides::uniform(4.0),
        borders: Sides::uniform(BorderSide {
            visible: true,
            color: Color(0x333333),
            weight: 1.0,
            dash: DashPattern::Solid,
        }),
    }
}

fn body() -> CellStyle {
    CellStyle {
        fill_kind: FillKind::Background,
        font_name: "Segoe UI".to_string(),
        font_size: 11.0,
        font_color: Color(0x222222),
        margins: Sides::uniform(2.0),
        borders: Sides {
            left: BorderSide {
                visible: false,
                ..BorderSide::default()
            },
            right: BorderSide {
                visible: false,
                ..BorderSide::default()
            },
            ..Sides::uniform(BorderSide {
                visible: true,
                color: Color(0xAAAAAA),
                weight: 0.5,
                dash: DashPattern::Dashed,
            })
        },
        ..CellStyle::default()
    }
}

#[fixture]
fn source() -> Rc<MemoryShape> {
    Rc::new(MemoryShape::with_table(
        ShapeId(10),
        MemoryTable::from_rows(4, &[header(), body(), body()]),
    ))
}

fn blank(id: i32, rows: usize, columns: usize) -> Rc<MemoryShape> {
    Rc::new(MemoryShape::with_table(
        ShapeId(id),
        MemoryTable::new(rows, columns),
    ))
}

fn table(shape: &MemoryShape) -> &MemoryTable {
    shape.table().expect("shape holds a table")
}

#[rstest]
fn captured_layout_round_trips_onto_another_table(source: Rc<MemoryShape>) {
    let captured = capture(table(&source));
    let target = blank(11, 3, 2);
    apply_template(&captured, table(&target));
    assert_eq!(capture(table(&target)), captured);
    assert_eq!(table(&target).style(3, 2), Some(body()));
}

#[rstest]
fn capture_arms_and_follows_the_selection(source: Rc<MemoryShape>) {
    let propagator = Propagator::new();
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![source.clone()]));
    assert_eq!(propagator.state(), State::Armed);
    assert_eq!(propagator.source(), Some(ShapeId(10)));

    let first = blank(20, 3, 2);
    let second = blank(21, 2, 5);
    propagator.on_selection_changed(&MemorySelection::shapes(vec![first.clone()]));
    propagator.on_selection_changed(&MemorySelection::shapes(vec![second.clone()]));

    assert_eq!(table(&first).style(1, 2), Some(header()));
    assert_eq!(table(&first).style(3, 1), Some(body()));
    assert_eq!(table(&second).style(2, 5), Some(body()));
    assert_eq!(propagator.state(), State::Armed);
}

#[rstest]
fn capture_accepts_text_editing_inside_a_table(source: Rc<MemoryShape>) {
    let propagator = Propagator::new();
    capture_from_selection(&propagator, &MemorySelection::text(source));
    assert_eq!(propagator.state(), State::Armed);
}

#[rstest]
fn capture_without_table_clears_the_template(source: Rc<MemoryShape>) {
    let propagator = Propagator::new();
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![source]));

    let picture = Rc::new(MemoryShape::plain(ShapeId(30)));
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![picture]));
    assert_eq!(propagator.state(), State::Idle);

    let target = blank(31, 2, 2);
    propagator.on_selection_changed(&MemorySelection::shapes(vec![target.clone()]));
    assert!(table(&target).writes().is_empty());

    capture_from_selection(&propagator, &MemorySelection::empty());
    assert_eq!(propagator.state(), State::Idle);
}

#[rstest]
fn reselecting_the_source_does_not_repaint_it(source: Rc<MemoryShape>) {
    let propagator = Propagator::new();
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![source.clone()]));
    propagator.on_selection_changed(&MemorySelection::shapes(vec![source.clone()]));
    assert!(table(&source).writes().is_empty());
}

#[rstest]
fn nested_notifications_during_apply_are_ignored(source: Rc<MemoryShape>) {
    let propagator = Rc::new(Propagator::new());
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![source]));

    let target = blank(40, 3, 2);
    let selection = Rc::new(MemorySelection::shapes(vec![target.clone()]));
    {
        // Every write raises a selection change, as a live host does.
        let propagator = Rc::clone(&propagator);
        let selection = Rc::clone(&selection);
        table(&target).on_write(move || {
            assert!(propagator.is_applying());
            propagator.on_selection_changed(selection.as_ref());
        });
    }

    propagator.on_selection_changed(selection.as_ref());
    let fills = |t: &MemoryTable| {
        t.writes()
            .iter()
            .filter(|w| w.attribute == Attribute::Fill)
            .count()
    };
    assert_eq!(fills(table(&target)), 6);
    assert!(!propagator.is_applying());

    // Still armed: the next genuine selection change applies again.
    propagator.on_selection_changed(selection.as_ref());
    assert_eq!(fills(table(&target)), 12);
}

#[rstest]
fn one_failing_cell_attribute_leaves_the_rest_applied(source: Rc<MemoryShape>) {
    let propagator = Propagator::new();
    capture_from_selection(&propagator, &MemorySelection::shapes(vec![source]));

    let target = blank(50, 2, 2);
    table(&target).fail_at(1, 1, Attribute::FontColor);
    propagator.on_selection_changed(&MemorySelection::shapes(vec![target.clone()]));

    let corner = table(&target).style(1, 1).expect("cell exists");
    assert_eq!(corner.font_color, Color::default());
    assert_eq!(corner.margins, header().margins);
    assert_eq!(corner.borders, header().borders);
    assert_eq!(table(&target).style(1, 2), Some(header()));
}

#[test]
fn default_layout_is_applied_to_the_selected_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SettingsStore::new(dir.path().join("settings.xml"));
    let target = blank(60, 2, 2);
    apply_default_to_selection(&store, &MemorySelection::shapes(vec![target.clone()]));

    let expected = builtin_default();
    assert_eq!(table(&target).style(1, 1), expected.header);
    assert_eq!(table(&target).style(2, 2), expected.body);
}

#[test]
fn default_layout_targets_shape_and_text_selections() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = SettingsStore::new(dir.path().join("settings.xml"));
    let target = blank(61, 2, 2);
    apply_default_to_selection(&store, &MemorySelection::text(target.clone()));
    assert!(!table(&target).writes().is_empty());

    let other = blank(62, 2, 2);
    let slides = MemorySelection::new(table_painter::SelectionKind::Slides, vec![other.clone()]);
    apply_default_to_selection(&store, &slides);
    assert!(table(&other).writes().is_empty());
}
