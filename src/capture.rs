use std::fmt;

use crate::host::{Cell, HostError, Table, TriState};
use crate::styles::{BorderSide, CellStyle, Edge, FillKind, TableLayout};

/// Samples the header style from cell (1, 1) and the body style from (2, 1).
///
/// A single-row table yields a body style equal to its header style. A table
/// without rows or columns yields the empty layout.
pub fn capture(table: &dyn Table) -> TableLayout {
    let (rows, columns) = (table.rows(), table.columns());
    if rows < 1 || columns < 1 {
        log::debug!("Nothing to capture from a {rows}x{columns} table");
        return TableLayout::default();
    }

    let header = sample(table, 1);
    let body = if rows >= 2 {
        sample(table, 2)
    } else {
        header.clone()
    };
    log::debug!("Captured layout from a {rows}x{columns} table");
    TableLayout { header, body }
}

fn sample(table: &dyn Table, row: usize) -> Option<CellStyle> {
    match table.cell(row, 1) {
        Ok(cell) => Some(read_cell_style(cell.as_ref())),
        Err(e) => {
            log::warn!("Cannot sample row {row}: {e}");
            None
        }
    }
}

/// Reads every attribute of `cell` in isolation; unreadable ones keep their defaults.
pub fn read_cell_style(cell: &dyn Cell) -> CellStyle {
    let mut style = CellStyle {
        fill_kind: read("fill type", || cell.fill_kind()).unwrap_or(FillKind::Background),
        ..CellStyle::default()
    };
    if let Some(color) = read("fill color", || cell.fill_color()) {
        style.fill_color = color;
    }
    if let Some(transparency) = read("fill transparency", || cell.fill_transparency()) {
        style.fill_transparency = transparency;
    }

    if let Some(name) = read("font name", || cell.font_name()) {
        style.font_name = name;
    }
    if let Some(size) = read("font size", || cell.font_size()) {
        style.font_size = size;
    }
    if let Some(bold) = read("bold", || cell.font_bold()) {
        style.font_bold = bold == TriState::True;
    }
    if let Some(italic) = read("italic", || cell.font_italic()) {
        style.font_italic = italic == TriState::True;
    }
    if let Some(color) = read("font color", || cell.font_color()) {
        style.font_color = color;
    }

    for edge in Edge::ALL {
        if let Some(points) = read(format_args!("{edge} margin"), || cell.margin(edge)) {
            *style.margins.get_mut(edge) = points;
        }
        *style.borders.get_mut(edge) = read_border(cell, edge);
    }
    style
}

fn read_border(cell: &dyn Cell, edge: Edge) -> BorderSide {
    let mut border = BorderSide::default();
    if let Some(visible) = read(format_args!("{edge} border visibility"), || {
        cell.border_visible(edge)
    }) {
        // Mixed counts as visible.
        border.visible = visible != TriState::False;
    }
    if let Some(color) = read(format_args!("{edge} border color"), || cell.border_color(edge)) {
        border.color = color;
    }
    if let Some(weight) = read(format_args!("{edge} border weight"), || cell.border_weight(edge)) {
        border.weight = weight;
    }
    if let Some(dash) = read(format_args!("{edge} border dash style"), || cell.border_dash(edge)) {
        border.dash = dash;
    }
    border
}

fn read<T>(what: impl fmt::Display, get: impl FnOnce() -> Result<T, HostError>) -> Option<T> {
    match get() {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Reading {what} failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CellMock;
    use crate::memory::{Attribute, MemoryTable};
    use crate::styles::{Color, DashPattern, Sides};
    use unimock::{matching, MockFn, Unimock};

    fn header() -> CellStyle {
        CellStyle {
            fill_kind: FillKind::Solid,
            fill_color: Color(0xC47244),
            fill_transparency: 0.25,
            font_name: "Aptos".to_string(),
            font_size: 14.0,
            font_bold: true,
            font_italic: false,
            font_color: Color::WHITE,
            margins: Sides::uniform(5.0),
            borders: Sides::uniform(BorderSide {
                visible: true,
                color: Color(0x123456),
                weight: 2.0,
                dash: DashPattern::Dashed,
            }),
        }
    }

    fn body() -> CellStyle {
        CellStyle {
            fill_kind: FillKind::Background,
            font_name: "Aptos".to_string(),
            font_size: 11.0,
            font_italic: true,
            margins: Sides {
                top: 1.0,
                bottom: 2.0,
                left: 3.0,
                right: 4.0,
            },
            borders: Sides {
                bottom: BorderSide {
                    visible: false,
                    ..BorderSide::default()
                },
                ..Sides::uniform(BorderSide::default())
            },
            ..CellStyle::default()
        }
    }

    #[test]
    fn samples_header_and_body_rows() {
        let table = MemoryTable::from_rows(2, &[header(), body(), CellStyle::default()]);
        let layout = capture(&table);
        assert_eq!(layout.header, Some(header()));
        assert_eq!(layout.body, Some(body()));
    }

    #[test]
    fn single_row_body_copies_header() {
        let table = MemoryTable::from_rows(3, &[header()]);
        let mut layout = capture(&table);
        assert_eq!(layout.body, layout.header);

        // Independent values: editing one section leaves the other alone.
        if let Some(body) = layout.body.as_mut() {
            body.font_size = 99.0;
        }
        assert_eq!(layout.header.map(|h| h.font_size), Some(14.0));
    }

    #[test]
    fn empty_table_captures_nothing() {
        assert!(capture(&MemoryTable::new(0, 3)).is_empty());
        assert!(capture(&MemoryTable::new(2, 0)).is_empty());
    }

    #[test]
    fn failed_fill_type_read_means_background() {
        let table = MemoryTable::from_rows(1, &[header()]);
        table.fail(Attribute::Fill);
        let style = capture(&table).header.unwrap();
        assert_eq!(style.fill_kind, FillKind::Background);
        assert_eq!(style.fill_color, Color(0xC47244));
    }

    #[test]
    fn one_failed_read_does_not_block_the_others() {
        let table = MemoryTable::from_rows(1, &[header()]);
        table.fail(Attribute::FontColor);
        table.fail(Attribute::Margin(Edge::Left));
        let style = capture(&table).header.unwrap();
        assert_eq!(style.font_color, Color::default());
        assert_eq!(style.margins.left, 0.0);
        assert_eq!(
            style,
            CellStyle {
                font_color: Color::default(),
                margins: Sides {
                    left: 0.0,
                    ..Sides::uniform(5.0)
                },
                ..header()
            }
        );
    }

    #[test]
    fn unreadable_border_fields_take_border_defaults() {
        let table = MemoryTable::from_rows(1, &[header()]);
        for attribute in [
            Attribute::BorderVisible(Edge::Top),
            Attribute::BorderColor(Edge::Top),
            Attribute::BorderWeight(Edge::Top),
            Attribute::BorderDash(Edge::Top),
        ] {
            table.fail(attribute);
        }
        let style = capture(&table).header.unwrap();
        assert_eq!(style.borders.top, BorderSide::default());
        assert_eq!(style.borders.bottom, header().borders.bottom);
    }

    #[test]
    fn missing_body_cell_leaves_body_empty() {
        let table = MemoryTable::from_rows(2, &[header(), body()]);
        table.remove_cell(2, 1);
        let layout = capture(&table);
        assert_eq!(layout.header, Some(header()));
        assert_eq!(layout.body, None);
    }

    #[test]
    fn mixed_font_flags_are_off_and_mixed_borders_are_visible() {
        let cell = Unimock::new((
            CellMock::fill_kind
                .each_call(matching!())
                .returns(Ok(FillKind::Other)),
            CellMock::fill_color
                .each_call(matching!())
                .returns(Ok(Color(0x00AA00))),
            CellMock::fill_transparency
                .each_call(matching!())
                .returns(Ok(0.0)),
            CellMock::font_name
                .each_call(matching!())
                .returns(Ok("Aptos".to_string())),
            CellMock::font_size.each_call(matching!()).returns(Ok(11.0)),
            CellMock::font_bold
                .each_call(matching!())
                .returns(Ok(TriState::Mixed)),
            CellMock::font_italic
                .each_call(matching!())
                .returns(Ok(TriState::Mixed)),
            CellMock::font_color
                .each_call(matching!())
                .returns(Ok(Color::BLACK)),
            CellMock::margin.each_call(matching!(_)).returns(Ok(3.6)),
            CellMock::border_visible
                .each_call(matching!(_))
                .returns(Ok(TriState::Mixed)),
            CellMock::border_color
                .each_call(matching!(_))
                .returns(Ok(Color::BLACK)),
            CellMock::border_weight
                .each_call(matching!(_))
                .returns(Ok(1.0)),
            CellMock::border_dash
                .each_call(matching!(_))
                .returns(Ok(DashPattern::Solid)),
        ));

        let style = read_cell_style(&cell);
        assert_eq!(style.fill_kind, FillKind::Other);
        assert!(!style.font_bold);
        assert!(!style.font_italic);
        for edge in Edge::ALL {
            assert!(style.borders.get(edge).visible);
        }
        assert_eq!(style.borders.top.weight, 1.0);
    }
}
