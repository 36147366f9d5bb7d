use std::fmt;

use crate::host::{Cell, HostError, Table};
use crate::styles::{BorderSide, CellStyle, Edge, FillKind, TableLayout};

/// Writes `layout` onto every cell of `table`: row 1 gets the header style,
/// all other rows the body style. Rows whose style is missing are skipped.
///
/// Never fails. Cells that cannot be reached and attributes the host refuses
/// are logged and skipped.
pub fn apply(table: &dyn Table, layout: &TableLayout) {
    if layout.is_empty() {
        log::debug!("Empty layout, nothing to apply");
        return;
    }

    let (rows, columns) = (table.rows(), table.columns());
    let mut failures = 0;
    for row in 1..=rows {
        let Some(style) = layout.for_row(row) else {
            log::debug!("No style for row {row}, skipped");
            continue;
        };
        for column in 1..=columns {
            match table.cell(row, column) {
                Ok(cell) => failures += apply_cell_style(cell.as_ref(), style),
                Err(e) => log::warn!("Skipping cell ({row}, {column}): {e}"),
            }
        }
    }
    if failures > 0 {
        log::info!("Applied layout to a {rows}x{columns} table, {failures} attribute(s) rejected");
    } else {
        log::debug!("Applied layout to a {rows}x{columns} table");
    }
}

/// Applies one style to one cell, attribute by attribute. Returns how many
/// attribute writes the host rejected.
pub fn apply_cell_style(cell: &dyn Cell, style: &CellStyle) -> usize {
    let mut failures = 0;

    attempt(&mut failures, "fill", || match style.fill_kind {
        FillKind::Background => cell.set_fill_background(),
        FillKind::Solid | FillKind::Other => {
            cell.set_fill_solid()?;
            cell.set_fill_color(style.fill_color)?;
            cell.set_fill_transparency(style.fill_transparency)
        }
    });

    if !style.font_name.is_empty() {
        attempt(&mut failures, "font name", || {
            cell.set_font_name(&style.font_name)
        });
    }
    if style.font_size > 0.0 {
        attempt(&mut failures, "font size", || {
            cell.set_font_size(style.font_size)
        });
    }
    attempt(&mut failures, "bold", || cell.set_font_bold(style.font_bold));
    attempt(&mut failures, "italic", || {
        cell.set_font_italic(style.font_italic)
    });
    attempt(&mut failures, "font color", || {
        cell.set_font_color(style.font_color)
    });

    for edge in Edge::ALL {
        attempt(&mut failures, format_args!("{edge} margin"), || {
            cell.set_margin(edge, style.margins.get(edge))
        });
    }
    for edge in Edge::ALL {
        failures += apply_border(cell, edge, &style.borders.get(edge));
    }
    failures
}

/// Visibility goes first; colour, weight and dash are only written to a
/// visible border.
pub fn apply_border(cell: &dyn Cell, edge: Edge, border: &BorderSide) -> usize {
    let mut failures = 0;
    attempt(&mut failures, format_args!("{edge} border visibility"), || {
        cell.set_border_visible(edge, border.visible)
    });
    if border.visible {
        attempt(&mut failures, format_args!("{edge} border color"), || {
            cell.set_border_color(edge, border.color)
        });
        attempt(&mut failures, format_args!("{edge} border weight"), || {
            cell.set_border_weight(edge, border.weight)
        });
        attempt(&mut failures, format_args!("{edge} border dash style"), || {
            cell.set_border_dash(edge, border.dash)
        });
    }
    failures
}

fn attempt(
    failures: &mut usize,
    what: impl fmt::Display,
    set: impl FnOnce() -> Result<(), HostError>,
) {
    if let Err(e) = set() {
        log::debug!("Setting {what} failed: {e}");
        *failures += 1;
    }
}
