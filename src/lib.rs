//! Capture the look of one table and paint it onto others.
//!
//! A [`TableLayout`] holds a header and a body [`CellStyle`]. [`capture`]
//! samples one from a live table, [`apply`] writes one back, and a
//! [`Propagator`] keeps the last captured layout following the host's
//! selection until a new capture replaces or clears it.

pub mod apply;
pub mod capture;
pub mod edit;
pub mod host;
pub mod memory;
pub mod propagation;
pub mod settings;
pub mod styles;

pub use apply::apply;
pub use capture::capture;
pub use host::{Cell, HostError, Selection, SelectionKind, ShapeId, Table, TableShape, TriState};
pub use propagation::{Propagator, State};
pub use settings::{SettingsError, SettingsStore};
pub use styles::{BorderSide, CellStyle, Color, DashPattern, Edge, FillKind, Sides, TableLayout};

/// Table shape targeted by an explicit command: a selected table, or a table
/// whose text is being edited.
fn selected_table_shape(selection: &dyn Selection) -> Option<Box<dyn TableShape + '_>> {
    match selection.kind() {
        SelectionKind::Shapes | SelectionKind::Text => {}
        kind => {
            log::debug!("No table in a {kind:?} selection");
            return None;
        }
    }
    match selection.table_shape() {
        Ok(shape) => shape,
        Err(e) => {
            log::debug!("Cannot inspect selection: {e}");
            None
        }
    }
}

/// Captures the selected table as the template to propagate. Capturing with
/// no table selected clears the template.
pub fn capture_from_selection(propagator: &Propagator, selection: &dyn Selection) {
    match selected_table_shape(selection) {
        Some(shape) => propagator.arm(capture(shape.table()), shape.id()),
        None => propagator.disarm(),
    }
}

/// Applies the persisted default layout to the selected table, once.
pub fn apply_default_to_selection(store: &SettingsStore, selection: &dyn Selection) {
    let Some(shape) = selected_table_shape(selection) else {
        return;
    };
    let layout = store.load_default_layout();
    log::info!("Applying default layout to {}", shape.id());
    apply_template(&layout, shape.table());
}

/// Applies `layout` to `table` directly, without touching the propagator.
pub fn apply_template(layout: &TableLayout, table: &dyn Table) {
    apply(table, layout);
}
