//! Live propagation of a captured layout to newly selected tables.

use std::cell::{Cell, RefCell};

use crate::apply::apply;
use crate::host::{Selection, SelectionKind, ShapeId};
use crate::styles::TableLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing captured.
    Idle,
    /// A layout is held and follows the selection.
    Armed,
}

#[derive(Debug, Clone)]
struct Template {
    layout: TableLayout,
    source: ShapeId,
}

/// Holds the last captured layout for the session and reapplies it whenever a
/// different table shape gets selected.
///
/// Methods take `&self` so a host callback can re-enter while an apply is in
/// progress; the `applying` flag turns such nested notifications into no-ops.
/// Not `Sync`: hosts delivering notifications from several threads must wrap
/// it in a mutex.
#[derive(Debug, Default)]
pub struct Propagator {
    captured: RefCell<Option<Template>>,
    applying: Cell<bool>,
}

impl Propagator {
    pub fn new() -> Propagator {
        Propagator::default()
    }

    pub fn state(&self) -> State {
        if self.captured.borrow().is_some() {
            State::Armed
        } else {
            State::Idle
        }
    }

    pub fn is_applying(&self) -> bool {
        self.applying.get()
    }

    pub fn source(&self) -> Option<ShapeId> {
        self.captured.borrow().as_ref().map(|t| t.source)
    }

    pub fn layout(&self) -> Option<TableLayout> {
        self.captured.borrow().as_ref().map(|t| t.layout.clone())
    }

    pub fn arm(&self, layout: TableLayout, source: ShapeId) {
        log::info!("Template captured from {source}");
        *self.captured.borrow_mut() = Some(Template { layout, source });
    }

    pub fn disarm(&self) {
        if self.captured.borrow_mut().take().is_some() {
            log::info!("Template cleared");
        }
    }

    /// Reaction to the host's selection-change notification.
    pub fn on_selection_changed(&self, selection: &dyn Selection) {
        if self.applying.get() {
            log::debug!("Selection changed while applying, ignored");
            return;
        }
        let Some(source) = self.source() else {
            return;
        };
        if selection.kind() != SelectionKind::Shapes {
            return;
        }
        let shape = match selection.table_shape() {
            Ok(Some(shape)) => shape,
            Ok(None) => return,
            Err(e) => {
                log::debug!("Cannot inspect selection: {e}");
                return;
            }
        };
        if shape.id() == source {
            log::debug!("Selected the template's own {source}, skipped");
            return;
        }
        let Some(layout) = self.layout() else {
            return;
        };

        log::info!("Propagating template from {source} to {}", shape.id());
        let _applying = Applying::enter(&self.applying);
        apply(shape.table(), &layout);
    }
}

/// Raises the flag for its lifetime, lowering it on drop even if apply unwinds.
struct Applying<'a>(&'a Cell<bool>);

impl<'a> Applying<'a> {
    fn enter(flag: &'a Cell<bool>) -> Applying<'a> {
        flag.set(true);
        Applying(flag)
    }
}

impl Drop for Applying<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
