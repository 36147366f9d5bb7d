//! In-memory document model implementing the host traits.
//!
//! Used for dry runs from the command line and for exercising capture, apply
//! and propagation without an office application. Faults can be injected per
//! attribute, and every successful write is recorded.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{Cell, HostError, Selection, SelectionKind, ShapeId, Table, TableShape, TriState};
use crate::styles::{CellStyle, Color, DashPattern, Edge, FillKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Fill,
    FillColor,
    FillTransparency,
    FontName,
    FontSize,
    FontBold,
    FontItalic,
    FontColor,
    Margin(Edge),
    BorderVisible(Edge),
    BorderColor(Edge),
    BorderWeight(Edge),
    BorderDash(Edge),
}

impl Attribute {
    fn name(self) -> &'static str {
        match self {
            Attribute::Fill => "fill",
            Attribute::FillColor => "fill color",
            Attribute::FillTransparency => "fill transparency",
            Attribute::FontName => "font name",
            Attribute::FontSize => "font size",
            Attribute::FontBold => "bold",
            Attribute::FontItalic => "italic",
            Attribute::FontColor => "font color",
            Attribute::Margin(_) => "margin",
            Attribute::BorderVisible(_) => "border visibility",
            Attribute::BorderColor(_) => "border color",
            Attribute::BorderWeight(_) => "border weight",
            Attribute::BorderDash(_) => "border dash style",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub row: usize,
    pub column: usize,
    pub attribute: Attribute,
}

#[derive(Debug, Clone, Copy)]
struct Fault {
    /// `None` applies to every cell.
    cell: Option<(usize, usize)>,
    attribute: Attribute,
}

pub struct MemoryTable {
    rows: usize,
    columns: usize,
    cells: RefCell<Vec<CellStyle>>,
    faults: RefCell<Vec<Fault>>,
    unavailable: RefCell<Vec<(usize, usize)>>,
    writes: RefCell<Vec<Write>>,
    on_write: RefCell<Option<Box<dyn Fn()>>>,
}

impl MemoryTable {
    /// A table of blank cells.
    pub fn new(rows: usize, columns: usize) -> MemoryTable {
        MemoryTable {
            rows,
            columns,
            cells: RefCell::new(vec![CellStyle::default(); rows * columns]),
            faults: RefCell::default(),
            unavailable: RefCell::default(),
            writes: RefCell::default(),
            on_write: RefCell::default(),
        }
    }

    /// One style per row, repeated across `columns`.
    pub fn from_rows(columns: usize, rows: &[CellStyle]) -> MemoryTable {
        let table = MemoryTable::new(rows.len(), columns);
        for (index, style) in rows.iter().enumerate() {
            for column in 1..=columns {
                table.set_style(index + 1, column, style.clone());
            }
        }
        table
    }

    /// Overwrites a cell without recording a write.
    pub fn set_style(&self, row: usize, column: usize, style: CellStyle) {
        if let Some(index) = self.index(row, column) {
            self.cells.borrow_mut()[index] = style;
        }
    }

    pub fn style(&self, row: usize, column: usize) -> Option<CellStyle> {
        let index = self.index(row, column)?;
        Some(self.cells.borrow()[index].clone())
    }

    /// Makes `attribute` fail for reads and writes on every cell.
    pub fn fail(&self, attribute: Attribute) {
        self.faults.borrow_mut().push(Fault {
            cell: None,
            attribute,
        });
    }

    pub fn fail_at(&self, row: usize, column: usize, attribute: Attribute) {
        self.faults.borrow_mut().push(Fault {
            cell: Some((row, column)),
            attribute,
        });
    }

    /// Makes the cell lookup itself fail.
    pub fn remove_cell(&self, row: usize, column: usize) {
        self.unavailable.borrow_mut().push((row, column));
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.borrow().clone()
    }

    pub fn writes_to(&self, row: usize, column: usize) -> Vec<Attribute> {
        self.writes
            .borrow()
            .iter()
            .filter(|w| w.row == row && w.column == column)
            .map(|w| w.attribute)
            .collect()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    /// Runs `hook` after every successful write, like a host that raises
    /// change notifications synchronously while being edited.
    pub fn on_write(&self, hook: impl Fn() + 'static) {
        *self.on_write.borrow_mut() = Some(Box::new(hook));
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row == 0 || column == 0 || row > self.rows || column > self.columns {
            return None;
        }
        Some((row - 1) * self.columns + column - 1)
    }

    fn check(&self, row: usize, column: usize, attribute: Attribute) -> Result<(), HostError> {
        let faulty = self.faults.borrow().iter().any(|f| {
            f.attribute == attribute && f.cell.map_or(true, |cell| cell == (row, column))
        });
        if faulty {
            Err(HostError::Unsupported(attribute.name()))
        } else {
            Ok(())
        }
    }
}

impl Table for MemoryTable {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn cell(&self, row: usize, column: usize) -> Result<Box<dyn Cell + '_>, HostError> {
        let missing = self.unavailable.borrow().contains(&(row, column));
        match self.index(row, column) {
            Some(index) if !missing => Ok(Box::new(MemoryCell {
                table: self,
                index,
                row,
                column,
            })),
            _ => Err(HostError::NoCell { row, column }),
        }
    }
}

struct MemoryCell<'a> {
    table: &'a MemoryTable,
    index: usize,
    row: usize,
    column: usize,
}

impl MemoryCell<'_> {
    fn read<T>(&self, attribute: Attribute, get: impl FnOnce(&CellStyle) -> T) -> Result<T, HostError> {
        self.table.check(self.row, self.column, attribute)?;
        Ok(get(&self.table.cells.borrow()[self.index]))
    }

    fn write(&self, attribute: Attribute, set: impl FnOnce(&mut CellStyle)) -> Result<(), HostError> {
        self.table.check(self.row, self.column, attribute)?;
        set(&mut self.table.cells.borrow_mut()[self.index]);
        self.table.writes.borrow_mut().push(Write {
            row: self.row,
            column: self.column,
            attribute,
        });
        if let Some(hook) = self.table.on_write.borrow().as_ref() {
            hook();
        }
        Ok(())
    }
}

impl Cell for MemoryCell<'_> {
    fn fill_kind(&self) -> Result<FillKind, HostError> {
        self.read(Attribute::Fill, |s| s.fill_kind)
    }

    fn fill_color(&self) -> Result<Color, HostError> {
        self.read(Attribute::FillColor, |s| s.fill_color)
    }

    fn fill_transparency(&self) -> Result<f32, HostError> {
        self.read(Attribute::FillTransparency, |s| s.fill_transparency)
    }

    fn set_fill_solid(&self) -> Result<(), HostError> {
        self.write(Attribute::Fill, |s| s.fill_kind = FillKind::Solid)
    }

    fn set_fill_background(&self) -> Result<(), HostError> {
        self.write(Attribute::Fill, |s| s.fill_kind = FillKind::Background)
    }

    fn set_fill_color(&self, color: Color) -> Result<(), HostError> {
        self.write(Attribute::FillColor, |s| s.fill_color = color)
    }

    fn set_fill_transparency(&self, transparency: f32) -> Result<(), HostError> {
        self.write(Attribute::FillTransparency, |s| {
            s.fill_transparency = transparency
        })
    }

    fn font_name(&self) -> Result<String, HostError> {
        self.read(Attribute::FontName, |s| s.font_name.clone())
    }

    fn font_size(&self) -> Result<f32, HostError> {
        self.read(Attribute::FontSize, |s| s.font_size)
    }

    fn font_bold(&self) -> Result<TriState, HostError> {
        self.read(Attribute::FontBold, |s| s.font_bold.into())
    }

    fn font_italic(&self) -> Result<TriState, HostError> {
        self.read(Attribute::FontItalic, |s| s.font_italic.into())
    }

    fn font_color(&self) -> Result<Color, HostError> {
        self.read(Attribute::FontColor, |s| s.font_color)
    }

    fn set_font_name(&self, name: &str) -> Result<(), HostError> {
        self.write(Attribute::FontName, |s| s.font_name = name.to_string())
    }

    fn set_font_size(&self, size: f32) -> Result<(), HostError> {
        self.write(Attribute::FontSize, |s| s.font_size = size)
    }

    fn set_font_bold(&self, bold: bool) -> Result<(), HostError> {
        self.write(Attribute::FontBold, |s| s.font_bold = bold)
    }

    fn set_font_italic(&self, italic: bool) -> Result<(), HostError> {
        self.write(Attribute::FontItalic, |s| s.font_italic = italic)
    }

    fn set_font_color(&self, color: Color) -> Result<(), HostError> {
        self.write(Attribute::FontColor, |s| s.font_color = color)
    }

    fn margin(&self, edge: Edge) -> Result<f32, HostError> {
        self.read(Attribute::Margin(edge), |s| s.margins.get(edge))
    }

    fn set_margin(&self, edge: Edge, points: f32) -> Result<(), HostError> {
        self.write(Attribute::Margin(edge), |s| *s.margins.get_mut(edge) = points)
    }

    fn border_visible(&self, edge: Edge) -> Result<TriState, HostError> {
        self.read(Attribute::BorderVisible(edge), |s| {
            s.borders.get(edge).visible.into()
        })
    }

    fn border_color(&self, edge: Edge) -> Result<Color, HostError> {
        self.read(Attribute::BorderColor(edge), |s| s.borders.get(edge).color)
    }

    fn border_weight(&self, edge: Edge) -> Result<f32, HostError> {
        self.read(Attribute::BorderWeight(edge), |s| s.borders.get(edge).weight)
    }

    fn border_dash(&self, edge: Edge) -> Result<DashPattern, HostError> {
        self.read(Attribute::BorderDash(edge), |s| s.borders.get(edge).dash)
    }

    fn set_border_visible(&self, edge: Edge, visible: bool) -> Result<(), HostError> {
        self.write(Attribute::BorderVisible(edge), |s| {
            s.borders.get_mut(edge).visible = visible
        })
    }

    fn set_border_color(&self, edge: Edge, color: Color) -> Result<(), HostError> {
        self.write(Attribute::BorderColor(edge), |s| {
            s.borders.get_mut(edge).color = color
        })
    }

    fn set_border_weight(&self, edge: Edge, points: f32) -> Result<(), HostError> {
        self.write(Attribute::BorderWeight(edge), |s| {
            s.borders.get_mut(edge).weight = points
        })
    }

    fn set_border_dash(&self, edge: Edge, dash: DashPattern) -> Result<(), HostError> {
        self.write(Attribute::BorderDash(edge), |s| {
            s.borders.get_mut(edge).dash = dash
        })
    }
}

/// A shape on a slide, with or without a table.
pub struct MemoryShape {
    id: ShapeId,
    table: Option<MemoryTable>,
}

impl MemoryShape {
    pub fn with_table(id: ShapeId, table: MemoryTable) -> MemoryShape {
        MemoryShape {
            id,
            table: Some(table),
        }
    }

    /// A shape without a table, e.g. a picture or a text box.
    pub fn plain(id: ShapeId) -> MemoryShape {
        MemoryShape { id, table: None }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn table(&self) -> Option<&MemoryTable> {
        self.table.as_ref()
    }
}

struct MemoryTableShape<'a> {
    id: ShapeId,
    table: &'a MemoryTable,
}

impl TableShape for MemoryTableShape<'_> {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn table(&self) -> &dyn Table {
        self.table
    }
}

pub struct MemorySelection {
    kind: SelectionKind,
    shapes: Vec<Rc<MemoryShape>>,
}

impl MemorySelection {
    pub fn new(kind: SelectionKind, shapes: Vec<Rc<MemoryShape>>) -> MemorySelection {
        MemorySelection { kind, shapes }
    }

    pub fn shapes(shapes: Vec<Rc<MemoryShape>>) -> MemorySelection {
        MemorySelection::new(SelectionKind::Shapes, shapes)
    }

    /// Text editing inside `shape`.
    pub fn text(shape: Rc<MemoryShape>) -> MemorySelection {
        MemorySelection::new(SelectionKind::Text, vec![shape])
    }

    pub fn empty() -> MemorySelection {
        MemorySelection::new(SelectionKind::None, Vec::new())
    }
}

impl Selection for MemorySelection {
    fn kind(&self) -> SelectionKind {
        self.kind
    }

    fn table_shape(&self) -> Result<Option<Box<dyn TableShape + '_>>, HostError> {
        let Some(shape) = self.shapes.first() else {
            return Ok(None);
        };
        Ok(shape.table.as_ref().map(|table| {
            Box::new(MemoryTableShape {
                id: shape.id,
                table,
            }) as Box<dyn TableShape + '_>
        }))
    }
}
