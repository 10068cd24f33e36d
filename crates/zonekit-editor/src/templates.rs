//! Built-in layout templates.
//!
//! Presets for quickly seeding a layout: column/row strips, grids, a
//! priority column arrangement, and an overlapping focus stack. A
//! template only describes geometry; applying one goes through the
//! controller so it lands as a single undo entry.

use zonekit_core::Rect;

/// Template shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Equal-width vertical strips.
    Columns { count: u8 },
    /// Equal-height horizontal strips.
    Rows { count: u8 },
    /// Uniform grid.
    Grid { columns: u8, rows: u8 },
    /// Wide center column flanked by two narrow ones.
    PriorityGrid,
    /// A centered zone stacked over a full-screen backdrop.
    Focus,
}

/// A named preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTemplate {
    pub id: String,
    pub name: String,
    pub kind: TemplateKind,
}

impl LayoutTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Zone geometries for this template, in paint order.
    pub fn geometries(&self) -> Vec<Rect> {
        generate_geometries(self.kind)
    }
}

/// The templates shipped with the editor.
pub fn builtin_templates() -> Vec<LayoutTemplate> {
    vec![
        LayoutTemplate::new("columns-2", "Two Columns", TemplateKind::Columns { count: 2 }),
        LayoutTemplate::new(
            "columns-3",
            "Three Columns",
            TemplateKind::Columns { count: 3 },
        ),
        LayoutTemplate::new("rows-2", "Two Rows", TemplateKind::Rows { count: 2 }),
        LayoutTemplate::new(
            "grid-2x2",
            "Quad Grid",
            TemplateKind::Grid {
                columns: 2,
                rows: 2,
            },
        ),
        LayoutTemplate::new(
            "grid-3x2",
            "Six Grid",
            TemplateKind::Grid {
                columns: 3,
                rows: 2,
            },
        ),
        LayoutTemplate::new("priority-grid", "Priority Grid", TemplateKind::PriorityGrid),
        LayoutTemplate::new("focus", "Focus", TemplateKind::Focus),
    ]
}

/// Finds a built-in template by id.
pub fn find_template(id: &str) -> Option<LayoutTemplate> {
    builtin_templates()
        .into_iter()
        .find(|template| template.id == id)
}

/// Generates normalized geometries for a template kind.
pub fn generate_geometries(kind: TemplateKind) -> Vec<Rect> {
    match kind {
        TemplateKind::Columns { count } => {
            let count = count.max(1) as usize;
            let width = 1.0 / count as f64;
            (0..count)
                .map(|i| Rect::new(i as f64 * width, 0.0, width, 1.0))
                .collect()
        }
        TemplateKind::Rows { count } => {
            let count = count.max(1) as usize;
            let height = 1.0 / count as f64;
            (0..count)
                .map(|i| Rect::new(0.0, i as f64 * height, 1.0, height))
                .collect()
        }
        TemplateKind::Grid { columns, rows } => {
            let columns = columns.max(1) as usize;
            let rows = rows.max(1) as usize;
            let width = 1.0 / columns as f64;
            let height = 1.0 / rows as f64;
            let mut rects = Vec::with_capacity(columns * rows);
            for row in 0..rows {
                for column in 0..columns {
                    rects.push(Rect::new(
                        column as f64 * width,
                        row as f64 * height,
                        width,
                        height,
                    ));
                }
            }
            rects
        }
        TemplateKind::PriorityGrid => vec![
            Rect::new(0.0, 0.0, 0.25, 1.0),
            Rect::new(0.25, 0.0, 0.5, 1.0),
            Rect::new(0.75, 0.0, 0.25, 1.0),
        ],
        TemplateKind::Focus => vec![
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.15, 0.1, 0.7, 0.8),
        ],
    }
}
