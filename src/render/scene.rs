//! Element arena holding the render primitives of one view.
//!
//! Views address primitives by logical id. The first `upsert` for an id creates
//! the slot; later passes overwrite it in place, so a steady-state layout
//! allocates nothing new and keeps draw order stable.

use indexmap::IndexMap;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::{Color, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleSide {
    Left,
    Right,
}

/// Logical identity of a scene element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Series(usize),
    GridLine { slot: usize, outgoing: bool },
    GridLabel { slot: usize, outgoing: bool },
    DimmingBackground(HandleSide),
    Handle(HandleSide),
    TopBorder,
    BottomBorder,
    HandleArrow { side: HandleSide, upper: bool },
}

impl ElementId {
    /// Paint-order bucket; lower buckets draw first.
    #[must_use]
    pub fn layer(self) -> u8 {
        match self {
            Self::GridLine { .. } => 0,
            Self::GridLabel { .. } => 1,
            Self::Series(_) => 2,
            Self::DimmingBackground(_) => 3,
            Self::Handle(_) | Self::TopBorder | Self::BottomBorder => 4,
            Self::HandleArrow { .. } => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenePrimitive {
    Path(PathPrimitive),
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl ScenePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Path(path) => path.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Line(line) => line.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

impl From<PathPrimitive> for ScenePrimitive {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<RectPrimitive> for ScenePrimitive {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<LinePrimitive> for ScenePrimitive {
    fn from(value: LinePrimitive) -> Self {
        Self::Line(value)
    }
}

impl From<TextPrimitive> for ScenePrimitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    Created,
    Updated,
    Unchanged,
}

/// Slot churn since the last `begin_pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    viewport: Viewport,
    background: Color,
    elements: IndexMap<ElementId, ScenePrimitive>,
    stats: SceneStats,
}

impl Scene {
    #[must_use]
    pub fn new(viewport: Viewport, background: Color) -> Self {
        Self {
            viewport,
            background,
            elements: IndexMap::new(),
            stats: SceneStats::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Resets the churn counters; called at the start of every layout pass.
    pub fn begin_pass(&mut self) {
        self.stats = SceneStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Creates the slot for `id` or overwrites it in place.
    pub fn upsert(&mut self, id: ElementId, primitive: impl Into<ScenePrimitive>) -> SlotUpdate {
        let primitive = primitive.into();
        match self.elements.get_mut(&id) {
            Some(existing) if *existing == primitive => SlotUpdate::Unchanged,
            Some(existing) => {
                *existing = primitive;
                self.stats.updated += 1;
                SlotUpdate::Updated
            }
            None => {
                self.elements.insert(id, primitive);
                self.stats.created += 1;
                SlotUpdate::Created
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ScenePrimitive> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Drops a slot while keeping the order of the remaining ones.
    pub fn remove(&mut self, id: ElementId) -> Option<ScenePrimitive> {
        let removed = self.elements.shift_remove(&id);
        if removed.is_some() {
            self.stats.removed += 1;
        }
        removed
    }

    /// Drops every slot for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        let before = self.elements.len();
        self.elements.retain(|id, _| keep(*id));
        self.stats.removed += before - self.elements.len();
    }

    /// Restores paint order after slots were appended out of bucket order.
    pub fn sort_by_layer(&mut self) {
        self.elements
            .sort_by(|left, _, right, _| left.layer().cmp(&right.layer()));
    }

    pub fn clear(&mut self) {
        self.stats.removed += self.elements.len();
        self.elements.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &ScenePrimitive)> {
        self.elements.iter().map(|(id, primitive)| (*id, primitive))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;
        for (_, primitive) in &self.elements {
            primitive.validate()?;
        }
        Ok(())
    }
}
