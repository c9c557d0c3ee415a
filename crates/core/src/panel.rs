//! A displayer bound to one source field, with its own cadence and geometry.

use log::{debug, trace};
use tickboard_render::{LayoutError, RenderedBlock};
use tickboard_types::{FieldSelector, PanelGeometry, Snapshot};

use crate::cadence::Cadence;
use crate::displayer::{BoxedDisplayer, PanelInput};
use crate::error::{CoreError, FieldMissing};
use crate::source_table::SourceHandle;

pub struct Panel {
    id: String,
    source: SourceHandle,
    field: FieldSelector,
    cadence: Cadence,
    geometry: PanelGeometry,
    last_update_time: Option<u64>,
    displayer: BoxedDisplayer,
    /// Last finalized output; dropped whenever the displayer absorbs new data
    cached: Option<RenderedBlock>,
}

impl Panel {
    /// Bind a displayer to a source field. Fails on a zero-sized geometry.
    pub fn new(
        id: impl Into<String>,
        source: SourceHandle,
        field: FieldSelector,
        cadence_ms: u64,
        geometry: PanelGeometry,
        displayer: BoxedDisplayer,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        if !geometry.is_valid() {
            return Err(CoreError::Layout {
                panel: id,
                source: LayoutError::ZeroSize {
                    width: geometry.width,
                    height: geometry.height,
                },
            });
        }

        Ok(Self {
            id,
            source,
            field,
            cadence: Cadence::new(cadence_ms),
            geometry,
            last_update_time: None,
            displayer,
            cached: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> SourceHandle {
        self.source
    }

    pub fn field(&self) -> &FieldSelector {
        &self.field
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn displayer_id(&self) -> &str {
        self.displayer.id()
    }

    /// Time of the last successful update
    pub fn last_update_time(&self) -> Option<u64> {
        self.last_update_time
    }

    pub fn due(&self, now: u64) -> bool {
        self.cadence.due(now)
    }

    /// Feed the panel from its source's current snapshot.
    ///
    /// A missing field leaves the displayer untouched, so the next render
    /// repeats the previous output.
    pub fn update(&mut self, snapshot: &Snapshot, now: u64) -> Result<(), FieldMissing> {
        self.cadence.mark(now);

        let input = match &self.field {
            FieldSelector::Whole => PanelInput::Snapshot(snapshot),
            FieldSelector::Field(name) => match snapshot.get(name) {
                Some(value) => PanelInput::Field(value),
                None => {
                    debug!("Panel {}: field {} not in snapshot", self.id, name);
                    return Err(FieldMissing {
                        panel: self.id.clone(),
                        field: name.clone(),
                    });
                }
            },
        };

        trace!("Panel {} updated at {}", self.id, now);
        self.displayer.update_data(input);
        self.last_update_time = Some(now);
        self.cached = None;
        Ok(())
    }

    /// The panel's output, exactly `width` x `height`.
    pub fn render(&mut self) -> RenderedBlock {
        let PanelGeometry { width, height, .. } = self.geometry;
        self.cached
            .get_or_insert_with(|| self.displayer.render(width, height).normalized(width, height))
            .clone()
    }
}
