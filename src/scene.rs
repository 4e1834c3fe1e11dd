//! Ink scene graph: surfaces, layers, frames, and strokes.
//!
//! This module models the drawing side of a content-creation host as plain
//! data: a scene holds named drawing surfaces, a surface holds named layers,
//! a layer holds indexed animation frames, and a frame holds strokes.
//! Surfaces and layers are get-or-create by name, so repeated setup is
//! idempotent. The whole scene serializes to JSON for export.

use serde::{Deserialize, Serialize};

/// Handle to a drawing surface in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

/// Handle to a layer on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId {
    surface: usize,
    layer: usize,
}

/// Handle to a frame on a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId {
    surface: usize,
    layer: usize,
    frame: usize,
}

/// Handle to a stroke in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId {
    surface: usize,
    layer: usize,
    frame: usize,
    stroke: usize,
}

/// A single ink stroke: an ordered run of 3D points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub points: Vec<[f64; 3]>,
    /// Whether the last point connects back to the first.
    pub cyclic: bool,
    pub line_width: u32,
    pub material_index: u32,
}

impl Stroke {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self {
            points,
            cyclic: false,
            line_width: 1,
            material_index: 0,
        }
    }

    pub fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    pub fn with_style(mut self, line_width: u32, material_index: u32) -> Self {
        self.line_width = line_width;
        self.material_index = material_index;
        self
    }
}

/// One animation frame holding the strokes drawn at that frame index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub index: u32,
    pub strokes: Vec<Stroke>,
}

/// A named layer of animation frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    pub frames: Vec<Frame>,
}

/// A named drawing surface holding layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub name: String,
    pub layers: Vec<Layer>,
}

/// The scene: all drawing surfaces created during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InkScene {
    surfaces: Vec<Surface>,
}

impl InkScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the surface with the given name, creating it if absent.
    pub fn ensure_surface(&mut self, name: &str) -> SurfaceId {
        if let Some(pos) = self.surfaces.iter().position(|s| s.name == name) {
            return SurfaceId(pos);
        }
        self.surfaces.push(Surface {
            name: name.to_string(),
            layers: Vec::new(),
        });
        SurfaceId(self.surfaces.len() - 1)
    }

    /// Return the named layer on a surface, creating it if absent.
    ///
    /// With `clear` set, any frames already on the layer are dropped.
    pub fn ensure_layer(&mut self, surface: SurfaceId, name: &str, clear: bool) -> Option<LayerId> {
        let surf = self.surfaces.get_mut(surface.0)?;
        let pos = match surf.layers.iter().position(|l| l.name == name) {
            Some(pos) => pos,
            None => {
                surf.layers.push(Layer {
                    name: name.to_string(),
                    frames: Vec::new(),
                });
                surf.layers.len() - 1
            }
        };
        if clear {
            surf.layers[pos].frames.clear();
        }
        Some(LayerId {
            surface: surface.0,
            layer: pos,
        })
    }

    /// Append a new frame with the given index to a layer.
    pub fn new_frame(&mut self, layer: LayerId, index: u32) -> Option<FrameId> {
        let lay = self
            .surfaces
            .get_mut(layer.surface)?
            .layers
            .get_mut(layer.layer)?;
        lay.frames.push(Frame {
            index,
            strokes: Vec::new(),
        });
        Some(FrameId {
            surface: layer.surface,
            layer: layer.layer,
            frame: lay.frames.len() - 1,
        })
    }

    /// Add a stroke to a frame.
    pub fn add_stroke(&mut self, frame: FrameId, stroke: Stroke) -> Option<StrokeId> {
        let fr = self.frame_mut(frame)?;
        fr.strokes.push(stroke);
        Some(StrokeId {
            surface: frame.surface,
            layer: frame.layer,
            frame: frame.frame,
            stroke: fr.strokes.len() - 1,
        })
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id.0)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.surfaces.get(id.surface)?.layers.get(id.layer)
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.layer(LayerId {
            surface: id.surface,
            layer: id.layer,
        })?
        .frames
        .get(id.frame)
    }

    fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.surfaces
            .get_mut(id.surface)?
            .layers
            .get_mut(id.layer)?
            .frames
            .get_mut(id.frame)
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.frame(FrameId {
            surface: id.surface,
            layer: id.layer,
            frame: id.frame,
        })?
        .strokes
        .get(id.stroke)
    }

    pub fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.frame_mut(FrameId {
            surface: id.surface,
            layer: id.layer,
            frame: id.frame,
        })?
        .strokes
        .get_mut(id.stroke)
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Total stroke count across all surfaces, layers, and frames.
    pub fn stroke_count(&self) -> usize {
        self.surfaces
            .iter()
            .flat_map(|s| &s.layers)
            .flat_map(|l| &l.frames)
            .map(|f| f.strokes.len())
            .sum()
    }
}
