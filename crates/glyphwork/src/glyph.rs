//! The glyph object model.
//!
//! A [`GlyphNode`] owns the drawable paths that make up one glyph, tracks
//! them by name in a [`PathRegistry`], computes its [`GlyphBox`] from a
//! caller-supplied [`LayoutOptions`], and owns its child glyphs. What a glyph
//! actually looks like is decided by its [`GlyphKind`].
//!
//! # Lifecycle
//!
//! ```
//! use std::rc::Rc;
//!
//! use glyphwork::{glyph::{GlyphNode, LayoutOptions}, kinds::Nested};
//! use glyphwork_core::{geometry::Bounds, surface::{Scene, Surface}};
//!
//! let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 400.0, 400.0));
//! let layer = scene.add_layer("glyph-0");
//!
//! let mut glyph = GlyphNode::builder(Rc::new(Nested)).layer(layer).build(&mut scene)?;
//! glyph.draw(&mut scene, &LayoutOptions::new(Bounds::from_ltwh(50.0, 50.0, 200.0, 200.0)))?;
//! glyph.build_path_groups(&mut scene)?;
//! assert_eq!(glyph.children().len(), 2);
//!
//! glyph.reset(&mut scene)?;
//! assert!(!glyph.is_drawn());
//! # Ok::<(), glyphwork::GlyphError>(())
//! ```

mod element;
mod hierarchy;
mod kind;
mod layout;
mod node;
mod parameters;
mod registry;

pub use element::{BASE_ELEMENTS, ElementDescriptor, ElementKind, ElementTarget, dispatch_name};
pub use hierarchy::{Iter, RejectedChild};
pub use kind::{CanonicalShapes, GlyphKind};
pub use layout::{GlyphBox, LayoutOptions, ShapePosition, ShapePositions, compute_box};
pub use node::{DEFAULT_CLONE_POINTS, DRAWING_BOX, GlyphBuilder, GlyphNode, ParentLink};
pub use parameters::{ParamValue, Parameters};
pub use registry::PathRegistry;
