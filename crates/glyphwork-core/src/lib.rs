//! Glyphwork Core Types and Definitions
//!
//! This crate provides the foundational types that glyphs are drawn with:
//!
//! - **Geometry**: Points, sizes and rectangles ([`geometry`] module)
//! - **Colors**: CSS color parsing for glyph parameters ([`color::Color`])
//! - **Style**: Stroke and fill definitions ([`style`] module)
//! - **Path**: Polyline geometry with arclength resampling ([`path::PathGeometry`])
//! - **Surface**: The layered drawable-surface contract and the in-memory
//!   [`surface::Scene`] implementing it ([`surface`] module)

pub mod color;
pub mod geometry;
pub mod path;
pub mod style;
pub mod surface;
