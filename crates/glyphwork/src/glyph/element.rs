//! Static metadata describing the drawable parts of a glyph kind.

use std::fmt;

/// Whether an element is a size control or a drawable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Controls a dimension of the glyph; has no draw function of its own.
    Scale,
    /// A shape the kind can draw on demand.
    Path,
}

/// Which shape of a glyph an element applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTarget {
    /// The kind's own canonical main shape.
    Main,
    /// A named child shape of a composite kind.
    Child(&'static str),
}

impl fmt::Display for ElementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Child(name) => write!(f, "{name}"),
        }
    }
}

/// One drawable or scalable part of a glyph kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub name: &'static str,
    pub kind: ElementKind,
    /// Parameter names the element reads when drawn.
    pub properties: &'static [&'static str],
    pub target: ElementTarget,
    pub sub_elements: &'static [&'static str],
}

impl ElementDescriptor {
    pub const fn scale(name: &'static str) -> Self {
        Self {
            name,
            kind: ElementKind::Scale,
            properties: &[],
            target: ElementTarget::Main,
            sub_elements: &[],
        }
    }

    pub const fn path(name: &'static str, properties: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: ElementKind::Path,
            properties,
            target: ElementTarget::Main,
            sub_elements: &[],
        }
    }

    pub const fn with_target(mut self, target: ElementTarget) -> Self {
        self.target = target;
        self
    }

    pub const fn with_sub_elements(mut self, sub_elements: &'static [&'static str]) -> Self {
        self.sub_elements = sub_elements;
        self
    }

    pub fn is_scale(&self) -> bool {
        self.kind == ElementKind::Scale
    }
}

/// Elements every glyph kind starts from: its height and width.
pub const BASE_ELEMENTS: [ElementDescriptor; 2] = [
    ElementDescriptor::scale("Height"),
    ElementDescriptor::scale("Width"),
];

/// Conventional label of the draw entry for `element` of `child`, e.g. `drawNucleusOutline`.
pub fn dispatch_name(child: &str, element: &str) -> String {
    format!("draw{}{}", capitalize(child), capitalize(element))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
