//! Animatable property model
//!
//! Timelines only ever animate five scalar properties. Values flow out of the
//! animation runtime through a `PropertySink`, which the page implements by
//! updating each element's resolved `Style`.

use smallvec::SmallVec;

use crate::element::ElementId;

/// A scalar property an animation can drive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// 0.0 (transparent) to 1.0 (opaque)
    Opacity,
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Uniform scale factor
    Scale,
    /// Rotation in degrees
    Rotate,
}

impl Property {
    pub const ALL: [Property; 5] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::Scale,
        Property::Rotate,
    ];

    /// Value of the property on an element nothing has animated yet
    pub fn initial_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::X | Property::Y | Property::Rotate => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::Scale => "scale",
            Property::Rotate => "rotate",
        }
    }
}

/// A small property -> value mapping (typically one to three entries)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyValues {
    entries: SmallVec<[(Property, f32); 4]>,
}

impl PropertyValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any existing entry for the property
    pub fn set(&mut self, property: Property, value: f32) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == property) {
            entry.1 = value;
        } else {
            self.entries.push((property, value));
        }
    }

    /// Builder form of `set`
    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn x(self, value: f32) -> Self {
        self.with(Property::X, value)
    }

    pub fn y(self, value: f32) -> Self {
        self.with(Property::Y, value)
    }

    pub fn scale(self, value: f32) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn rotate(self, value: f32) -> Self {
        self.with(Property::Rotate, value)
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved animatable state of one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: Property::Opacity.initial_value(),
            x: Property::X.initial_value(),
            y: Property::Y.initial_value(),
            scale: Property::Scale.initial_value(),
            rotate: Property::Rotate.initial_value(),
        }
    }
}

impl Style {
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Rotate => self.rotate,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Scale => self.scale = value,
            Property::Rotate => self.rotate = value,
        }
    }
}

/// Destination for property values produced by timelines
pub trait PropertySink {
    fn write(&mut self, id: ElementId, property: Property, value: f32);
}

/// A sink that records every write, in order
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<(ElementId, Property, f32)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value written for an element property
    pub fn last(&self, id: ElementId, property: Property) -> Option<f32> {
        self.writes
            .iter()
            .rev()
            .find(|(i, p, _)| *i == id && *p == property)
            .map(|(_, _, v)| *v)
    }

    /// Whether anything was written for the element
    pub fn touched(&self, id: ElementId) -> bool {
        self.writes.iter().any(|(i, _, _)| *i == id)
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl PropertySink for RecordingSink {
    fn write(&mut self, id: ElementId, property: Property, value: f32) {
        self.writes.push((id, property, value));
    }
}
