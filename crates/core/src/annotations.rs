//! Annotation flag sets.

use bitflags::bitflags;

bitflags! {
    /// Matrices a table request asks for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TableAnnotations: u8 {
        /// Duration matrix.
        const DURATION = 0x01;
        /// Distance matrix.
        const DISTANCE = 0x02;
        /// Both matrices.
        const ALL = Self::DURATION.bits() | Self::DISTANCE.bits();
    }
}

impl Default for TableAnnotations {
    fn default() -> Self {
        TableAnnotations::DURATION
    }
}

impl TableAnnotations {
    /// Sets or clears the distance bit.
    ///
    /// Clearing uses a mask, so disabling twice leaves the bit cleared.
    pub fn enable_distance(&mut self, enable: bool) {
        self.set(TableAnnotations::DISTANCE, enable);
    }

    /// Sets or clears the duration bit.
    pub fn enable_duration(&mut self, enable: bool) {
        self.set(TableAnnotations::DURATION, enable);
    }

    /// Parses a single tag (`duration` or `distance`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "duration" => Some(TableAnnotations::DURATION),
            "distance" => Some(TableAnnotations::DISTANCE),
            _ => None,
        }
    }
}

bitflags! {
    /// Per-segment annotation categories of a route.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RouteAnnotations: u8 {
        const DURATION = 0x01;
        const NODES = 0x02;
        const DISTANCE = 0x04;
        const WEIGHT = 0x08;
        const DATASOURCES = 0x10;
        const SPEED = 0x20;
        const ALL = Self::DURATION.bits()
            | Self::NODES.bits()
            | Self::DISTANCE.bits()
            | Self::WEIGHT.bits()
            | Self::DATASOURCES.bits()
            | Self::SPEED.bits();
    }
}

impl Default for RouteAnnotations {
    fn default() -> Self {
        RouteAnnotations::empty()
    }
}

impl RouteAnnotations {
    /// Parses a single category tag. Comparison is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "duration" => Some(RouteAnnotations::DURATION),
            "nodes" => Some(RouteAnnotations::NODES),
            "distance" => Some(RouteAnnotations::DISTANCE),
            "weight" => Some(RouteAnnotations::WEIGHT),
            "datasources" => Some(RouteAnnotations::DATASOURCES),
            "speed" => Some(RouteAnnotations::SPEED),
            _ => None,
        }
    }
}
