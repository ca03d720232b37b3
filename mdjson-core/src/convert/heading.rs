//! Heading depth normalization.

use crate::models::SectionDepth;

/// Offset mapping source heading levels onto the two output depths.
///
/// The first heading seen sets the offset so that it lands at depth 1.
/// Any level-1 heading resets it. Everything else keeps the current
/// offset. A fresh value must be used for every document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthOffset(Option<i32>);

impl DepthOffset {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<i32> {
        self.0
    }

    /// Output depth for a heading of the given source level
    pub fn depth_for(&mut self, level: u8) -> SectionDepth {
        let heading = i32::from(level);
        let offset = match self.0 {
            Some(offset) if heading != 1 => offset,
            _ => {
                let offset = 1 - heading;
                self.0 = Some(offset);
                offset
            }
        };

        if heading + offset == 1 {
            SectionDepth::Top
        } else {
            SectionDepth::Sub
        }
    }
}
