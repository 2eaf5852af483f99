//! A move-only element owning a heap block.

use std::fmt;

/// Three coordinates plus an owned heap block. Deliberately not `Clone`,
/// so any code path that would copy it fails to compile.
pub struct MoveOnlyPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    block: Box<[i32; 5]>,
}

impl MoveOnlyPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            block: Box::new([0; 5]),
        }
    }

    /// Address of the owned heap block. Stable across moves of the point.
    pub fn block_addr(&self) -> *const i32 {
        self.block.as_ptr()
    }

    pub fn block(&self) -> &[i32; 5] {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut [i32; 5] {
        &mut self.block
    }

    pub fn coords(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}

impl Default for MoveOnlyPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<(f32, f32, f32)> for MoveOnlyPoint {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Debug for MoveOnlyPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_keeps_block() {
        let p = MoveOnlyPoint::new(1.0, 2.0, 3.0);
        let addr = p.block_addr();
        let moved = p;
        assert_eq!(moved.block_addr(), addr);
        assert_eq!(moved.coords(), (1.0, 2.0, 3.0));
    }

    #[test]
    fn debug_is_tab_separated() {
        let p = MoveOnlyPoint::from((4.0, 5.0, 6.0));
        assert_eq!(format!("{p:?}"), "4\t5\t6");
    }
}
