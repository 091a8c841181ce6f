//! Sensor traits

/// Presence sensor in the intake tray
pub trait TraySensor {
    /// Check whether a block is still held in the tray
    ///
    /// Takes `&mut self` because sampling typically requires bus access.
    fn has_held_object(&mut self) -> bool;
}
