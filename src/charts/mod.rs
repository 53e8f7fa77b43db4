//! Presentation bindings: pure functions from the filtered rows plus their
//! own parameters to a renderable artifact. Nothing here touches egui.

pub mod histogram;
pub mod scatter;
pub mod table;
