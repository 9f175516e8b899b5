pub mod html;
pub mod node;
pub mod roster;
pub mod walker;
