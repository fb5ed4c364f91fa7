pub mod assumptions;
pub mod canvases;
pub mod events;
pub mod experiments;
pub mod risk;
pub mod viability;
