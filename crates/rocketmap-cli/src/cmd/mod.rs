pub mod assumption;
pub mod canvas;
pub mod experiment;
pub mod init;
pub mod risk;
pub mod ui;
pub mod viability;
