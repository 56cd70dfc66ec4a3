pub mod compute;
pub mod display;
pub mod entities;
pub mod frame;
pub mod input;
pub mod world;
