mod quiz;
mod render;
mod setup;

pub use render::render;
