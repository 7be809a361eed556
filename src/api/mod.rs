pub mod console;
pub mod portal;
pub mod render;
