pub mod anim;
pub mod draw;
pub mod math;
pub mod skia;
pub mod wave;
