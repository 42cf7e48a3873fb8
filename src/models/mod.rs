pub mod bar;
pub mod code;
pub mod point;

pub use bar::{Bar, BarSequence, Color, Thickness};
pub use code::Code;
pub use point::Point;
