mod element;
mod tags;

pub use self::element::{ElementType, RawElement};
pub use self::tags::Tag;
