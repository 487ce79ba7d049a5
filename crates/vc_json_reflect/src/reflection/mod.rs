mod reflect;

pub use reflect::{Associative, Reflect, ReflectRef, Sequence};
