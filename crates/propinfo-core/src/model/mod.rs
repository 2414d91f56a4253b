//! Class descriptors: the ordered set of property descriptors for one
//! owner type, plus the object-level operations built on them.

mod builder;
mod class;


pub use builder::ClassInfoBuilder;
pub use class::ClassInfo;
