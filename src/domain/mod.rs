//! Domain layer types and invariants.

pub mod design;
pub mod entities;
pub mod error;
pub mod icons;
pub mod links;
pub mod markup;
pub mod sections;
pub mod slug;
pub mod submissions;
