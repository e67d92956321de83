pub mod element;
pub mod location;
pub mod record;

pub use element::{ElementKind, ElementValue};
pub use location::{ElementNode, LocationNode};
pub use record::ForecastRecord;
