// Domain layer: page entities, selectors and the DOM port. No browser dependencies.

pub mod model;
pub mod ports;
pub mod selector;
