pub mod bodies;
pub mod envelope;
pub mod performative;

pub use bodies::*;
pub use envelope::{Envelope, Payload};
pub use performative::{Ontology, Performative, Protocol};
