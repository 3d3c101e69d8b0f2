pub mod constraint;
pub mod satisfaction;

pub use constraint::ConstraintEvaluator;
pub use satisfaction::Satisfaction;
