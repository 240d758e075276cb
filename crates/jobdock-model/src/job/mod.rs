mod definition;
pub use definition::JobDefinition;
