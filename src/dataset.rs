//! Struct `Dataset` represents a labeled table of examples.

// Provides attribute and schema structs.
pub(crate) mod attribute;
// Provides dataset struct.
pub(crate) mod dataset_struct;
// Provides a struct that reads a file.
pub(crate) mod dataset_reader;

mod arff;
mod csv_reader;


pub use attribute::{Attribute, AttributeKind, Schema};
pub use dataset_struct::Dataset;
pub use dataset_reader::{DatasetReader, Format};
