pub mod sequence;

pub use sequence::SequenceBuilder;
