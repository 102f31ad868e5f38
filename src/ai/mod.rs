pub mod example_generator;

pub use example_generator::{ExampleGenerator, GenerationError, OpenAiExampleGenerator};
