mod generate;

pub use generate::{
    generate, generate_with_registry, CancellationToken, GenerateOptions, GenerationReport,
    WriteFailure, WritePolicy,
};
