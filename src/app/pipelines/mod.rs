pub mod lookup_pipeline;

pub use lookup_pipeline::LookupPipeline;
