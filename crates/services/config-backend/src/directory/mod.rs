//! Directory synthesis over the configuration snapshot.

mod groups;
mod synth;

pub use groups::GroupResolver;
pub use synth::EntrySynthesizer;
