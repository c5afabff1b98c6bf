//! Deterministic synthesis of customer fixtures.
//!
//! A [`FixtureGenerator`] turns record indexes into customer and identity
//! document pairs. Names, phones and email domains come from `fake`; status
//! and document type are weighted choices; document numbers are claimed from
//! a per-run [`DocumentNumberRegistry`] so they never repeat.

pub mod batches;
pub mod documents;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod locales;
pub mod model;
pub mod weighted;

pub use batches::BatchPlan;
pub use documents::{DocumentNumberRegistry, MAX_NUMBER_ATTEMPTS, document_number};
pub use engine::FixtureGenerator;
pub use errors::GenerationError;
pub use locales::LocaleKey;
pub use model::{DocumentWeights, GenerateOptions, StatusWeights};
pub use weighted::WeightedChoice;
