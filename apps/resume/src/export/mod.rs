// Export variants: per-entry inclusion policy and date-window filtering.
// Pure functions over an owned source Document; the source is never mutated.

pub mod policy;
pub mod reconstruct;

pub use policy::{Inclusion, InclusionPolicy};
pub use reconstruct::{
    reconstruct, reconstruct_with_rule, WindowRule, DEFAULT_WINDOW_RULE, NOT_RELEVANT_PLACEHOLDER,
};
