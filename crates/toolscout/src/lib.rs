//! Three-stage research pipeline over a search/scrape provider and a chat
//! model: extract candidate alternatives, research each candidate's official
//! site, synthesize a recommendation.

pub mod content;
pub mod pipeline;

pub use pipeline::Pipeline;
