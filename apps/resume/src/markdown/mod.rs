// Resume Markdown dialect: grammar, block strategies, parser, serializer.
// Round-trip contract: parse(serialize(d)) == d for every valid Document.

pub mod blocks;
pub mod grammar;
pub mod labels;
pub mod parser;
pub mod serializer;

pub use parser::parse;
pub use serializer::serialize;
