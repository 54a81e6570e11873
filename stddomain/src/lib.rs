pub mod domain;
pub mod error;

pub use domain::{Domain, DomainParser, ParsedDomain};
pub use error::DomainError;
pub use stddomain_codec::CodecError;
pub use stddomain_suffix::{Split, SuffixList};
