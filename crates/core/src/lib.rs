pub mod error;
pub mod fetch;
pub mod locate;
pub mod lookup;
pub mod mode;
pub mod parse;
pub mod query;
pub mod render;
pub mod rules;
pub mod sanitize;
pub mod stream;
pub mod strip;
pub mod synonyms;
pub mod tree;

pub use error::{LinguaError, Result};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{STDIN_MARKER, fetch_file, fetch_stdin, read_page};
pub use locate::{Located, locate};
#[cfg(feature = "fetch")]
pub use lookup::fetch_and_lookup;
pub use lookup::{Entry, Lookup, LookupConfig, LookupConfigBuilder, lookup};
pub use mode::Mode;
pub use parse::{Document, Element};
pub use query::{Chain, ChainMatch, Predicate, Scope};
pub use render::{TagKind, render};
pub use rules::ExtractionRules;
pub use sanitize::sanitize;
pub use stream::{Style, StyleRun, TextStream};
pub use strip::{BACKLINK_ID, strip_backlinks};
pub use synonyms::{GroupLabel, SynonymGroup};
#[doc(hidden)]
pub use tree::{ElementNode, Node};
