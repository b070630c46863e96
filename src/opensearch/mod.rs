//! OpenSearch description support: autodiscovery links, URL template
//! substitution, the description parser and the async loader.

mod autodiscovery;
mod error;
mod loader;
mod parser;
mod template;

pub use autodiscovery::AutodiscoveryLink;
pub use error::{OpenSearchError, TemplateError};
pub use loader::load_from_link;
pub use parser::{load_from_bytes, DescriptionParser};
pub use template::substitute_url_template;
