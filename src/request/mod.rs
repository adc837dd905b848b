mod parse;
mod persistence;

pub use parse::{parse_item, parse_request, parse_target};
pub use persistence::{load_config, load_document, load_request, require_file, save_result};
