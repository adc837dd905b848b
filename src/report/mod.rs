pub mod output;

pub use output::{print_topk, top_indices, write_best_json, write_csv};
