pub mod prompts;
pub mod render;

pub use prompts::{prompt_nutrient_target, prompt_target, prompt_yes_no};
pub use render::{display_adjustment, display_items, display_totals};
