pub mod annotate;
mod card;
pub mod constants;
mod metrics;
mod options;
mod stats;
mod types;

pub use annotate::{
    add_extended_cut_lines, annotate_document, default_output_path, load_pdf, save_pdf,
};
pub use card::{Card, layout_cards};
pub use metrics::{PageMetrics, find_page_middle, read_page_metrics};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
