mod printer;
mod writer;

pub use printer::{describe, print_banner, print_capture_received, print_completion, print_section};
pub use writer::{persist, save_capture};
