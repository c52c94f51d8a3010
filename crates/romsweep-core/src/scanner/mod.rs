pub mod walk;

pub use walk::{discover_roms, ScanOptions};
