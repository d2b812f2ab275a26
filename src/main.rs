//! # Voxel World Demo Entry Point
//!
//! Builds a small generated world and logs what the chunk index sees of it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(e) = voxel_world::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
