//! coursex - course archive export and conversion CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Export a course snapshot into ./out/circuits
//! coursex export --snapshot course.json --output out --course-dir circuits
//!
//! # Report the archive format version
//! coursex detect out/circuits
//!
//! # Convert the archive to the other layout
//! coursex convert out converted
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
