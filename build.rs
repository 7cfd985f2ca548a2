//! Build script for ptbr-g2p
//!
//! Re-runs the build when the embedded resource tables change.

fn main() {
    println!("cargo:rerun-if-changed=resources/prefixes.txt");
    println!("cargo:rerun-if-changed=resources/homographs_heterophones.txt");
}
