//! Retrieves information about the version of the crate from Git and the build
//! environment. [`shadow_rs`] writes it to a file in the output directory so
//! that the binary can report exactly how it was built.

fn main() -> shadow_rs::SdResult<()> {
    println!("cargo:rerun-if-changed=build.rs");
    shadow_rs::new()
}
