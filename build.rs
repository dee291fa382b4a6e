use std::{env, fs, path::PathBuf};

fn main() {
    // Put the board's memory layout on the linker search path as memory.x
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x_source = if target.starts_with("thumbv8m") {
        // Pico 2 ARM
        Some("memory-pico2.x")
    } else if target.starts_with("thumbv6m") {
        // Pico 1
        Some("memory.x")
    } else {
        // Host builds (tests) link nothing board-specific
        None
    };

    if let Some(source) = memory_x_source {
        let memory_x =
            fs::read_to_string(source).unwrap_or_else(|err| panic!("Failed to read {source}: {err}"));
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed={source}");
    }

    if env::var_os("CARGO_FEATURE_ARM").is_some() && memory_x_source.is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        if target.starts_with("thumbv6m") {
            // RP2040 second-stage bootloader
            println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
        }
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
