fn main() {
    // Stamp the binary with its build time for the startup banner
    let build_date = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M UTC")
        .to_string();
    println!("cargo:rustc-env=SMARTHOME_BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
