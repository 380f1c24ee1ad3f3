fn main() {
    println!("cargo:rerun-if-changed=endpoint.json");

    // Only the firmware build needs the ESP-IDF environment; host builds
    // (tests, fuzzing) skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
