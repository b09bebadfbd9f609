fn main() {
    // Propagate the ESP-IDF build environment to dependent crates when the
    // firmware image is being built. Host test builds skip this entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
