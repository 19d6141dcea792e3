fn main() {
    // Emit esp-idf link arguments only for on-device builds; host/sim
    // builds have no IDF environment to probe.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
