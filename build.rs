fn main() {
    // Propagates the ESP-IDF build environment for espidf-feature builds.
    // On host targets this is a no-op.
    embuild::espidf::sysenv::output();
}
