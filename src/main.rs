fn main() {
    sigil::cli::run();
}
