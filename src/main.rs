fn main() {
    cpm::run_cli();
}
