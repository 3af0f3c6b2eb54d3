fn main() {
    paramctl::run_cli();
}
