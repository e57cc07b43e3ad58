fn main() {
    suid_launcher::run_main();
}
