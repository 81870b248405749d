fn main() {
    if let Err(err) = hipodromo_lib::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
