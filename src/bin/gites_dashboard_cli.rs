use gites_dashboard::{cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli() {
        eprintln!("Erreur : {err}");
        std::process::exit(1);
    }
}
