mod app;
mod audio;
mod config;
mod error;
mod import;
mod media;
mod mpris;
mod playlist;
mod presenter;
mod runtime;
mod session;
mod store;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("cassette: {e}");
        std::process::exit(1);
    }
}
