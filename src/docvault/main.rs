mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        cli::render::print_error(&e);
        std::process::exit(1);
    }
}
