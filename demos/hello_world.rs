use signet::{command, Application, Outcome};
use std::path::PathBuf;

/// Greet someone.
#[command]
fn greet(name: String, #[arg(default = "Holy")] surname: String) {
    println!("Hello {name} {surname}");
}

/// Introduce the author.
#[command]
fn author(
    #[arg(help = "Author name")] name: String,
    surname: String,
    #[arg(default = "./my_pic.jpeg", help = "Path to the photo file")] photo_file: PathBuf,
) -> Outcome {
    println!("My name {name} {surname}");
    println!("My picture: {}", photo_file.display());

    // Stop here, without error.
    Outcome::Exit
}

fn main() -> signet::anyhow::Result<()> {
    Application::new("hello_world")
        .about("Say hello.")
        .command(greet_command())
        .command(author_command())
        .build()
        .run()
}
