use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stacks",
    about = "stacks — a small book-catalog service with per-user reviews",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL the client commands talk to.
    #[arg(long, global = true, default_value = "http://127.0.0.1:8000")]
    pub server: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the catalog server
    Serve(ServeArgs),
    /// Fetch the full catalog
    List(ListArgs),
    /// Look up a book by exact ISBN
    Isbn(IsbnArgs),
    /// List books by author (case-insensitive exact match)
    Author(AuthorArgs),
    /// Search titles by substring
    Title(TitleArgs),
    /// Show the reviews on a book
    Reviews(ReviewsArgs),
    /// Register a new user
    Register(CredentialArgs),
    /// Log in and print a session token
    Login(CredentialArgs),
    /// Add, replace, or delete your review on a book
    Review(ReviewArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file; flags below override its values.
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long)]
    pub bind: Option<String>,
    #[arg(long)]
    pub dataset: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct IsbnArgs {
    pub isbn: String,
}

#[derive(Args)]
pub struct AuthorArgs {
    pub author: String,
}

#[derive(Args)]
pub struct TitleArgs {
    pub fragment: String,
}

#[derive(Args)]
pub struct ReviewsArgs {
    pub isbn: String,
}

#[derive(Args)]
pub struct CredentialArgs {
    pub username: String,
    pub password: String,
}

#[derive(Args)]
pub struct ReviewArgs {
    pub isbn: String,
    /// Review text; required unless deleting.
    pub text: Option<String>,
    #[arg(short, long)]
    pub delete: bool,
    /// Session token from `stacks login`.
    #[arg(long)]
    pub token: String,
}
