use anyhow::{bail, Context};
use colored::Colorize;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use stacks_catalog::Book;
use stacks_server::{ServerConfig, StacksServer};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let api = ApiClient::new(cli.server);
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::List(_) => cmd_list(&api).await,
        Command::Isbn(args) => cmd_isbn(&api, args).await,
        Command::Author(args) => cmd_author(&api, args).await,
        Command::Title(args) => cmd_title(&api, args).await,
        Command::Reviews(args) => cmd_reviews(&api, args).await,
        Command::Register(args) => cmd_register(&api, args).await,
        Command::Login(args) => cmd_login(&api, args).await,
        Command::Review(args) => cmd_review(&api, args).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => ServerConfig::from_file(&path)
            .with_context(|| format!("failed to load config {path}"))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse().context("invalid --bind address")?;
    }
    if let Some(dataset) = args.dataset {
        config.dataset_path = dataset.into();
    }
    let server = StacksServer::from_config(config)?;
    server.serve().await?;
    Ok(())
}

async fn cmd_list(api: &ApiClient) -> anyhow::Result<()> {
    let books: Vec<Book> = serde_json::from_value(api.get("/books").await?)?;
    print_books(&books);
    Ok(())
}

async fn cmd_isbn(api: &ApiClient, args: IsbnArgs) -> anyhow::Result<()> {
    let books: Vec<Book> =
        serde_json::from_value(api.get(&format!("/books/isbn/{}", args.isbn)).await?)?;
    print_books(&books);
    Ok(())
}

async fn cmd_author(api: &ApiClient, args: AuthorArgs) -> anyhow::Result<()> {
    let books: Vec<Book> =
        serde_json::from_value(api.get(&format!("/books/author/{}", args.author)).await?)?;
    print_books(&books);
    Ok(())
}

async fn cmd_title(api: &ApiClient, args: TitleArgs) -> anyhow::Result<()> {
    let books: Vec<Book> =
        serde_json::from_value(api.get(&format!("/books/title/{}", args.fragment)).await?)?;
    print_books(&books);
    Ok(())
}

async fn cmd_reviews(api: &ApiClient, args: ReviewsArgs) -> anyhow::Result<()> {
    let body = api.get(&format!("/books/review/{}", args.isbn)).await?;
    print_reviews(&body);
    Ok(())
}

async fn cmd_register(api: &ApiClient, args: CredentialArgs) -> anyhow::Result<()> {
    let body = api
        .send(
            Method::POST,
            "/register",
            Some(json!({"username": args.username, "password": args.password})),
            None,
        )
        .await?;
    println!("{} {}", "✓".green().bold(), message_of(&body));
    Ok(())
}

async fn cmd_login(api: &ApiClient, args: CredentialArgs) -> anyhow::Result<()> {
    let body = api
        .send(
            Method::POST,
            "/login",
            Some(json!({"username": args.username, "password": args.password})),
            None,
        )
        .await?;
    println!("{} {}", "✓".green().bold(), message_of(&body));
    if let Some(token) = body["token"].as_str() {
        println!("{token}");
    }
    Ok(())
}

async fn cmd_review(api: &ApiClient, args: ReviewArgs) -> anyhow::Result<()> {
    let path = format!("/books/review/{}", args.isbn);
    let body = if args.delete {
        api.send(Method::DELETE, &path, None, Some(&args.token)).await?
    } else {
        let Some(text) = args.text else {
            bail!("review text is required unless --delete is given");
        };
        api.send(
            Method::POST,
            &path,
            Some(json!({"review": text})),
            Some(&args.token),
        )
        .await?
    };
    println!("{} {}", "✓".green().bold(), message_of(&body));
    print_reviews(&body);
    Ok(())
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }
    for book in books {
        println!(
            "{}  {} — {}",
            book.isbn.yellow(),
            book.title.bold(),
            book.author
        );
    }
}

fn print_reviews(body: &Value) {
    match body["reviews"].as_object() {
        Some(reviews) => {
            if let Some(title) = body["title"].as_str() {
                println!("Reviews for {}:", title.bold());
            }
            for (user, text) in reviews {
                println!("  {}: {}", user.cyan(), text.as_str().unwrap_or_default());
            }
        }
        None => println!("{}", body["reviews"].as_str().unwrap_or("No reviews yet")),
    }
}

fn message_of(body: &Value) -> String {
    body["message"].as_str().unwrap_or_default().to_string()
}

/// Thin wrapper over reqwest that surfaces the server's error messages.
struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(base: String) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(Method::GET, path, None, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> anyhow::Result<Value> {
        let mut request = self.http.request(method, format!("{}{}", self.base, path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.base))?;
        let status = response.status();
        let value: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let message = value["message"].as_str().unwrap_or("request rejected");
            bail!("{} ({})", message, status_label(status));
        }
        Ok(value)
    }
}

fn status_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
