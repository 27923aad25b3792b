// generate_token.rs
// Utility to provision a company and mint its session token
//
//   generate_company_token --company-id C_XXXXXX [--days N]
//   generate_company_token --name Acme --email hr@acme.test [--image URL] [--days N]

#[allow(dead_code)]
#[path = "common/id_generator.rs"]
mod id_generator;
#[allow(dead_code)]
#[path = "auth/tokens.rs"]
mod tokens;

use anyhow::{bail, Context};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{env, str::FromStr};

#[derive(Debug, Default, PartialEq)]
struct Args {
    company_id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    image: Option<String>,
    days: Option<i64>,
}

fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("{} requires a value", flag))
        };
        match flag.as_str() {
            "--company-id" => parsed.company_id = Some(value()?),
            "--name" => parsed.name = Some(value()?),
            "--email" => parsed.email = Some(value()?),
            "--image" => parsed.image = Some(value()?),
            "--days" => {
                let days = value()?;
                parsed.days = Some(days.parse().with_context(|| format!("invalid --days {}", days))?);
            }
            other => bail!("unknown argument {}", other),
        }
    }

    if parsed.company_id.is_none() && (parsed.name.is_none() || parsed.email.is_none()) {
        bail!("pass --company-id, or --name and --email to provision a company");
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = parse_args(env::args().skip(1))?;

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://jobboard.db".to_string());
    let jwt_secret =
        env::var("JWT_SECRET").unwrap_or_else(|_| "replace_with_strong_secret".to_string());

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(SqliteConnectOptions::from_str(&database_url)?)
        .await
        .with_context(|| format!("cannot open {}; start the API once to create it", database_url))?;

    let company_id = if let Some(id) = &args.company_id {
        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM companies WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await?;
        exists.with_context(|| format!("company {} does not exist", id))?
    } else {
        let email = args
            .email
            .as_deref()
            .context("--email is required to provision a company")?
            .trim()
            .to_lowercase();

        sqlx::query(
            "INSERT INTO companies (id, name, email, image) VALUES (?, ?, ?, ?) ON CONFLICT(email) DO NOTHING",
        )
        .bind(id_generator::generate_company_id())
        .bind(args.name.as_deref().unwrap_or_default())
        .bind(&email)
        .bind(args.image.as_deref().unwrap_or_default())
        .execute(&pool)
        .await?;

        sqlx::query_scalar("SELECT id FROM companies WHERE email = ?")
            .bind(&email)
            .fetch_one(&pool)
            .await?
    };

    let token = tokens::issue_company_token(
        &jwt_secret,
        &company_id,
        args.days.map(chrono::Duration::days),
    )?;

    println!("Company: {}\n", company_id);
    println!("Send this in the `token` header:");
    println!("─────────────────────────────────────────────────");
    println!("{}", token);
    println!("─────────────────────────────────────────────────");
    if args.days.is_none() {
        println!("\n⚠️  This token does not expire. Rotate JWT_SECRET to revoke it.");
    }

    Ok(())
}
