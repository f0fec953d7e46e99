//! mehfil-admin - provisioning utility for Mehfil-e-Shayari
//!
//! Runs against the same storage as the web server (`DATABASE_URL` and the
//! other `DATABASE_*` variables, `.env` honoured). Admin accounts can only be
//! created here; the web interface has no sign-up.
//!
//! ```bash
//! mehfil-admin init-schema
//! mehfil-admin create-admin                       # prompts for both values
//! echo "$PASSWORD" | mehfil-admin create-admin --username ghalib --password-stdin
//! ```

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mehfil_shared::{
    auth::provision,
    db::{connect, Backend, DatabaseConfig},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mehfil-admin",
    author,
    version,
    about = "Provisioning utility for Mehfil-e-Shayari"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an admin account (prompts for any value not given)
    CreateAdmin(CreateAdminArgs),
    /// Create the shayari and admins tables if they do not exist
    InitSchema,
}

#[derive(Args, Debug)]
struct CreateAdminArgs {
    /// Admin username
    #[arg(long, short = 'u')]
    username: Option<String>,

    /// Read the password from the first line of stdin without prompting
    #[arg(long)]
    password_stdin: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mehfil_admin=info,mehfil_shared=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin(args) => create_admin(args).await,
        Commands::InitSchema => init_schema().await,
    }
}

async fn open_backend() -> Result<Arc<dyn Backend>> {
    let config = DatabaseConfig::from_env()?;
    let backend = connect(&config)?;

    backend
        .ensure_schema()
        .await
        .with_context(|| format!("Could not prepare the {} database", backend.kind()))?;

    Ok(backend)
}

async fn init_schema() -> Result<()> {
    let backend = open_backend().await?;
    println!("Schema ready on {} backend.", backend.kind());

    backend.close().await;
    Ok(())
}

async fn create_admin(args: CreateAdminArgs) -> Result<()> {
    let (username, password) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        println!("--- Create Admin User ---");
        read_credentials(&args, &mut input, &mut output)?
    };

    let (username, password) = provision::normalize_credentials(&username, &password)?;

    let backend = open_backend().await?;
    let admin = {
        let mut conn = backend
            .acquire()
            .await
            .context("Could not connect to the database")?;

        provision::create_admin(conn.as_mut(), username, password)
            .await
            .with_context(|| format!("Could not create admin '{}'", username))?
    };

    println!("Success! Admin '{}' created.", admin.username);

    backend.close().await;
    Ok(())
}

fn read_credentials<R, W>(args: &CreateAdminArgs, input: &mut R, output: &mut W) -> Result<(String, String)>
where
    R: BufRead,
    W: Write,
{
    let username = match &args.username {
        Some(username) => username.clone(),
        None => prompt(input, output, "Enter username: ")?,
    };

    let password = if args.password_stdin {
        read_line(input)?
    } else {
        prompt(input, output, "Enter password: ")?
    };

    Ok((username, password))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    read_line(input)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        bail!("Unexpected end of input");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Cursor;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_admin() {
        let cli = Cli::try_parse_from([
            "mehfil-admin",
            "create-admin",
            "--username",
            "ghalib",
            "--password-stdin",
        ])
        .unwrap();

        match cli.command {
            Commands::CreateAdmin(args) => {
                assert_eq!(args.username.as_deref(), Some("ghalib"));
                assert!(args.password_stdin);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_schema() {
        let cli = Cli::try_parse_from(["mehfil-admin", "init-schema"]).unwrap();
        assert!(matches!(cli.command, Commands::InitSchema));
    }

    #[test]
    fn test_prompts_for_missing_values() {
        let args = CreateAdminArgs {
            username: None,
            password_stdin: false,
        };
        let mut input = Cursor::new("ghalib\r\nasad\n");
        let mut output = Vec::new();

        let (username, password) = read_credentials(&args, &mut input, &mut output).unwrap();

        assert_eq!(username, "ghalib");
        assert_eq!(password, "asad");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter username: Enter password: "
        );
    }

    #[test]
    fn test_password_stdin_does_not_prompt() {
        let args = CreateAdminArgs {
            username: Some("ghalib".to_string()),
            password_stdin: true,
        };
        let mut input = Cursor::new("asad\n");
        let mut output = Vec::new();

        let (username, password) = read_credentials(&args, &mut input, &mut output).unwrap();

        assert_eq!(username, "ghalib");
        assert_eq!(password, "asad");
        assert!(output.is_empty());
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let args = CreateAdminArgs {
            username: Some("ghalib".to_string()),
            password_stdin: true,
        };

        let result = read_credentials(&args, &mut Cursor::new(""), &mut Vec::new());
        assert!(result.is_err());
    }
}
