use churchsite::{
    config::AppConfig,
    db,
    models::Role,
    repositories::user_repository::SqliteUserRepository,
    services::user_service::{CreateUserRequest, UpdatePasswordRequest, UserService},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "churchsite-cli")]
#[command(about = "CLI tool for managing church site accounts and data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Database commands
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },

    /// List all users
    List {
        /// Maximum number of users to display
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short = 'o', long, default_value_t = 0)]
        offset: i64,
    },

    /// Delete a user
    Delete {
        #[arg(short, long)]
        username: String,
    },

    /// Set a new password for a user
    SetPassword {
        #[arg(short, long)]
        username: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Apply migrations, insert sample content and the admin account
    Init,
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

/// A password given on the command line is its own confirmation.
fn password_pair(password: Option<String>) -> anyhow::Result<(String, String)> {
    match password {
        Some(pw) => Ok((pw.clone(), pw)),
        None => {
            let password = get_password("Password")?;
            let confirm = get_password("Confirm password")?;
            Ok((password, confirm))
        }
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}: {}", context, err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;

    if let Commands::Db {
        command: DbCommands::Init,
    } = cli.command
    {
        let created = db::initialize(&pool, &config.admin_password).await?;
        println!("✅ Database initialized at {}", config.database_url);
        if created {
            println!("  Admin account '{}' created", db::DEFAULT_ADMIN_USERNAME);
        }
        return Ok(());
    }

    // Every other command needs the schema in place
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = UserService::new(user_repository);

    let Commands::User { command } = cli.command else {
        return Ok(());
    };

    match command {
        UserCommands::Create {
            username,
            password,
            email,
            role,
        } => {
            let (password, password_confirm) = password_pair(password)?;

            let request = CreateUserRequest {
                username,
                password,
                password_confirm: Some(password_confirm),
                email,
                role: role.into(),
            };

            match user_service.create_user(request).await {
                Ok(user) => {
                    println!("✅ User created successfully!");
                    println!("  ID: {}", user.id);
                    println!("  Username: {}", user.username);
                    println!("  Role: {}", user.role());
                }
                Err(err) => fail("Failed to create user", err),
            }
        }

        UserCommands::List { limit, offset } => {
            let users = match user_service.list_users(Some(limit), Some(offset)).await {
                Ok(users) => users,
                Err(err) => fail("Failed to list users", err),
            };

            if users.is_empty() {
                println!("No users found.");
            } else {
                println!("{:<5} {:<24} {:<8} {:<30}", "ID", "Username", "Role", "Email");
                println!("{}", "-".repeat(70));
                for user in users {
                    println!(
                        "{:<5} {:<24} {:<8} {:<30}",
                        user.id,
                        user.username,
                        user.role().as_str(),
                        user.email.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        UserCommands::Delete { username } => {
            match user_service.find_user_by_username(&username).await {
                Ok(Some(user)) => match user_service.delete_user(user.id).await {
                    Ok(()) => println!("✅ User '{}' deleted successfully!", username),
                    Err(err) => fail("Failed to delete user", err),
                },
                Ok(None) => fail("Failed to delete user", format!("'{}' not found", username)),
                Err(err) => fail("Failed to find user", err),
            }
        }

        UserCommands::SetPassword { username, password } => {
            let user = match user_service.find_user_by_username(&username).await {
                Ok(Some(user)) => user,
                Ok(None) => fail("Failed to set password", format!("'{}' not found", username)),
                Err(err) => fail("Failed to find user", err),
            };

            let (new_password, new_password_confirm) = password_pair(password)?;
            let request = UpdatePasswordRequest {
                user_id: user.id,
                new_password,
                new_password_confirm: Some(new_password_confirm),
            };

            match user_service.update_password(request).await {
                Ok(()) => println!("✅ Password updated for '{}'", username),
                Err(err) => fail("Failed to update password", err),
            }
        }
    }

    Ok(())
}
