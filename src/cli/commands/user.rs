use std::io::Write;

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::db::Store;
use crate::entities::users::Gender;
use crate::services::{AuthError, AuthService, Registration, SeaOrmAuthService};

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Interactively create an account. Goes through the same service as the
/// register endpoint, so CLI-created users are indistinguishable from
/// web-registered ones.
pub async fn cmd_add_user(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let email = prompt("Email")?;
    if email.is_empty() {
        println!("Email is required.");
        return Ok(());
    }

    let password = prompt("Password")?;
    if password.is_empty() {
        println!("Password is required.");
        return Ok(());
    }

    let first_name = prompt("First name")?;
    let last_name = prompt("Last name")?;
    if first_name.is_empty() || last_name.is_empty() {
        println!("First and last name are required.");
        return Ok(());
    }

    let gender = prompt("Gender (MALE/FEMALE/OTHER)")?.to_uppercase();
    if Gender::parse(&gender).is_none() {
        println!("Invalid gender. Use MALE, FEMALE or OTHER.");
        return Ok(());
    }

    let auth = SeaOrmAuthService::new(store, TokenService::new(&config.auth.token_secret));

    let registration = Registration {
        email,
        password,
        first_name,
        last_name,
        gender,
        phone_number: None,
        date_of_birth: None,
        country: None,
        city: None,
        address: None,
        postal_code: None,
    };

    match auth.register(registration).await {
        Ok(user) => {
            println!();
            println!(
                "✓ Created account for {} {} <{}>",
                user.first_name, user.last_name, user.email
            );
        }
        Err(AuthError::EmailTaken) => {
            println!("User with this email already exists.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No accounts registered.");
        println!();
        println!("Create one with: lectio add-user");
        return Ok(());
    }

    println!("Registered Accounts ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let verified = if user.email_verified { "✓" } else { "•" };
        println!(
            "{} {} {} <{}>",
            verified, user.first_name, user.last_name, user.email
        );
        println!(
            "  Status: {} | Created: {} | Last login: {}",
            user.status,
            user.created_at,
            user.last_login_at.as_deref().unwrap_or("Never")
        );
    }

    println!();
    println!("Legend: ✓ Email verified | • Unverified");

    Ok(())
}
