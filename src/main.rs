//! RAX Auth Manager - Entry Point
//!
//! Interactive credential manager front-end. Prompts for a protection
//! method, then registers or verifies credentials against the CSV-backed
//! store for that method.

use env_logger;
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::process;

use rax_auth_manager::auth::{CredentialStore, Policy};
use rax_auth_manager::config::ManagerConfig;
use rax_auth_manager::error::handlers::{error_to_exit_code, handle_error};
use rax_auth_manager::error::{AuthError, ManagerError};
use rax_auth_manager::storage::table;

/// Protection methods offered by the prompt loop
const METHODS: [(Policy, &str); 3] = [
    (Policy::Plain, "Simple Database Auth Manager"),
    (Policy::Hashed, "Hashed Database Auth Manager"),
    (Policy::SaltedHashed, "Salted and Hashed Database Auth Manager"),
];

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching auth manager...");

    let config = match ManagerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(2);
        }
    };

    // The store fails fast on a missing table, so the front-end pre-creates
    // header-only tables for each offered method.
    if let Err(e) = ensure_tables(&config) {
        handle_error(&e);
        process::exit(error_to_exit_code(&e));
    }

    println!("------------------------------");
    println!("Authentication Manager");
    println!("------------------------------\n");

    let mut cycle = 0;
    loop {
        cycle += 1;
        println!("------------Cycle {cycle}------------");

        let Some(choice) =
            prompt("Choose an authentication method: plain (1), hashed (2), or salted (3): ")
        else {
            break;
        };

        let Some((policy, description)) = select_method(&choice) else {
            println!("Unknown method: {choice}\n");
            continue;
        };

        let mut store = match CredentialStore::open(config.table_path(policy), policy, &config) {
            Ok(store) => store,
            Err(e) => {
                handle_error(&e);
                process::exit(error_to_exit_code(&e));
            }
        };

        println!("\nAuthentication chosen: {description}");

        let Some(action) = prompt("\nLogin (1) or New User (2): ") else {
            break;
        };
        let Some(username) = prompt("\nusername: ") else {
            break;
        };
        let Some(password) = prompt("password: ") else {
            break;
        };
        println!();

        if action == "2" {
            run_register(&mut store, &username, &password);
        } else {
            run_login(&store, &username, &password);
        }
    }
}

/// Register a new user, collapsing store errors to a printed result
fn run_register(store: &mut CredentialStore, username: &str, password: &str) {
    match store.register(username, password) {
        Ok(()) => println!("User added successfully\n"),
        Err(ManagerError::Auth(e)) => {
            info!("Registration failed: {}", e);
            println!("User add failed\n");
        }
        Err(e) => {
            handle_error(&e);
            process::exit(error_to_exit_code(&e));
        }
    }
}

/// Verify a login attempt, collapsing bad-username and bad-password alike
fn run_login(store: &CredentialStore, username: &str, password: &str) {
    match store.authenticate(username, password) {
        Ok(true) => println!("Login successful\n"),
        Ok(false) => println!("Login failed\n"),
        Err(ManagerError::Auth(AuthError::UsernameNotFound(u))) => {
            info!("Login failed, username not found: {}", u);
            println!("Login failed\n");
        }
        Err(e) => {
            handle_error(&e);
            process::exit(error_to_exit_code(&e));
        }
    }
}

fn select_method(choice: &str) -> Option<(Policy, &'static str)> {
    match choice {
        "1" => Some(METHODS[0]),
        "2" => Some(METHODS[1]),
        "3" => Some(METHODS[2]),
        _ => None,
    }
}

/// Create the database directory and a header-only table per offered method
fn ensure_tables(config: &ManagerConfig) -> Result<(), ManagerError> {
    fs::create_dir_all(&config.database_dir)
        .map_err(rax_auth_manager::error::StorageError::from)?;

    for (policy, _) in METHODS {
        let path = config.table_path(policy);
        if !path.is_file() {
            info!("Creating empty credential table at {}", path.display());
            table::create_empty(&path)?;
        }
    }
    Ok(())
}

/// Prompt on stdout and read one trimmed line; None on end of input
fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
