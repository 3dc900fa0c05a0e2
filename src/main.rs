//! Command line interface for the Syllabus platform
//!
//! Every authentication and role-management operation of the client
//! library is reachable from here. The session persists between
//! invocations, so `login` followed by `whoami` picks up the stored
//! session.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use syllabus_client::admin::RoleManagementClient;
use syllabus_client::auth::access::{self, DEFAULT_AUTHENTICATED_ROUTE, LOGIN_ROUTE};
use syllabus_client::auth::models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UpdateProfileRequest,
};
use syllabus_client::{
    logging, ApiClient, AuthError, AuthGateway, ClientConfig, Role, SessionHandle, TokenStore,
};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleCli {
    Student,
    Professor,
    Administrator,
}

impl From<RoleCli> for Role {
    fn from(cli: RoleCli) -> Self {
        match cli {
            RoleCli::Student => Role::Student,
            RoleCli::Professor => Role::Professor,
            RoleCli::Administrator => Role::Administrator,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "syllabus", about = "Client for the Syllabus course administration platform")]
struct Cli {
    /// Backend base URL (overrides SYLLABUS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Session file location (overrides SYLLABUS_SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and open a session
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone_prefix: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },
    /// Open a session with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Close the session and remove the persisted record
    Logout,
    /// Show the current session and role memberships
    Whoami,
    /// Update the signed-in user's profile
    UpdateProfile {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone_prefix: String,
        #[arg(long, default_value = "")]
        phone_number: String,
    },
    /// Change the signed-in user's password
    ChangePassword {
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Redeem a password reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Administrator role management
    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RolesCommand {
    /// Grant a role to the user behind an email address
    Assign {
        #[arg(long)]
        email: String,
        #[arg(long, value_enum)]
        role: RoleCli,
    },
    /// Revoke a role from the user behind an email address
    Remove {
        #[arg(long)]
        email: String,
        #[arg(long, value_enum)]
        role: RoleCli,
    },
    /// List the roles a user holds
    Show {
        #[arg(long)]
        email: String,
    },
    /// Check a single role membership
    Check {
        #[arg(long)]
        email: String,
        #[arg(long, value_enum)]
        role: RoleCli,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::setup_logging();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }

    let session = SessionHandle::new(TokenStore::new(config.session_file));
    let api = ApiClient::new(config.api_url, session.clone());
    let gateway = AuthGateway::new(api.clone());
    let roles = RoleManagementClient::new(api);

    match run(cli.command, &gateway, &roles, &session).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Gateway operations leave the user-facing message in the session
            let message = session
                .snapshot()
                .error
                .unwrap_or_else(|| err.to_string());
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Command,
    gateway: &AuthGateway,
    roles: &RoleManagementClient,
    session: &SessionHandle,
) -> Result<(), AuthError> {
    match command {
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            phone_prefix,
            phone_number,
        } => {
            let response = gateway
                .register(&RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    phone_prefix,
                    phone_number,
                })
                .await?;
            println!(
                "Registered {} {} -> {}",
                response.first_name, response.last_name, DEFAULT_AUTHENTICATED_ROUTE
            );
        }
        Command::Login { email, password } => {
            let response = gateway.login(&LoginRequest { email, password }).await?;
            println!(
                "Signed in as {} {} -> {}",
                response.first_name, response.last_name, DEFAULT_AUTHENTICATED_ROUTE
            );
        }
        Command::Logout => {
            gateway.logout();
            println!("Signed out -> {}", LOGIN_ROUTE);
        }
        Command::Whoami => {
            let snapshot = session.snapshot();
            match &snapshot.user {
                Some(user) => {
                    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
                    let labels: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
                    println!("roles: {}", labels.join(", "));
                    println!("administrator: {}", access::is_admin(&snapshot));
                    println!("professor: {}", access::is_professor(&snapshot));
                    println!("student: {}", access::is_student(&snapshot));
                }
                None => println!("Not signed in."),
            }
        }
        Command::UpdateProfile {
            first_name,
            last_name,
            email,
            phone_prefix,
            phone_number,
        } => {
            let response = gateway
                .update_profile(&UpdateProfileRequest {
                    first_name,
                    last_name,
                    email,
                    phone_prefix,
                    phone_number,
                })
                .await?;
            println!("Profile updated for {}", response.email);
        }
        Command::ChangePassword {
            current_password,
            new_password,
            confirm_password,
        } => {
            let response = gateway
                .change_password(&ChangePasswordRequest {
                    current_password,
                    new_password,
                    confirm_password,
                })
                .await?;
            println!("{}", response.message);
        }
        Command::ForgotPassword { email } => {
            let response = gateway
                .forgot_password(&ForgotPasswordRequest { email })
                .await?;
            println!("{}", response.message);
        }
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let response = gateway
                .reset_password(&ResetPasswordRequest {
                    token,
                    password,
                    confirm_password,
                })
                .await?;
            println!("{}", response.message);
        }
        Command::Roles { command } => run_roles(command, roles).await?,
    }

    Ok(())
}

async fn run_roles(
    command: RolesCommand,
    roles: &RoleManagementClient,
) -> Result<(), AuthError> {
    match command {
        RolesCommand::Assign { email, role } => {
            let user = roles.user_by_email(&email).await?;
            let role = Role::from(role);
            roles.assign_role(&user.user_id, role).await?;
            println!("Assigned {} to {}", role.as_str(), user.email);
        }
        RolesCommand::Remove { email, role } => {
            let user = roles.user_by_email(&email).await?;
            let role = Role::from(role);
            roles.remove_role(&user.user_id, role).await?;
            println!("Removed {} from {}", role.as_str(), user.email);
        }
        RolesCommand::Show { email } => {
            let user = roles.user_by_email(&email).await?;
            let held = roles.user_roles(&user.user_id).await?;
            let labels: Vec<&str> = held.iter().map(|r| r.as_str()).collect();
            println!("{}: {}", user.email, labels.join(", "));
        }
        RolesCommand::Check { email, role } => {
            let user = roles.user_by_email(&email).await?;
            let role = Role::from(role);
            let in_role = roles.is_user_in_role(&user.user_id, role).await?;
            println!("{} in {}: {}", user.email, role.as_str(), in_role);
        }
    }

    Ok(())
}
