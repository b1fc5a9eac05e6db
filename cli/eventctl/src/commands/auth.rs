//! Authentication commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use eventdesk_model::{format_phone, is_valid_phone, LoginRequest, NewUser, Role};
use eventdesk_session::policy::home_path;

use crate::notice::Notice;
use crate::output::{print_info, print_notice, print_single, OutputFormat};
use crate::services::AuthService;

use super::CommandContext;

/// Authentication commands.
#[derive(Debug, Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Log in with email and password.
    Login(LoginArgs),

    /// Log out and forget the stored session.
    Logout,

    /// Create an account.
    Register(RegisterArgs),

    /// Request a password reset email.
    ResetPassword(ResetPasswordArgs),

    /// Set a new password using the token from the reset email.
    VerifyReset(VerifyResetArgs),

    /// Show current authentication status.
    Status,

    /// Show who you are logged in as.
    Whoami,
}

#[derive(Debug, Args)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "EVD_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, env = "EVD_PASSWORD", hide_env_values = true)]
    password: String,

    /// Telephone number, e.g. "(21) 99876-5432".
    #[arg(long)]
    phone: String,

    /// ORGANIZER or REGULAR (Portuguese labels accepted).
    #[arg(long, default_value = "REGULAR")]
    role: Role,

    #[arg(long)]
    department: Option<String>,
}

#[derive(Debug, Args)]
struct ResetPasswordArgs {
    #[arg(long)]
    email: String,
}

#[derive(Debug, Args)]
struct VerifyResetArgs {
    /// Token received by email.
    #[arg(long)]
    token: String,

    #[arg(long, env = "EVD_NEW_PASSWORD", hide_env_values = true)]
    new_password: String,
}

impl AuthCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            AuthSubcommand::Login(args) => login(ctx, args).await,
            AuthSubcommand::Logout => logout(ctx),
            AuthSubcommand::Register(args) => register(ctx, args).await,
            AuthSubcommand::ResetPassword(args) => reset_password(ctx, args).await,
            AuthSubcommand::VerifyReset(args) => verify_reset(ctx, args).await,
            AuthSubcommand::Status => status(ctx),
            AuthSubcommand::Whoami => whoami(ctx),
        }
    }
}

async fn login(ctx: CommandContext, args: LoginArgs) -> Result<()> {
    let auth = AuthService::new(ctx.client);
    let identity = auth
        .login(&LoginRequest {
            email: args.email,
            password: args.password,
        })
        .await?;

    print_notice(&Notice::success(
        "Login realizado",
        format!("Bem-vindo(a), {}!", identity.name),
    ));
    print_info(&format!(
        "Sua área: {} ({}). Use `evd home` para abrir.",
        home_path(identity.role),
        identity.role
    ));
    Ok(())
}

fn logout(ctx: CommandContext) -> Result<()> {
    AuthService::new(ctx.client).logout();
    print_notice(&Notice::success("Sessão encerrada", "Você saiu da sua conta."));
    Ok(())
}

async fn register(ctx: CommandContext, args: RegisterArgs) -> Result<()> {
    if !is_valid_phone(&args.phone) {
        bail!("Telefone inválido: {}", args.phone);
    }
    let user = NewUser {
        name: args.name,
        email: args.email,
        password: args.password,
        telephone_number: format_phone(&args.phone),
        role: args.role,
        department: args.department.filter(|d| !d.trim().is_empty()),
    };
    AuthService::new(ctx.client).register(&user).await?;

    print_notice(&Notice::success(
        "Cadastro realizado",
        "Conta criada com sucesso. Faça login para continuar.",
    ));
    Ok(())
}

async fn reset_password(ctx: CommandContext, args: ResetPasswordArgs) -> Result<()> {
    let response = AuthService::new(ctx.client)
        .request_password_reset(&args.email)
        .await?;
    let message = if response.message.is_empty() {
        "Se o email estiver cadastrado, você receberá as instruções de redefinição.".to_string()
    } else {
        response.message
    };
    print_notice(&Notice::info("Redefinição de senha", message));
    Ok(())
}

async fn verify_reset(ctx: CommandContext, args: VerifyResetArgs) -> Result<()> {
    let response = AuthService::new(ctx.client)
        .verify_password_reset(&args.token, &args.new_password)
        .await?;
    let message = if response.message.is_empty() {
        "Senha redefinida com sucesso.".to_string()
    } else {
        response.message
    };
    print_notice(&Notice::success("Senha redefinida", message));
    Ok(())
}

fn status(ctx: CommandContext) -> Result<()> {
    match ctx.session.identity() {
        Some(identity) => {
            println!("{} autenticado", "Sessão:".green().bold());
            println!("  Nome: {}", identity.name);
            println!("  E-mail: {}", identity.email);
            println!("  Perfil: {}", identity.role);
            println!("  Área: {}", home_path(identity.role));
        }
        None => {
            println!("{} não autenticado", "Sessão:".red().bold());
            println!("\nRode {} para entrar.", "evd auth login".cyan());
        }
    }
    Ok(())
}

fn whoami(ctx: CommandContext) -> Result<()> {
    let Some(identity) = ctx.session.identity() else {
        return Err(crate::error::CliError::NotAuthenticated.into());
    };

    match ctx.format {
        OutputFormat::Json => print_single(&identity),
        OutputFormat::Table => println!("{} <{}> ({})", identity.name, identity.email, identity.role),
    }
    Ok(())
}
