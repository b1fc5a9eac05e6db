//! Profile commands for the logged-in user.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use eventdesk_model::{format_phone, is_valid_phone, Identity, Role, UpdatePassword, UpdateUser};

use crate::notice::Notice;
use crate::output::{print_info, print_notice, print_single, OutputFormat};
use crate::services::UsersService;

use super::CommandContext;

/// Profile commands.
#[derive(Debug, Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Show your profile.
    Show {
        /// Print the stored session snapshot without contacting the backend.
        #[arg(long)]
        cached: bool,
    },

    /// Update profile fields.
    Update(UpdateProfileArgs),

    /// Change your password.
    Password(PasswordArgs),

    /// Delete your account and end the session.
    Delete {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct UpdateProfileArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    role: Option<Role>,

    #[arg(long)]
    department: Option<String>,
}

#[derive(Debug, Args)]
struct PasswordArgs {
    #[arg(long, env = "EVD_PASSWORD", hide_env_values = true)]
    current: String,

    #[arg(long = "new", env = "EVD_NEW_PASSWORD", hide_env_values = true)]
    new_password: String,
}

impl ProfileCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let users = UsersService::new(ctx.client.clone());
        match self.command {
            ProfileSubcommand::Show { cached } => show(&ctx, &users, cached).await,
            ProfileSubcommand::Update(args) => update(&users, args).await,
            ProfileSubcommand::Password(args) => password(&users, args).await,
            ProfileSubcommand::Delete { yes } => delete(&users, yes).await,
        }
    }
}

fn print_identity(identity: &Identity, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(identity),
        OutputFormat::Table => {
            println!("{}", identity.name);
            println!("  E-mail: {}", identity.email);
            println!("  Telefone: {}", format_phone(&identity.phone));
            println!("  Perfil: {}", identity.role);
            if let Some(department) = &identity.department {
                println!("  Departamento: {department}");
            }
        }
    }
}

async fn show(ctx: &CommandContext, users: &UsersService, cached: bool) -> Result<()> {
    let identity = if cached {
        match ctx.session.identity() {
            Some(identity) => identity,
            None => return Err(crate::error::CliError::NotAuthenticated.into()),
        }
    } else {
        users.reload_profile().await?
    };
    print_identity(&identity, ctx.format);
    Ok(())
}

async fn update(users: &UsersService, args: UpdateProfileArgs) -> Result<()> {
    if let Some(phone) = args.phone.as_deref().filter(|p| !is_valid_phone(p)) {
        bail!("Telefone inválido: {phone}");
    }
    let update = UpdateUser {
        name: args.name,
        telephone_number: args.phone.as_deref().map(format_phone),
        role: args.role,
        department: args.department,
    };
    if update.is_empty() {
        bail!("Nada para atualizar. Informe ao menos um de --name, --phone, --role, --department.");
    }

    users.update(&update).await?;
    // Keep the session snapshot in step with what the backend now holds.
    users.reload_profile().await?;
    print_notice(&Notice::success("Perfil atualizado", "Seus dados foram salvos."));
    Ok(())
}

async fn password(users: &UsersService, args: PasswordArgs) -> Result<()> {
    users
        .update_password(&UpdatePassword {
            current_password: args.current,
            new_password: args.new_password,
        })
        .await?;
    print_notice(&Notice::success("Senha alterada", "Sua senha foi atualizada."));
    Ok(())
}

async fn delete(users: &UsersService, yes: bool) -> Result<()> {
    if !yes {
        print_info("Esta ação remove sua conta permanentemente. Rode `evd profile delete --yes` para confirmar.");
        return Ok(());
    }

    users.delete_account().await?;
    print_notice(&Notice::success("Conta excluída", "Sua conta foi removida."));
    Ok(())
}
