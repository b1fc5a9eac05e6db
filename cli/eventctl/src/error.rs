//! Error handling and display for the CLI.

use colored::Colorize;
use thiserror::Error;

use crate::notice::{extract_error_message, format_error_notice, BackendError, Notice};

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Você não está autenticado. Rode `evd auth login` para entrar.")]
    NotAuthenticated,

    #[error("Erro da API ({status}): {}", extract_error_message(.body, None))]
    Api { status: u16, body: BackendError },

    #[error("Erro de rede: {0}")]
    Network(#[from] reqwest::Error),

    #[error("O token salvo não pode ser enviado; rode `evd auth logout` e entre novamente")]
    InvalidToken,

    #[error("Resposta inválida do servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error from a raw response body.
    pub fn api(status: u16, body: &[u8]) -> Self {
        Self::Api {
            status,
            body: BackendError::from_body(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Titled notice for this error.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Api { status, body } => format_error_notice(Some(*status), body, None),
            Self::NotAuthenticated => Notice::error("Erro de autenticação", self.to_string()),
            other => format_error_notice(other.status(), &BackendError::default(), Some(&other.to_string())),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    let Some(cli_err) = err.downcast_ref::<CliError>() else {
        eprintln!("{} {:#}", "Erro:".red().bold(), err);
        return;
    };

    let notice = cli_err.notice();
    eprintln!("{} {}", format!("{}:", notice.title).red().bold(), notice.message);

    match cli_err {
        CliError::NotAuthenticated => {
            eprintln!("\n{}", "Dica: rode `evd auth login` para entrar.".yellow());
        }
        CliError::Api { status: 401, .. } => {
            eprintln!(
                "\n{}",
                "Dica: sua sessão pode ter expirado. Rode `evd auth login`.".yellow()
            );
        }
        CliError::Api { status: 403, .. } => {
            eprintln!(
                "\n{}",
                "Dica: talvez você não tenha permissão para esta operação.".yellow()
            );
        }
        CliError::Network(_) => {
            eprintln!(
                "\n{}",
                "Dica: verifique sua conexão e o endereço em `evd config show`.".yellow()
            );
        }
        _ => {}
    }
}
