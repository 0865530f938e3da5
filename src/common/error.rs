// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::booking::Booking;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("A data de check-out deve ser posterior à data de check-in")]
    InvalidDateRange,

    #[error("A data de check-in não pode ser anterior a hoje")]
    PastCheckIn,

    // Carrega as reservas conflitantes para diagnóstico do chamador
    #[error("O apartamento não está disponível nas datas selecionadas")]
    BookingConflict(Vec<Booking>),

    #[error("{0} não encontrado(a)")]
    ResourceNotFound(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // O banco contradisse uma checagem de existência recém-feita.
    // Sinal de corrida ou bug; nunca engolimos.
    #[error("Estado inconsistente no banco: {0}")]
    InternalInconsistency(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Conflito de reserva devolve o conjunto conflitante no corpo.
            AppError::BookingConflict(conflicts) => {
                let body = Json(json!({
                    "error": "O apartamento não está disponível nas datas selecionadas.",
                    "conflicts": conflicts,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "A data de check-out deve ser posterior à data de check-in.".to_string(),
            ),
            AppError::PastCheckIn => (
                StatusCode::BAD_REQUEST,
                "A data de check-in não pode ser anterior a hoje.".to_string(),
            ),
            AppError::ResourceNotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", resource))
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E-mail ou senha inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError,
            // InternalInconsistency) viram 500. O `tracing` loga a mensagem
            // detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
