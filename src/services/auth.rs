// src/services/auth.rs

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::auth::{Claims, Role},
};

#[derive(Clone)]
pub struct AuthService {
    store: LocalStore,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: LocalStore, jwt_secret: String) -> Self {
        Self { store, jwt_secret }
    }

    // Login por papel: compara o segredo compartilhado em texto plano
    // (formato preservado por compatibilidade com a planilha remota).
    // Papéis sem segredo cadastrado (VIEWER, SOLICITOR via QR) entram
    // sem senha.
    pub fn login(&self, role: Role, secret: Option<&str>) -> Result<String, AppError> {
        let auth = self.store.auth_data()?;

        match auth.get(role.as_str()) {
            Some(stored) if !stored.is_empty() => {
                if secret != Some(stored.as_str()) {
                    return Err(AppError::InvalidCredentials);
                }
            }
            _ => {} // sem segredo cadastrado: acesso livre para esse papel
        }

        self.create_token(role)
    }

    pub fn validate_token(&self, token: &str) -> Result<Role, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims.role)
    }

    fn create_token(&self, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("auth.redb")).expect("open store");
        (dir, AuthService::new(store, "segredo-de-teste".into()))
    }

    #[test]
    fn login_e_validacao_do_token() {
        let (_dir, svc) = service();

        let token = svc.login(Role::Admin, Some("admin123")).unwrap();
        assert_eq!(svc.validate_token(&token).unwrap(), Role::Admin);
    }

    #[test]
    fn segredo_errado_rejeitado() {
        let (_dir, svc) = service();

        assert!(matches!(
            svc.login(Role::Admin, Some("errado")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.login(Role::Treasury, None),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn papeis_sem_segredo_entram_livres() {
        let (_dir, svc) = service();

        assert!(svc.login(Role::Viewer, None).is_ok());
        assert!(svc.login(Role::Solicitor, None).is_ok());
    }

    #[test]
    fn token_invalido_rejeitado() {
        let (_dir, svc) = service();
        assert!(matches!(
            svc.validate_token("nao-e-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
