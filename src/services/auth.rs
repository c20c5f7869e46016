use std::sync::Arc;

use actix_web::web;
use log::{info, warn};
use tokio::sync::OnceCell;
use validator::Validate;

use crate::auth::{hash_password, verify_password, AccessToken, AuthCredentials, TokenIssuer};
use crate::error::AppError;
use crate::models::User;
use crate::store::UserStore;

/// Signs users up and in, and resolves access tokens back to users.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
    /// Hash checked against when the username is unknown, so both sign-in
    /// failures pay for one bcrypt verification.
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Registers a new user. Duplicate usernames are rejected by the store.
    pub async fn sign_up(&self, credentials: AuthCredentials) -> Result<(), AppError> {
        credentials.validate()?;
        let AuthCredentials { username, password } = credentials;

        let cost = self.bcrypt_cost;
        let password_hash = web::block(move || hash_password(&password, cost)).await??;

        let user = User::new(username, password_hash);
        self.users.create_user(&user).await?;
        info!("User \"{}\" signed up", user.username);
        Ok(())
    }

    /// Checks credentials and issues an access token.
    ///
    /// An unknown username and a wrong password produce the same error.
    pub async fn sign_in(&self, credentials: AuthCredentials) -> Result<AccessToken, AppError> {
        credentials.validate()?;
        let AuthCredentials { username, password } = credentials;

        let user = self.users.find_by_username(&username).await?;
        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash().await?.to_string(),
        };

        let matches = web::block(move || verify_password(&password, &stored_hash)).await??;
        let user = match user {
            Some(user) if matches => user,
            _ => {
                warn!("Failed sign-in attempt for \"{}\"", username);
                return Err(AppError::bad_credentials());
            }
        };

        let access_token = self.tokens.issue(&user.username)?;
        Ok(AccessToken { access_token })
    }

    /// Verifies a bearer token and loads the user it was issued to.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.tokens.verify(token)?;
        self.users
            .find_by_username(&claims.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.users.ping().await
    }

    async fn dummy_hash(&self) -> Result<&str, AppError> {
        let cost = self.bcrypt_cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move {
                let hashed = web::block(move || hash_password("unknown-user-password", cost)).await??;
                Ok::<_, AppError>(hashed)
            })
            .await?;
        Ok(hash.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            TokenIssuer::new("unit-test-secret", 3600),
            4,
        )
    }

    fn creds(username: &str, password: &str) -> AuthCredentials {
        AuthCredentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_sign_up_then_sign_in() {
        let auth = service();
        auth.sign_up(creds("alice", "Passw0rd!")).await.unwrap();

        let token = auth.sign_in(creds("alice", "Passw0rd!")).await.unwrap();
        let user = auth.authenticate(&token.access_token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "Passw0rd!");
    }

    #[actix_rt::test]
    async fn test_duplicate_sign_up_conflicts() {
        let auth = service();
        auth.sign_up(creds("alice", "Passw0rd!")).await.unwrap();

        match auth.sign_up(creds("alice", "Other-pass1")).await {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Username already exists"),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let auth = service();
        auth.sign_up(creds("alice", "Passw0rd!")).await.unwrap();

        let wrong_password = auth.sign_in(creds("alice", "Wrong-pass1")).await.unwrap_err();
        let unknown_user = auth.sign_in(creds("nobody", "Passw0rd!")).await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
    }

    #[actix_rt::test]
    async fn test_unknown_user_still_verifies_a_hash() {
        let auth = service();
        assert!(auth.dummy_hash.get().is_none());

        let err = auth.sign_in(creds("nobody", "Passw0rd!")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let dummy = auth.dummy_hash.get().expect("dummy hash not initialised");
        assert!(dummy.starts_with("$2b$04$"));
        assert!(!verify_password("Passw0rd!", dummy).unwrap());
    }

    #[actix_rt::test]
    async fn test_weak_credentials_are_rejected() {
        let auth = service();
        assert!(matches!(
            auth.sign_up(creds("al", "Passw0rd!")).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            auth.sign_up(creds("alice", "password")).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_rt::test]
    async fn test_token_for_unknown_user_is_rejected() {
        let auth = service();
        let orphan = TokenIssuer::new("unit-test-secret", 3600)
            .issue("ghost")
            .unwrap();
        assert!(matches!(
            auth.authenticate(&orphan).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            auth.authenticate("garbage").await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
