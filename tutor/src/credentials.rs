use crate::error::{TutorError, TutorResult};
use std::collections::HashMap;
use std::fmt;

/// Immutable user → secret table.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .finish()
    }
}

impl CredentialStore {
    pub fn new<I, U, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, S)>,
        U: Into<String>,
        S: Into<String>,
    {
        Self {
            users: entries
                .into_iter()
                .map(|(user, secret)| (user.into(), secret.into()))
                .collect(),
        }
    }

    /// Parses `user:secret` pairs separated by commas.
    pub fn parse(raw: &str) -> TutorResult<Self> {
        let mut users = HashMap::new();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (user, secret) = pair.split_once(':').ok_or_else(|| {
                TutorError::Config(format!("entrada de usuario sin ':' en AYUNI_USUARIOS: {pair}"))
            })?;
            let user = user.trim();
            if user.is_empty() {
                return Err(TutorError::Config(
                    "usuario vacío en AYUNI_USUARIOS".to_string(),
                ));
            }
            if users.insert(user.to_string(), secret.to_string()).is_some() {
                return Err(TutorError::Config(format!("usuario duplicado: {user}")));
            }
        }
        Ok(Self { users })
    }

    /// Exact, case-sensitive match on both fields.
    pub fn authenticate(&self, user: &str, secret: &str) -> bool {
        self.users.get(user).is_some_and(|stored| stored == secret)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
