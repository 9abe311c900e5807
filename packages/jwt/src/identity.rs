//! Caller-owned identities checked against a token's subject

/// Anything with a unique username
pub trait Identity {
    /// Username compared byte-for-byte against the `sub` claim
    fn username(&self) -> &str;
}

impl Identity for str {
    fn username(&self) -> &str {
        self
    }
}

impl Identity for String {
    fn username(&self) -> &str {
        self.as_str()
    }
}

impl<T: Identity + ?Sized> Identity for &T {
    fn username(&self) -> &str {
        (**self).username()
    }
}

/// Username plus granted authorities, as handed over by a user store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    username: String,
    authorities: Vec<String>,
}

impl UserIdentity {
    /// Identity with no authorities
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authorities: Vec::new(),
        }
    }

    /// Add a granted authority
    #[must_use]
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authorities.push(authority.into());
        self
    }

    /// Granted authorities
    #[must_use]
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }
}

impl Identity for UserIdentity {
    fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of<I: Identity + ?Sized>(identity: &I) -> &str {
        identity.username()
    }

    #[test]
    fn test_identity_impls() {
        assert_eq!(name_of("alice"), "alice");
        assert_eq!(name_of(&"bob".to_string()), "bob");

        let user = UserIdentity::new("carol").with_authority("ROLE_ADMIN");
        assert_eq!(name_of(&user), "carol");
        assert_eq!(user.authorities(), ["ROLE_ADMIN".to_string()]);
    }
}
