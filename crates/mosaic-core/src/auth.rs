//! Authorization seam: who may edit and persist the layout.
//!
//! The store never holds a literal credential; the host injects an
//! [`Authorizer`] and an [`IdentityProvider`] and every mutating operation is
//! checked against them.

/// Decides whether an identity may mutate the layout.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, identity: Option<&str>) -> bool;
}

/// Authorizes exactly one address, compared case-sensitively.
pub struct DesignatedAdmin {
    email: String,
}

impl DesignatedAdmin {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl Authorizer for DesignatedAdmin {
    fn is_authorized(&self, identity: Option<&str>) -> bool {
        identity == Some(self.email.as_str())
    }
}

/// Supplies the current user, or `None` when nobody is signed in.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<String>;
}

/// A fixed identity, mainly for tests and embedding hosts.
pub struct FixedIdentity(Option<String>);

impl FixedIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self(Some(email.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_user(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the current user from an environment variable on every lookup.
pub struct EnvIdentity {
    var: String,
}

impl EnvIdentity {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl IdentityProvider for EnvIdentity {
    fn current_user(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designated_admin_matches_exactly() {
        let auth = DesignatedAdmin::new("admin@example.com");
        assert!(auth.is_authorized(Some("admin@example.com")));
        assert!(!auth.is_authorized(Some("other@example.com")));
        assert!(!auth.is_authorized(None));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let auth = DesignatedAdmin::new("admin@example.com");
        assert!(!auth.is_authorized(Some("Admin@example.com")));
        assert!(!auth.is_authorized(Some("admin@EXAMPLE.com")));
    }

    #[test]
    fn test_fixed_identity() {
        assert_eq!(
            FixedIdentity::new("me@example.com").current_user(),
            Some("me@example.com".to_string())
        );
        assert_eq!(FixedIdentity::anonymous().current_user(), None);
    }
}
