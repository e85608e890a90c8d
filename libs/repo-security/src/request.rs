use secrecy::SecretString;

/// The shape of an authentication request as seen by the web layer.
///
/// Providers declare which shapes they are able to decide on; the caller
/// filters requests by shape before handing them to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenShape {
    /// A name/secret pair, e.g. from HTTP Basic or a login form.
    UsernamePassword,
    /// An opaque bearer token.
    Bearer,
    /// No credentials were presented.
    Anonymous,
}

/// A name/secret pair submitted for verification.
///
/// Exists only for the duration of one authentication attempt.
#[derive(Debug, Clone)]
pub struct Credential {
    name: String,
    secret: SecretString,
}

impl Credential {
    #[must_use]
    pub fn new(name: impl Into<String>, secret: SecretString) -> Self {
        Self {
            name: name.into(),
            secret,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}

/// An authentication request submitted by the web layer.
#[derive(Debug, Clone)]
pub enum AuthenticationRequest {
    UsernamePassword(Credential),
    Bearer(SecretString),
    Anonymous,
}

impl AuthenticationRequest {
    /// Convenience constructor for a name/secret request.
    #[must_use]
    pub fn username_password(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::UsernamePassword(Credential::new(name, SecretString::from(secret.into())))
    }

    #[must_use]
    pub fn shape(&self) -> TokenShape {
        match self {
            Self::UsernamePassword(_) => TokenShape::UsernamePassword,
            Self::Bearer(_) => TokenShape::Bearer,
            Self::Anonymous => TokenShape::Anonymous,
        }
    }
}
