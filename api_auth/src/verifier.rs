use common::error::Res;

/// Hook for validating the inbound identity credential before it is
/// resolved to a user.
///
/// The session cookie is a bearer credential: whoever presents a
/// username is trusted to be that user. Deployments that need real
/// integrity protection can inject their own implementation; the
/// default is a pass-through for parity with the cookie transport.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str) -> Res<()>;
}

/// Accepts every credential unchanged.
pub struct PassThrough;

impl CredentialVerifier for PassThrough {
    fn verify(&self, _username: &str) -> Res<()> {
        Ok(())
    }
}
