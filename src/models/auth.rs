use serde::Deserialize;

/// Identity payload supplied to the token endpoint. Only the email is
/// trusted downstream as a claim.
#[derive(Debug, Deserialize)]
pub struct IdentityInput {
    pub email: String,
}
