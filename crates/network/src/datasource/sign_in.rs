use async_trait::async_trait;
use model::{GoogleIdToken, Outcome, SignInDataSource, SignInToken};
use serde_json::json;

use crate::{ApiClient, ApiRequest};

const SIGN_IN_PATH: &str = "/api/auth";

/// Exchanges Google identity tokens at the PartyRun auth endpoint.
pub struct SignInDataSourceImpl {
    client: ApiClient,
}

impl SignInDataSourceImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SignInDataSource for SignInDataSourceImpl {
    async fn sign_in(&self, id_token: &GoogleIdToken) -> Outcome<SignInToken> {
        let request = ApiRequest::post(SIGN_IN_PATH).json(json!({ "idToken": id_token.id_token }));
        self.client.call(request).await
    }
}
