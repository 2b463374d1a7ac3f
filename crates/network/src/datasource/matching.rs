use async_trait::async_trait;
use model::{MatchDataSource, MatchDecision, MatchStatus, Outcome, RunningDistance};
use serde_json::json;

use crate::{ApiClient, ApiRequest};

const WAITING_PATH: &str = "/api/waiting";
const JOIN_PATH: &str = "/api/matching/members/join";
const CANCEL_PATH: &str = "/api/waiting/event/cancel";

/// Battle matchmaking endpoints.
pub struct MatchDataSourceImpl {
    client: ApiClient,
}

impl MatchDataSourceImpl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MatchDataSource for MatchDataSourceImpl {
    async fn register(&self, distance: RunningDistance) -> Outcome<MatchStatus> {
        let request = ApiRequest::post(WAITING_PATH).json(json!({ "distance": distance.meters() }));
        self.client.call(request).await
    }

    async fn decide(&self, decision: MatchDecision) -> Outcome<MatchStatus> {
        let request = ApiRequest::patch(JOIN_PATH).json(json!({ "isJoin": decision.is_joined }));
        self.client.call(request).await
    }

    async fn cancel(&self) -> Outcome<MatchStatus> {
        self.client.call(ApiRequest::post(CANCEL_PATH)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{MockTransport, RawResponse, RequestBody};

    #[tokio::test]
    async fn decline_sends_is_join_false() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| {
                request.path == JOIN_PATH
                    && request.body == Some(RequestBody::Json(json!({ "isJoin": false })))
            })
            .returning(|_| Ok(RawResponse::new(200, Some(br#"{"message":"declined"}"#.to_vec()))));
        let source = MatchDataSourceImpl::new(ApiClient::new(Arc::new(transport)));

        let outcome = source.decide(MatchDecision::decline()).await;

        assert_eq!(
            outcome,
            Outcome::Success(MatchStatus {
                message: "declined".into()
            })
        );
    }

    #[tokio::test]
    async fn register_reports_queue_rejection() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|request| request.path == WAITING_PATH)
            .returning(|_| {
                Ok(RawResponse::new(
                    409,
                    Some(br#"{"message":"already waiting"}"#.to_vec()),
                ))
            });
        let source = MatchDataSourceImpl::new(ApiClient::new(Arc::new(transport)));

        let outcome = source.register(RunningDistance::new(3_000).unwrap()).await;

        assert_eq!(outcome, Outcome::failure("already waiting", 409));
    }
}
