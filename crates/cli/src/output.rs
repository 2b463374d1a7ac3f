//! Projection of outcomes into the JSON printed by each command.
//!
//! Every outcome is matched exhaustively: success carries its payload, empty
//! carries nothing, and failure carries the message and code unchanged.

use model::Outcome;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Rendered {
    Success { data: Value },
    Empty,
    Failure { message: String, code: i32 },
}

pub fn render<T: Serialize>(outcome: Outcome<T>) -> serde_json::Result<Rendered> {
    Ok(match outcome {
        Outcome::Success(value) => Rendered::Success {
            data: serde_json::to_value(value)?,
        },
        Outcome::Empty => Rendered::Empty,
        Outcome::Failure { message, code } => Rendered::Failure { message, code },
    })
}

/// What a command prints, and whether it ended in failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub body: Value,
    pub failed: bool,
}

impl Report {
    /// Report for a single outcome.
    pub fn single<T: Serialize>(outcome: Outcome<T>) -> serde_json::Result<Self> {
        let outcome = outcome.on_failure(|message, code| {
            tracing::warn!(code, reason = message, "operation failed");
        });
        let failed = outcome.is_failure();
        Ok(Self {
            body: serde_json::to_value(render(outcome)?)?,
            failed,
        })
    }

    /// Report for a stream's emissions, in order. Only the final emission
    /// decides failure.
    pub fn sequence<T: Serialize>(outcomes: Vec<Outcome<T>>) -> serde_json::Result<Self> {
        let failed = outcomes.last().is_some_and(Outcome::is_failure);
        Ok(Self {
            body: Value::Array(render_all(outcomes)?),
            failed,
        })
    }
}

pub fn render_all<T: Serialize>(outcomes: Vec<Outcome<T>>) -> serde_json::Result<Vec<Value>> {
    outcomes
        .into_iter()
        .map(|outcome| {
            let outcome = outcome.on_failure(|message, code| {
                tracing::warn!(code, reason = message, "operation failed");
            });
            serde_json::to_value(render(outcome)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn each_variant_has_its_own_shape() {
        assert_eq!(
            serde_json::to_value(render(Outcome::Success(json!({ "id": "b-1" }))).unwrap())
                .unwrap(),
            json!({ "status": "success", "data": { "id": "b-1" } })
        );
        assert_eq!(
            serde_json::to_value(render(Outcome::<()>::Empty).unwrap()).unwrap(),
            json!({ "status": "empty" })
        );
        assert_eq!(
            serde_json::to_value(render(Outcome::<()>::failure("expired", 401)).unwrap()).unwrap(),
            json!({ "status": "failure", "message": "expired", "code": 401 })
        );
    }

    #[test]
    fn single_report_fails_only_on_failure() {
        assert!(!Report::single(Outcome::Success(1)).unwrap().failed);
        assert!(!Report::single(Outcome::<i32>::Empty).unwrap().failed);
        assert!(Report::single(Outcome::<i32>::transport_failure("refused")).unwrap().failed);
    }

    #[test]
    fn sequence_report_is_decided_by_the_last_emission() {
        let recovered = Report::sequence(vec![Outcome::failure("offline", -1), Outcome::Success(2)])
            .unwrap();
        let degraded = Report::sequence(vec![Outcome::Success(1), Outcome::failure("offline", -1)])
            .unwrap();

        assert!(!recovered.failed);
        assert!(degraded.failed);
        assert_eq!(
            degraded.body,
            json!([
                { "status": "success", "data": 1 },
                { "status": "failure", "message": "offline", "code": -1 },
            ])
        );
    }
}
