//! Accounts (`t2`)

use crate::session::Session;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Account {
    session: Arc<Session>,
    data: Value,
}

impl Account {
    pub fn new(session: Arc<Session>, data: Value) -> Self {
        Self { session, data }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Username; accounts carry it in `name` instead of the fullname
    pub fn username(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn fullname(&self) -> Option<String> {
        self.data
            .get("id")
            .and_then(Value::as_str)
            .map(|id| format!("t2_{}", id))
    }

    pub fn total_karma(&self) -> Option<i64> {
        self.data.get("total_karma").and_then(Value::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use serde_json::json;

    #[test]
    fn test_account_names() {
        let session = Arc::new(Session::new(Settings::default(), Vec::new()).unwrap());
        let account = Account::new(session, json!({"name": "spez", "id": "1w72", "total_karma": 10}));
        assert_eq!(account.username(), Some("spez"));
        assert_eq!(account.fullname().as_deref(), Some("t2_1w72"));
        assert_eq!(account.total_karma(), Some(10));
    }
}
