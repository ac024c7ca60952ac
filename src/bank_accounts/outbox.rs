//! Outbox backed bank account client
//!
//! Submissions are written as one JSON document per request into an outbox
//! directory, where a separate uploader picks them up.

use super::request::WithdrawalAccountRequest;
use super::traits::BankAccountsApi;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct OutboxClient {
    dir: PathBuf,
}

impl OutboxClient {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        self.dir.join(format!("{stamp}-{}.json", Uuid::new_v4()))
    }
}

#[async_trait]
impl BankAccountsApi for OutboxClient {
    async fn setup_withdrawal_account(&mut self, request: &WithdrawalAccountRequest) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create outbox {}", self.dir.display()))?;

        let body = serde_json::to_vec_pretty(request)
            .context("Failed to encode withdrawal account request")?;
        let path = self.next_path();
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            owners = request.form.beneficial_owners.len(),
            "queued withdrawal account setup"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ContractForm;

    #[tokio::test]
    async fn test_writes_one_file_per_request() {
        let dir = std::env::temp_dir().join(format!("ach-outbox-{}", Uuid::new_v4()));
        let mut client = OutboxClient::new(&dir);
        let request = WithdrawalAccountRequest::ach_contract(ContractForm::default());

        client.setup_withdrawal_account(&request).await.unwrap();
        client.setup_withdrawal_account(&request).await.unwrap();

        let mut entries = std::fs::read_dir(client.dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect::<Vec<_>>();
        entries.sort();
        assert_eq!(entries.len(), 2);

        let body: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&entries[0]).unwrap()).unwrap();
        assert_eq!(body["currentStep"], "ACHContractStep");
        assert_eq!(body["beneficialOwners"], serde_json::json!([]));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
