use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::AppState;
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};

pub async fn run<K: SlotStore, B: BlobStore>(
    repo: &mut Repository<K, B>,
    state: &mut AppState,
) -> Result<CmdResult> {
    let report = repo.doctor().await?;
    state.records = repo.list_records().to_vec();
    let mut result = CmdResult::default();

    if report.dropped_records == 0 && report.deleted_orphan_blobs == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        if report.dropped_records > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} file(s) listed in the index but missing from storage.",
                report.dropped_records
            )));
        }
        if report.deleted_orphan_blobs > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Deleted {} stored file(s) no longer listed in the index.",
                report.deleted_orphan_blobs
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::RepoFixture;
    use crate::store::BlobStore;

    #[tokio::test]
    async fn clean_store_reports_nothing() {
        let mut fx = RepoFixture::new().with_files("seg", &["a.txt"]).await.unwrap();
        let mut state = AppState::new("seg", fx.repo.list_records().to_vec());
        let result = run(&mut fx.repo, &mut state).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(!result.has_notice());
    }

    #[tokio::test]
    async fn drops_records_without_content() {
        let mut fx = RepoFixture::new().with_files("seg", &["a.txt"]).await.unwrap();
        let id = fx.repo.list_records()[0].id;
        fx.repo.blobs().delete(&id).await.unwrap();
        let mut state = AppState::new("seg", fx.repo.list_records().to_vec());

        let result = run(&mut fx.repo, &mut state).await.unwrap();

        assert!(result.has_notice());
        assert!(state.records.is_empty());
    }
}
