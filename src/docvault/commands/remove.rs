use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::AppState;
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};
use uuid::Uuid;

/// Removes file `id`: content first, then its record.
///
/// If deleting the content fails the record stays listed and the error is returned.
pub async fn run<K: SlotStore, B: BlobStore>(
    repo: &mut Repository<K, B>,
    state: &mut AppState,
    id: &Uuid,
) -> Result<CmdResult> {
    let removed = repo.remove_record(id).await?;
    state.records = repo.list_records().to_vec();

    let mut result = CmdResult::default();
    match removed {
        Some(record) => {
            result.add_message(CmdMessage::success(format!("Removed: {}", record.name)));
            Ok(result.with_affected_records(vec![record]))
        }
        None => {
            result.add_message(CmdMessage::info("Nothing to remove."));
            Ok(result)
        }
    }
}
