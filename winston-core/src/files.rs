//! File list bookkeeping shared by every front end: one row per file name,
//! and removal that cancels the upload before the server is asked to delete
//! its copy.

use crate::tracker::{CancelUpload, UploadTracker};

pub trait FileRow {
    fn row_id(&self) -> u64;
    fn file_name(&self) -> &str;
}

/// Append `row`, replacing any row already showing the same file name.
pub fn upsert_row<R: FileRow>(rows: &mut Vec<R>, row: R) {
    rows.retain(|r| r.file_name() != row.file_name());
    rows.push(row);
}

/// Drop row `id` and cancel its upload if one is in flight. Returns the
/// file name so the caller can request server-side deletion.
pub fn remove_row<R: FileRow, H: CancelUpload>(
    rows: &mut Vec<R>,
    tracker: &mut UploadTracker<H>,
    id: u64,
) -> Option<String> {
    let pos = rows.iter().position(|r| r.row_id() == id)?;
    let name = rows.remove(pos).file_name().to_string();
    if tracker.cancel_and_forget(&name) {
        log::info!("Cancelled upload of {name}");
    }
    Some(name)
}

#[allow(async_fn_in_trait)]
pub trait RemoteFiles {
    async fn remove_file(&self, name: &str) -> Result<(), String>;
}

/// Ask the server to delete `name`. Failures are logged only: the row is
/// already gone and stays gone.
pub async fn delete_remote<S: RemoteFiles>(server: &S, name: &str) -> bool {
    match server.remove_file(name).await {
        Ok(()) => {
            log::info!("Removed {name} from server");
            true
        }
        Err(e) => {
            log::error!("Error removing file {name}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: u64,
        name: &'static str,
    }

    impl FileRow for Row {
        fn row_id(&self) -> u64 {
            self.id
        }

        fn file_name(&self) -> &str {
            self.name
        }
    }

    #[derive(Clone, Default)]
    struct FakeRequest {
        cancelled: Rc<Cell<u32>>,
    }

    impl CancelUpload for FakeRequest {
        fn cancel(&self) {
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    #[derive(Default)]
    struct FailingServer {
        asked: RefCell<Vec<String>>,
    }

    impl RemoteFiles for FailingServer {
        async fn remove_file(&self, name: &str) -> Result<(), String> {
            self.asked.borrow_mut().push(name.to_string());
            Err("File not found".into())
        }
    }

    #[test]
    fn duplicate_name_replaces_row_and_upload() {
        let mut rows = vec![Row { id: 1, name: "a.dcm" }, Row { id: 2, name: "b.dcm" }];
        let mut tracker = UploadTracker::new();
        let first = FakeRequest::default();
        let t1 = tracker.reserve("a.dcm");
        tracker.register(&t1, first.clone());

        upsert_row(&mut rows, Row { id: 3, name: "a.dcm" });
        let t2 = tracker.reserve("a.dcm");
        tracker.register(&t2, FakeRequest::default());

        assert_eq!(rows, [Row { id: 2, name: "b.dcm" }, Row { id: 3, name: "a.dcm" }]);
        assert_eq!(first.cancelled.get(), 1);
        assert!(!tracker.is_current(&t1));
    }

    #[tokio::test]
    async fn removal_cancels_upload_and_row_stays_gone_on_server_error() {
        let mut rows = vec![Row { id: 1, name: "a.dcm" }, Row { id: 2, name: "b.dcm" }];
        let mut tracker = UploadTracker::new();
        let req = FakeRequest::default();
        let ticket = tracker.reserve("a.dcm");
        tracker.register(&ticket, req.clone());

        let name = remove_row(&mut rows, &mut tracker, 1).unwrap();
        assert_eq!(name, "a.dcm");
        assert_eq!(req.cancelled.get(), 1);
        assert!(!tracker.is_current(&ticket));

        let server = FailingServer::default();
        assert!(!delete_remote(&server, &name).await);
        assert_eq!(*server.asked.borrow(), ["a.dcm"]);
        assert_eq!(rows, [Row { id: 2, name: "b.dcm" }]);
    }

    #[test]
    fn removing_finished_upload_cancels_nothing() {
        let mut rows = vec![Row { id: 7, name: "a.dcm" }];
        let mut tracker: UploadTracker<FakeRequest> = UploadTracker::new();
        assert_eq!(remove_row(&mut rows, &mut tracker, 7).as_deref(), Some("a.dcm"));
        assert_eq!(remove_row(&mut rows, &mut tracker, 7), None);
        assert!(rows.is_empty());
    }
}
