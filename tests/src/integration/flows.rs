//! # Entity Store Flows
//!
//! Disputes and users over a file-backed store, checked across process-style
//! reopens (drop every handle, open the file again).

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use fd_01_entity_store::adapters::{FileBackedKVStore, FixedTimeSource};
    use fd_01_entity_store::{entities, EntityStoreApi, IndexedStore, StoreContext};
    use shared_types::{Dispute, DisputePatch};
    use tempfile::TempDir;

    const NOW: u64 = 1_714_521_600_000;

    fn disputes_at(path: &Path) -> IndexedStore<Dispute, FileBackedKVStore> {
        let kv = FileBackedKVStore::open(path).unwrap();
        entities::disputes(StoreContext::new(kv, Arc::new(FixedTimeSource(NOW))))
    }

    fn dispute(id: &str, billed: f64, fmv: f64) -> Dispute {
        Dispute {
            id: id.into(),
            patient_name: "X".into(),
            billed_amount: billed,
            fmv_amount: fmv,
            ..Dispute::default()
        }
    }

    fn page_ids(store: &IndexedStore<Dispute, FileBackedKVStore>) -> Vec<String> {
        store
            .list(None, Some(100))
            .unwrap()
            .items
            .into_iter()
            .map(|d| d.id)
            .collect()
    }

    #[test]
    fn test_lifecycle_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.bin");

        {
            let store = disputes_at(&path);
            store.ensure_seed().unwrap();
            store.create(dispute("d1", 450.0, 185.5)).unwrap();
            store
                .mutate("disp_2", |d| {
                    DisputePatch {
                        fmv_amount: Some(1_000.0),
                        ..DisputePatch::default()
                    }
                    .apply(d)
                })
                .unwrap();
            assert!(store.delete("disp_1").unwrap());
        }

        let store = disputes_at(&path);
        store.ensure_seed().unwrap();

        assert_eq!(page_ids(&store), ["disp_2", "d1"]);
        assert!(!store.exists("disp_1").unwrap());

        let d1 = store.get("d1").unwrap();
        assert_eq!(d1.variance, 264.5);
        assert!((d1.variance_percent - 142.58).abs() < 0.01);

        let disp_2 = store.get("disp_2").unwrap();
        assert_eq!(disp_2.fmv_amount, 1_000.0);
        assert_eq!(disp_2.variance, disp_2.billed_amount - 1_000.0);
    }

    #[test]
    fn test_pagination_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.bin");

        let cursor = {
            let store = disputes_at(&path);
            for i in 0..5 {
                store.create(dispute(&format!("d{i}"), 100.0, 50.0)).unwrap();
            }
            let first = store.list(None, Some(2)).unwrap();
            assert_eq!(first.items.len(), 2);
            first.next_cursor.unwrap()
        };

        let store = disputes_at(&path);
        let second = store.list(Some(cursor.as_str()), Some(2)).unwrap();
        let ids: Vec<_> = second.items.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d2", "d3"]);

        let third = store
            .list(second.next_cursor.as_deref(), Some(2))
            .unwrap();
        assert_eq!(third.items.len(), 1);
        assert!(third.next_cursor.is_none());
    }

    #[test]
    fn test_entities_share_one_file_without_collisions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.bin");

        {
            let kv = FileBackedKVStore::open(&path).unwrap();
            let ctx = StoreContext::new(kv, Arc::new(FixedTimeSource(NOW)));
            entities::disputes(ctx.clone()).ensure_seed().unwrap();
            entities::users(ctx).ensure_seed().unwrap();
        }

        let kv = FileBackedKVStore::open(&path).unwrap();
        let ctx = StoreContext::new(kv, Arc::new(FixedTimeSource(NOW)));
        let users = entities::users(ctx.clone());
        let disputes = entities::disputes(ctx);

        assert_eq!(users.list(None, None).unwrap().items.len(), 2);
        assert_eq!(disputes.list(None, None).unwrap().items.len(), 2);
        assert!(users.exists("u1").unwrap());
        assert!(!disputes.exists("u1").unwrap());
    }

    #[test]
    fn test_seeded_disputes_are_backdated() {
        let dir = TempDir::new().unwrap();
        let store = disputes_at(&dir.path().join("entities.bin"));
        store.ensure_seed().unwrap();

        let page = store.list(None, None).unwrap();
        assert!(page.items.iter().all(|d| d.created_at < NOW));
    }
}
